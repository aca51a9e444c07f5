//! CLI command handlers

pub mod commands;

pub use commands::{check, generate, inspect, print_schema};
