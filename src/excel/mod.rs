//! Excel output and read-back
//!
//! - Build: schema → styled .xlsx (rust_xlsxwriter)
//! - Read: .xlsx → sheet contents (calamine)

mod builder;
mod reader;

pub use builder::TemplateBuilder;
pub use reader::{SheetContents, TemplateReader};
