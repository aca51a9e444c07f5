//! Checks over the template's sample data

pub mod relations;

pub use relations::{check_relations, class_key, summarize, RelationIssue, RelationSummary};
