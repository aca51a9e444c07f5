//! Import template generator
//!
//! Builds the Excel workbook admins fill in before a bulk import: five
//! sheets (Students, Teachers, Courses, Classes, Enrollments), each with a
//! styled header row, fixed column widths and a few sample rows.
//!
//! # Example
//!
//! ```no_run
//! use import_template::excel::TemplateBuilder;
//! use import_template::types::TemplateSchema;
//! use std::path::Path;
//!
//! let builder = TemplateBuilder::new(TemplateSchema::builtin());
//! let summary = builder.build(Path::new("import-template.xlsx"))?;
//!
//! for sheet in &summary.sheets {
//!     println!("{}", sheet);
//! }
//! # Ok::<(), import_template::error::TemplateError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use error::{TemplateError, TemplateResult};
pub use types::{CellValue, HeaderStyle, SheetSpec, TemplateSchema, TemplateSummary};
