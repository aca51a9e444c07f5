use rust_xlsxwriter::XlsxError;
use std::path::PathBuf;
use thiserror::Error;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Error, Debug)]
pub enum TemplateError {
    /// The workbook could not be written to its destination.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    #[error("Workbook error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Failed to read workbook: {0}")]
    Read(String),

    #[error("{0} broken cross-sheet reference(s)")]
    Relations(usize),
}
