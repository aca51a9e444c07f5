//! Workbook reader: .xlsx → sheet contents as display strings

use crate::error::{TemplateError, TemplateResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Cell text of one worksheet, header row included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetContents {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetContents {
    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows below the header
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

pub struct TemplateReader {
    path: PathBuf,
}

impl TemplateReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read every worksheet in workbook order
    pub fn read(&self) -> TemplateResult<Vec<SheetContents>> {
        debug!(path = %self.path.display(), "reading workbook");
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| TemplateError::Read(format!("{}: {}", self.path.display(), e)))?;
        read_sheets(&mut workbook)
    }

    /// Read a workbook held in memory
    pub fn read_bytes(bytes: &[u8]) -> TemplateResult<Vec<SheetContents>> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| TemplateError::Read(e.to_string()))?;
        read_sheets(&mut workbook)
    }
}

fn read_sheets<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> TemplateResult<Vec<SheetContents>> {
    let mut sheets = Vec::new();

    for name in workbook.sheet_names().to_vec() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| TemplateError::Read(format!("sheet '{}': {}", name, e)))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        sheets.push(SheetContents { name, rows });
    }

    Ok(sheets)
}

/// Integral floats lose their ".0", empty cells become ""
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Float(5000000.0)), "5000000");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(90)), "90");
        assert_eq!(cell_text(&Data::String("A101".to_string())), "A101");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_sheet_contents_split() {
        let sheet = SheetContents {
            name: "T".to_string(),
            rows: vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["1".to_string(), "2".to_string()],
            ],
        };
        assert_eq!(sheet.headers(), ["a", "b"]);
        assert_eq!(sheet.data_rows().len(), 1);

        let empty = SheetContents {
            name: "E".to_string(),
            rows: vec![],
        };
        assert!(empty.headers().is_empty());
        assert!(empty.data_rows().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let result = TemplateReader::new("/nonexistent/template.xlsx").read();
        assert!(matches!(result, Err(TemplateError::Read(_))));
    }
}
