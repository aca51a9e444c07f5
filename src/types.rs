use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

//==============================================================================
// Cell values
//==============================================================================

/// A scalar written into a sample row.
///
/// Untagged so schema files stay readable: `12` is an integer, `1.5` a
/// decimal, anything quoted is text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Display form used for relation checks and read-back comparisons
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Decimal(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Decimal(value)
    }
}

//==============================================================================
// Header style
//==============================================================================

/// Style applied to every header cell of every sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyle {
    pub bold: bool,
    /// RGB hex, e.g. "FFFFFF"
    pub font_color: String,
    pub font_size: f64,
    /// RGB hex of the solid fill
    pub fill_color: String,
    /// Centre horizontally and vertically
    pub centered: bool,
    /// Thin border on all four sides
    pub thin_border: bool,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            bold: true,
            font_color: "FFFFFF".to_string(),
            font_size: 11.0,
            fill_color: "4472C4".to_string(),
            centered: true,
            thin_border: true,
        }
    }
}

//==============================================================================
// Sheets and schema
//==============================================================================

/// One sheet of the template: header row, width and sample rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub name: String,
    pub headers: Vec<String>,
    /// Width applied to every header column
    pub column_width: f64,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetSpec {
    pub fn new(name: &str, headers: &[&str], column_width: f64) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            column_width,
            rows: Vec::new(),
        }
    }

    /// Builder-style row append
    pub fn with_row(mut self, row: Vec<CellValue>) -> Self {
        self.rows.push(row);
        self
    }

    /// Position of a header, case-sensitive
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Text of every sample row in the given column (missing cells are "")
    pub fn column_values(&self, header: &str) -> Option<Vec<String>> {
        let idx = self.column_index(header)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(CellValue::as_text).unwrap_or_default())
                .collect(),
        )
    }
}

/// The whole template: shared header style plus ordered sheets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSchema {
    #[serde(default)]
    pub header_style: HeaderStyle,
    pub sheets: Vec<SheetSpec>,
}

impl TemplateSchema {
    pub fn sheet(&self, name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

//==============================================================================
// Build results
//==============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub name: String,
    pub columns: usize,
    pub sample_rows: usize,
}

impl fmt::Display for SheetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} columns, {} sample rows)",
            self.name, self.columns, self.sample_rows
        )
    }
}

/// What a build wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub output: PathBuf,
    pub sheets: Vec<SheetSummary>,
}

impl TemplateSummary {
    pub fn from_schema(schema: &TemplateSchema, output: PathBuf) -> Self {
        Self {
            output,
            sheets: schema
                .sheets
                .iter()
                .map(|s| SheetSummary {
                    name: s.name.clone(),
                    columns: s.headers.len(),
                    sample_rows: s.rows.len(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::from(12).as_text(), "12");
        assert_eq!(CellValue::from(1.5).as_text(), "1.5");
        assert_eq!(CellValue::from("ENROLLED").as_text(), "ENROLLED");
        assert_eq!(CellValue::from("").as_text(), "");
    }

    #[test]
    fn test_cell_value_untagged_yaml() {
        let values: Vec<CellValue> = serde_yaml::from_str("[12, 1.5, 'K2024', '90']").unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Integer(12),
                CellValue::Decimal(1.5),
                CellValue::text("K2024"),
                CellValue::text("90"),
            ]
        );
    }

    #[test]
    fn test_column_values_pads_short_rows() {
        let sheet = SheetSpec::new("T", &["a", "b"], 10.0)
            .with_row(vec!["x".into(), "y".into()])
            .with_row(vec!["z".into()]);
        assert_eq!(sheet.column_values("b").unwrap(), vec!["y", ""]);
        assert!(sheet.column_values("c").is_none());
    }

    #[test]
    fn test_header_style_defaults() {
        let style: HeaderStyle = serde_yaml::from_str("bold: false").unwrap();
        assert!(!style.bold);
        assert_eq!(style.fill_color, "4472C4");
        assert_eq!(style.font_color, "FFFFFF");
        assert!(style.thin_border);
    }

    #[test]
    fn test_sheet_summary_display() {
        let summary = SheetSummary {
            name: "Students".to_string(),
            columns: 6,
            sample_rows: 3,
        };
        assert_eq!(summary.to_string(), "Students (6 columns, 3 sample rows)");
    }
}
