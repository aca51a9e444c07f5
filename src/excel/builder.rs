//! Template builder: schema → styled .xlsx

use crate::error::{TemplateError, TemplateResult};
use crate::schema::parse_color;
use crate::types::{CellValue, HeaderStyle, SheetSpec, TemplateSchema, TemplateSummary};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

/// Renders a [`TemplateSchema`] into a workbook
pub struct TemplateBuilder {
    schema: TemplateSchema,
}

impl TemplateBuilder {
    pub fn new(schema: TemplateSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &TemplateSchema {
        &self.schema
    }

    /// Build the workbook and save it to `output_path`
    pub fn build(&self, output_path: &Path) -> TemplateResult<TemplateSummary> {
        let mut workbook = self.render()?;

        workbook
            .save(output_path)
            .map_err(|source| TemplateError::OutputWrite {
                path: output_path.to_path_buf(),
                source,
            })?;

        info!(path = %output_path.display(), sheets = self.schema.sheets.len(), "template written");
        Ok(TemplateSummary::from_schema(
            &self.schema,
            output_path.to_path_buf(),
        ))
    }

    /// Build the workbook in memory and return the .xlsx bytes
    pub fn build_to_buffer(&self) -> TemplateResult<Vec<u8>> {
        let mut workbook = self.render()?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Lay out every sheet. `Workbook::new()` starts with no worksheets.
    fn render(&self) -> TemplateResult<Workbook> {
        self.schema.validate()?;
        let header_format = Self::header_format(&self.schema.header_style)?;
        let mut workbook = Workbook::new();

        for sheet in &self.schema.sheets {
            let worksheet = workbook.add_worksheet();
            Self::write_sheet(worksheet, sheet, &header_format)?;
        }

        Ok(workbook)
    }

    /// Styled header row with fixed widths, then unstyled sample rows
    fn write_sheet(
        worksheet: &mut Worksheet,
        sheet: &SheetSpec,
        header_format: &Format,
    ) -> TemplateResult<()> {
        debug!(sheet = %sheet.name, columns = sheet.headers.len(), rows = sheet.rows.len(), "writing sheet");
        worksheet.set_name(&sheet.name)?;

        for (col_idx, header) in sheet.headers.iter().enumerate() {
            let col = column_number(col_idx)?;
            worksheet.write_string_with_format(0, col, header, header_format)?;
            worksheet.set_column_width(col, sheet.column_width)?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            // Row 0 is the header
            let excel_row = u32::try_from(row_idx + 1).map_err(|_| {
                TemplateError::Schema(format!("sheet '{}' has too many rows", sheet.name))
            })?;
            for (col_idx, value) in row.iter().enumerate() {
                Self::write_cell_value(worksheet, excel_row, column_number(col_idx)?, value)?;
            }
        }

        Ok(())
    }

    /// Sample cells are written without a format
    fn write_cell_value(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
    ) -> TemplateResult<()> {
        match value {
            CellValue::Text(s) => {
                worksheet.write_string(row, col, s)?;
            }
            CellValue::Integer(n) => {
                worksheet.write_number(row, col, *n as f64)?;
            }
            CellValue::Decimal(n) => {
                worksheet.write_number(row, col, *n)?;
            }
        }
        Ok(())
    }

    fn header_format(style: &HeaderStyle) -> TemplateResult<Format> {
        let mut format = Format::new()
            .set_font_color(parse_color(&style.font_color)?)
            .set_font_size(style.font_size)
            .set_pattern(FormatPattern::Solid)
            .set_background_color(parse_color(&style.fill_color)?);

        if style.bold {
            format = format.set_bold();
        }
        if style.centered {
            format = format
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter);
        }
        if style.thin_border {
            format = format.set_border(FormatBorder::Thin);
        }

        Ok(format)
    }
}

fn column_number(col_idx: usize) -> TemplateResult<u16> {
    u16::try_from(col_idx)
        .map_err(|_| TemplateError::Schema(format!("column index {} out of range", col_idx)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_format_rejects_bad_colour() {
        let style = HeaderStyle {
            fill_color: "nope".to_string(),
            ..Default::default()
        };
        assert!(TemplateBuilder::header_format(&style).is_err());
    }

    #[test]
    fn test_header_format_default_style() {
        assert!(TemplateBuilder::header_format(&HeaderStyle::default()).is_ok());
    }

    #[test]
    fn test_build_to_buffer_is_zip() {
        let builder = TemplateBuilder::new(TemplateSchema::builtin());
        let bytes = builder.build_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_render_rejects_invalid_sheet_name() {
        let schema = TemplateSchema {
            header_style: HeaderStyle::default(),
            sheets: vec![SheetSpec::new("bad[name]", &["a"], 10.0)],
        };
        let result = TemplateBuilder::new(schema).build_to_buffer();
        assert!(matches!(result, Err(TemplateError::Schema(_))));
    }

    #[test]
    fn test_render_rejects_too_many_columns() {
        let headers: Vec<String> = (0..=crate::schema::MAX_COLUMNS)
            .map(|i| format!("c{}", i))
            .collect();
        let mut sheet = SheetSpec::new("Wide", &[], 10.0);
        sheet.headers = headers;
        let schema = TemplateSchema {
            header_style: HeaderStyle::default(),
            sheets: vec![sheet],
        };
        let result = TemplateBuilder::new(schema).build_to_buffer();
        assert!(matches!(result, Err(TemplateError::Schema(msg)) if msg.contains("16384")));
    }

    #[test]
    fn test_render_rejects_nan_width() {
        let schema = TemplateSchema {
            header_style: HeaderStyle::default(),
            sheets: vec![SheetSpec::new("S", &["a"], f64::NAN)],
        };
        let result = TemplateBuilder::new(schema).build_to_buffer();
        assert!(matches!(result, Err(TemplateError::Schema(_))));
    }

    #[test]
    fn test_column_number() {
        assert_eq!(column_number(0).unwrap(), 0);
        assert_eq!(column_number(16_383).unwrap(), 16_383);
        assert!(column_number(65_536).is_err());
    }
}
