//! Template schema: the built-in five-sheet layout and YAML schema files
//!
//! The schema is plain data. Rendering lives in [`crate::excel`].

use crate::error::{TemplateError, TemplateResult};
use crate::types::{CellValue, HeaderStyle, SheetSpec, TemplateSchema};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "import-template.xlsx";

/// Sheet names in the order the importer expects them
pub const SHEET_ORDER: [&str; 5] = ["Students", "Teachers", "Courses", "Classes", "Enrollments"];

/// Enrollment status values accepted by the importer
pub const ENROLLMENT_STATUSES: [&str; 2] = ["ENROLLED", "PENDING"];

/// Excel's limit on worksheet name length
const MAX_SHEET_NAME_LEN: usize = 31;

/// Excel's worksheet column limit
pub const MAX_COLUMNS: usize = 16_384;

/// Excel's worksheet row limit, header row excluded
pub const MAX_DATA_ROWS: usize = 1_048_575;

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn row(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::from(*v)).collect()
}

impl TemplateSchema {
    /// The import template shipped with the platform
    pub fn builtin() -> Self {
        let students = SheetSpec::new(
            "Students",
            &["email", "name", "phoneNumber", "studentCode", "major", "cohort"],
            22.0,
        )
        .with_row(row(&[
            "student1@example.com",
            "John Doe",
            "+84901234567",
            "ST001",
            "Computer Science",
            "K2024",
        ]))
        .with_row(row(&[
            "student2@example.com",
            "Jane Smith",
            "+84907654321",
            "ST002",
            "Software Engineering",
            "K2024",
        ]))
        .with_row(row(&[
            "student3@example.com",
            "Mike Johnson",
            "+84903456789",
            "ST003",
            "Data Science",
            "K2024",
        ]));

        let teachers = SheetSpec::new(
            "Teachers",
            &["email", "name", "phoneNumber", "teacherCode", "specialization", "department"],
            22.0,
        )
        .with_row(row(&[
            "teacher1@example.com",
            "Dr. Alice Johnson",
            "+84909876543",
            "TC001",
            "Machine Learning",
            "Computer Science",
        ]))
        .with_row(row(&[
            "teacher2@example.com",
            "Prof. Bob Wilson",
            "+84905432198",
            "TC002",
            "Web Development",
            "Software Engineering",
        ]));

        let courses = SheetSpec::new(
            "Courses",
            &[
                "courseCode",
                "courseName",
                "description",
                "duration",
                "durationInSessions",
                "level",
                "price",
            ],
            24.0,
        )
        .with_row(vec![
            "CS101".into(),
            "Introduction to Programming".into(),
            "Basic programming concepts using Python".into(),
            12.into(),
            24.into(),
            "BEGINNER".into(),
            5_000_000.into(),
        ])
        .with_row(vec![
            "CS201".into(),
            "Advanced Data Structures".into(),
            "In-depth study of data structures and algorithms".into(),
            16.into(),
            32.into(),
            "INTERMEDIATE".into(),
            7_500_000.into(),
        ]);

        let classes = SheetSpec::new(
            "Classes",
            &[
                "courseCode",
                "className",
                "teacherEmail",
                "schedule",
                "room",
                "startTime",
                "durationPerSession",
                "capacity",
                "startDate",
                "endDate",
                "enrollKey",
            ],
            20.0,
        )
        .with_row(vec![
            "CS101".into(),
            "CS101-01-2024".into(),
            "teacher1@example.com".into(),
            "Mon,Wed,Fri".into(),
            "A101".into(),
            "09:00".into(),
            90.into(),
            30.into(),
            "2024-09-01".into(),
            "2024-12-15".into(),
            "ENROLL2024CS101".into(),
        ])
        .with_row(vec![
            "CS201".into(),
            "CS201-01-2024".into(),
            "teacher2@example.com".into(),
            "Tue,Thu".into(),
            "B201".into(),
            "14:00".into(),
            120.into(),
            25.into(),
            "2024-09-01".into(),
            "2024-12-20".into(),
            "ENROLL2024CS201".into(),
        ]);

        // PENDING: waiting for the student to confirm with the enroll key
        let enrollments = SheetSpec::new(
            "Enrollments",
            &["studentEmail", "courseCode_className", "status", "enrolledAt", "completedAt"],
            26.0,
        )
        .with_row(row(&[
            "student1@example.com",
            "CS101_CS101-01-2024",
            "ENROLLED",
            "2024-09-01T08:00:00Z",
            "",
        ]))
        .with_row(row(&[
            "student2@example.com",
            "CS101_CS101-01-2024",
            "ENROLLED",
            "2024-09-01T08:30:00Z",
            "",
        ]))
        .with_row(row(&[
            "student2@example.com",
            "CS201_CS201-01-2024",
            "PENDING",
            "2024-09-01T09:00:00Z",
            "",
        ]))
        .with_row(row(&[
            "student3@example.com",
            "CS201_CS201-01-2024",
            "PENDING",
            "2024-09-01T09:30:00Z",
            "",
        ]));

        Self {
            header_style: HeaderStyle::default(),
            sheets: vec![students, teachers, courses, classes, enrollments],
        }
    }

    /// Structural checks for schemas loaded from disk
    pub fn validate(&self) -> TemplateResult<()> {
        if self.sheets.is_empty() {
            return Err(TemplateError::Schema("schema defines no sheets".to_string()));
        }

        parse_color(&self.header_style.font_color)?;
        parse_color(&self.header_style.fill_color)?;
        if !is_positive(self.header_style.font_size) {
            return Err(TemplateError::Schema(format!(
                "font_size must be positive, got {}",
                self.header_style.font_size
            )));
        }

        let mut seen = HashSet::new();
        for sheet in &self.sheets {
            validate_sheet_name(&sheet.name)?;
            if !seen.insert(sheet.name.to_lowercase()) {
                return Err(TemplateError::Schema(format!(
                    "duplicate sheet name '{}'",
                    sheet.name
                )));
            }
            if sheet.headers.is_empty() {
                return Err(TemplateError::Schema(format!(
                    "sheet '{}' has no headers",
                    sheet.name
                )));
            }
            if sheet.headers.len() > MAX_COLUMNS {
                return Err(TemplateError::Schema(format!(
                    "sheet '{}' has {} headers, Excel allows {}",
                    sheet.name,
                    sheet.headers.len(),
                    MAX_COLUMNS
                )));
            }
            if sheet.rows.len() > MAX_DATA_ROWS {
                return Err(TemplateError::Schema(format!(
                    "sheet '{}' has {} rows, Excel allows {}",
                    sheet.name,
                    sheet.rows.len(),
                    MAX_DATA_ROWS
                )));
            }
            if !is_positive(sheet.column_width) {
                return Err(TemplateError::Schema(format!(
                    "sheet '{}' has non-positive column width {}",
                    sheet.name, sheet.column_width
                )));
            }
            for (idx, row) in sheet.rows.iter().enumerate() {
                if let Some(col) = row
                    .iter()
                    .position(|v| matches!(v, CellValue::Decimal(n) if !n.is_finite()))
                {
                    return Err(TemplateError::Schema(format!(
                        "sheet '{}' row {} column '{}' is not a finite number",
                        sheet.name,
                        idx + 1,
                        sheet.headers.get(col).map(String::as_str).unwrap_or("?")
                    )));
                }
                if row.len() > sheet.headers.len() {
                    return Err(TemplateError::Schema(format!(
                        "sheet '{}' row {} has {} values for {} headers",
                        sheet.name,
                        idx + 1,
                        row.len(),
                        sheet.headers.len()
                    )));
                }
            }
        }

        Ok(())
    }
}

fn validate_sheet_name(name: &str) -> TemplateResult<()> {
    if name.trim().is_empty() {
        return Err(TemplateError::Schema("sheet name is empty".to_string()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(TemplateError::Schema(format!(
            "sheet name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(TemplateError::Schema(format!(
            "sheet name '{}' contains invalid character '{}'",
            name, c
        )));
    }
    Ok(())
}

/// Parse an RGB hex colour ("4472C4" or "#4472C4")
pub fn parse_color(hex: &str) -> TemplateResult<u32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TemplateError::Schema(format!("invalid colour '{}'", hex)));
    }
    u32::from_str_radix(digits, 16)
        .map_err(|_| TemplateError::Schema(format!("invalid colour '{}'", hex)))
}

/// Load and validate a YAML schema file
pub fn load(path: &Path) -> TemplateResult<TemplateSchema> {
    debug!(path = %path.display(), "loading schema");
    let content = fs::read_to_string(path)?;
    let schema: TemplateSchema = serde_yaml::from_str(&content)?;
    schema.validate()?;
    debug!(sheets = schema.sheets.len(), "schema loaded");
    Ok(schema)
}

/// Serialize a schema to YAML
pub fn to_yaml(schema: &TemplateSchema) -> TemplateResult<String> {
    Ok(serde_yaml::to_string(schema)?)
}

/// The schema at `path`, or the built-in one
pub fn resolve(path: Option<&Path>) -> TemplateResult<TemplateSchema> {
    match path {
        Some(p) => load(p),
        None => Ok(TemplateSchema::builtin()),
    }
}
