//! Cross-sheet relationships between the template's sample rows
//!
//! Checked on demand only; the builder never enforces them.

use crate::schema::ENROLLMENT_STATUSES;
use crate::types::TemplateSchema;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Build the `{courseCode}_{className}` key Enrollments uses to name a class
pub fn class_key(course_code: &str, class_name: &str) -> String {
    format!("{}_{}", course_code, class_name)
}

/// A sample value that does not resolve against its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationIssue {
    pub sheet: String,
    /// 1-based, header excluded
    pub row: usize,
    pub column: String,
    pub value: String,
    /// e.g. "Teachers.email"
    pub expected: String,
}

impl fmt::Display for RelationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row {} {}: '{}' not found in {}",
            self.sheet, self.row, self.column, self.value, self.expected
        )
    }
}

/// A foreign-key style reference from one sheet column to another
struct Reference {
    sheet: &'static str,
    column: &'static str,
    target_sheet: &'static str,
    target_column: &'static str,
}

const REFERENCES: [Reference; 3] = [
    Reference {
        sheet: "Classes",
        column: "courseCode",
        target_sheet: "Courses",
        target_column: "courseCode",
    },
    Reference {
        sheet: "Classes",
        column: "teacherEmail",
        target_sheet: "Teachers",
        target_column: "email",
    },
    Reference {
        sheet: "Enrollments",
        column: "studentEmail",
        target_sheet: "Students",
        target_column: "email",
    },
];

/// Check every documented relationship. Missing sheets or columns skip
/// the checks that need them.
pub fn check_relations(schema: &TemplateSchema) -> Vec<RelationIssue> {
    let mut issues = Vec::new();

    for reference in &REFERENCES {
        let Some(targets) = schema
            .sheet(reference.target_sheet)
            .and_then(|s| s.column_values(reference.target_column))
        else {
            continue;
        };
        let targets: HashSet<String> = targets.into_iter().collect();
        let expected = format!("{}.{}", reference.target_sheet, reference.target_column);
        collect_unresolved(
            schema,
            reference.sheet,
            reference.column,
            &targets,
            &expected,
            &mut issues,
        );
    }

    if let Some(keys) = class_keys(schema) {
        let keys: HashSet<String> = keys.into_iter().collect();
        collect_unresolved(
            schema,
            "Enrollments",
            "courseCode_className",
            &keys,
            "Classes (courseCode_className)",
            &mut issues,
        );
    }

    let statuses: HashSet<String> = ENROLLMENT_STATUSES.iter().map(|s| s.to_string()).collect();
    collect_unresolved(
        schema,
        "Enrollments",
        "status",
        &statuses,
        &ENROLLMENT_STATUSES.join("|"),
        &mut issues,
    );

    issues
}

fn collect_unresolved(
    schema: &TemplateSchema,
    sheet: &str,
    column: &str,
    allowed: &HashSet<String>,
    expected: &str,
    issues: &mut Vec<RelationIssue>,
) {
    let Some(values) = schema.sheet(sheet).and_then(|s| s.column_values(column)) else {
        return;
    };

    for (idx, value) in values.into_iter().enumerate() {
        if !allowed.contains(&value) {
            issues.push(RelationIssue {
                sheet: sheet.to_string(),
                row: idx + 1,
                column: column.to_string(),
                value,
                expected: expected.to_string(),
            });
        }
    }
}

/// Every class key defined by the Classes sheet
fn class_keys(schema: &TemplateSchema) -> Option<Vec<String>> {
    let classes = schema.sheet("Classes")?;
    let codes = classes.column_values("courseCode")?;
    let names = classes.column_values("className")?;
    Some(
        codes
            .iter()
            .zip(names.iter())
            .map(|(code, name)| class_key(code, name))
            .collect(),
    )
}

/// Who is enrolled where, and who teaches what
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSummary {
    /// class key -> student emails, in sample order
    pub class_students: BTreeMap<String, Vec<String>>,
    /// student email -> class keys, in sample order
    pub student_classes: BTreeMap<String, Vec<String>>,
    /// teacher email -> course codes
    pub teacher_courses: BTreeMap<String, Vec<String>>,
}

impl RelationSummary {
    /// Human-readable lines for the CLI summary
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for (class, students) in &self.class_students {
            lines.push(format!(
                "{} class: {} students ({})",
                class,
                students.len(),
                students.join(", ")
            ));
        }
        for (student, classes) in &self.student_classes {
            if classes.len() > 1 {
                lines.push(format!("{} enrolled in {} classes", student, classes.len()));
            }
        }
        for (teacher, courses) in &self.teacher_courses {
            lines.push(format!("{} teaches {}", teacher, courses.join(", ")));
        }

        lines
    }
}

/// Summarize the relationships the sample rows demonstrate
pub fn summarize(schema: &TemplateSchema) -> RelationSummary {
    let mut summary = RelationSummary::default();

    if let Some(enrollments) = schema.sheet("Enrollments") {
        if let (Some(students), Some(classes)) = (
            enrollments.column_values("studentEmail"),
            enrollments.column_values("courseCode_className"),
        ) {
            for (student, class) in students.into_iter().zip(classes) {
                summary
                    .class_students
                    .entry(class.clone())
                    .or_default()
                    .push(student.clone());
                summary
                    .student_classes
                    .entry(student)
                    .or_default()
                    .push(class);
            }
        }
    }

    if let Some(classes) = schema.sheet("Classes") {
        if let (Some(teachers), Some(codes)) = (
            classes.column_values("teacherEmail"),
            classes.column_values("courseCode"),
        ) {
            for (teacher, code) in teachers.into_iter().zip(codes) {
                let courses = summary.teacher_courses.entry(teacher).or_default();
                if !courses.contains(&code) {
                    courses.push(code);
                }
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_key() {
        assert_eq!(class_key("CS101", "CS101-01-2024"), "CS101_CS101-01-2024");
    }

    #[test]
    fn test_issue_display() {
        let issue = RelationIssue {
            sheet: "Classes".to_string(),
            row: 2,
            column: "teacherEmail".to_string(),
            value: "nobody@example.com".to_string(),
            expected: "Teachers.email".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "Classes row 2 teacherEmail: 'nobody@example.com' not found in Teachers.email"
        );
    }

    #[test]
    fn test_summary_lines_skip_single_class_students() {
        let mut summary = RelationSummary::default();
        summary
            .student_classes
            .insert("a@example.com".to_string(), vec!["X_1".to_string()]);
        assert!(summary.lines().is_empty());
    }

    #[test]
    fn test_empty_schema_has_no_issues() {
        let schema = TemplateSchema {
            header_style: Default::default(),
            sheets: vec![],
        };
        assert!(check_relations(&schema).is_empty());
        assert_eq!(summarize(&schema), RelationSummary::default());
    }
}
