use crate::core::{check_relations, summarize};
use crate::error::{TemplateError, TemplateResult};
use crate::excel::{SheetContents, TemplateBuilder, TemplateReader};
use crate::schema;
use crate::types::{TemplateSchema, TemplateSummary};
use colored::Colorize;
use std::path::PathBuf;

/// Summary lines printed after a successful build
pub fn summary_lines(summary: &TemplateSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "✓ Created {} with {} sheets:",
        summary.output.display(),
        summary.sheets.len()
    )];
    lines.extend(summary.sheets.iter().map(|s| format!("  - {}", s)));
    lines
}

/// Relationship heading plus lines. The "complete" heading is only claimed
/// when every cross-sheet reference resolves.
pub fn relationship_lines(template: &TemplateSchema) -> Vec<String> {
    let relation_lines = summarize(template).lines();
    if relation_lines.is_empty() {
        return relation_lines;
    }

    let broken = check_relations(template).len();
    let heading = if broken == 0 {
        "✓ Sample data demonstrates complete relationships:".to_string()
    } else {
        format!(
            "⚠ Sample data relationships ({} broken reference(s), run `check` for details):",
            broken
        )
    };

    let mut lines = vec![heading];
    lines.extend(relation_lines.into_iter().map(|l| format!("  - {}", l)));
    lines
}

/// Execute the default generate action
pub fn generate(output: PathBuf, schema_path: Option<PathBuf>, verbose: bool) -> TemplateResult<()> {
    if verbose {
        println!("{}", "📖 Loading schema...".cyan());
        match &schema_path {
            Some(p) => println!("   Schema: {}", p.display()),
            None => println!("   Schema: built-in"),
        }
        println!("   Output: {}\n", output.display());
    }

    let template = schema::resolve(schema_path.as_deref())?;
    let relations = relationship_lines(&template);

    if verbose {
        println!("{}", "📊 Writing workbook...".cyan());
    }

    let builder = TemplateBuilder::new(template);
    let summary = builder.build(&output)?;

    let mut lines = summary_lines(&summary).into_iter();
    if let Some(first) = lines.next() {
        println!("{}", first.bold().green());
    }
    for line in lines {
        println!("{}", line);
    }

    let mut relations = relations.into_iter();
    if let Some(heading) = relations.next() {
        if heading.starts_with('✓') {
            println!("\n{}", heading.bold().green());
        } else {
            println!("\n{}", heading.bold().yellow());
        }
        for line in relations {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Print the built-in schema as YAML
pub fn print_schema() -> TemplateResult<()> {
    let yaml = schema::to_yaml(&TemplateSchema::builtin())?;
    print!("{}", yaml);
    Ok(())
}

/// Report sample values that do not resolve across sheets
pub fn check(schema_path: Option<PathBuf>) -> TemplateResult<()> {
    let template = schema::resolve(schema_path.as_deref())?;
    let issues = check_relations(&template);

    if issues.is_empty() {
        println!(
            "{}",
            format!(
                "✅ All cross-sheet references resolve ({} sheets)",
                template.sheets.len()
            )
            .bold()
            .green()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("❌ {} broken reference(s):", issues.len()).bold().red()
    );
    for issue in &issues {
        println!("   {}", issue.to_string().red());
    }

    Err(TemplateError::Relations(issues.len()))
}

/// Lines describing a workbook read back from disk
pub fn inspect_lines(sheets: &[SheetContents]) -> Vec<String> {
    let mut lines = Vec::new();
    for sheet in sheets {
        lines.push(format!(
            "{} ({} columns, {} rows)",
            sheet.name,
            sheet.headers().len(),
            sheet.data_rows().len()
        ));
        lines.push(format!("   {}", sheet.headers().join(", ")));
    }
    lines
}

/// Print the sheets, headers and row counts of an existing workbook
pub fn inspect(file: PathBuf) -> TemplateResult<()> {
    let sheets = TemplateReader::new(&file).read()?;

    println!("{}", format!("📋 {}", file.display()).bold().green());
    println!("   {} sheets\n", sheets.len());
    for line in inspect_lines(&sheets) {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SheetSummary;
    use tempfile::TempDir;

    #[test]
    fn test_summary_lines() {
        let summary = TemplateSummary {
            output: PathBuf::from("import-template.xlsx"),
            sheets: vec![
                SheetSummary {
                    name: "Students".to_string(),
                    columns: 6,
                    sample_rows: 3,
                },
                SheetSummary {
                    name: "Enrollments".to_string(),
                    columns: 5,
                    sample_rows: 4,
                },
            ],
        };
        assert_eq!(
            summary_lines(&summary),
            vec![
                "✓ Created import-template.xlsx with 2 sheets:",
                "  - Students (6 columns, 3 sample rows)",
                "  - Enrollments (5 columns, 4 sample rows)",
            ]
        );
    }

    #[test]
    fn test_generate_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.xlsx");
        generate(output.clone(), None, false).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_generate_missing_schema_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.xlsx");
        let result = generate(output.clone(), Some(temp_dir.path().join("none.yaml")), false);
        assert!(matches!(result, Err(TemplateError::Io(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_relationship_lines_builtin_complete() {
        let lines = relationship_lines(&TemplateSchema::builtin());
        assert_eq!(lines[0], "✓ Sample data demonstrates complete relationships:");
        assert!(lines.contains(&"  - teacher1@example.com teaches CS101".to_string()));
    }

    #[test]
    fn test_relationship_lines_broken_reference() {
        let mut template = TemplateSchema::builtin();
        let classes = template
            .sheets
            .iter_mut()
            .find(|s| s.name == "Classes")
            .unwrap();
        classes.rows[0][2] = "ghost@example.com".into();

        let lines = relationship_lines(&template);
        assert!(lines[0].starts_with("⚠"));
        assert!(lines[0].contains("1 broken reference"));
        assert!(!lines.iter().any(|l| l.contains("complete relationships")));
    }

    #[test]
    fn test_relationship_lines_without_related_sheets() {
        let template = TemplateSchema {
            header_style: Default::default(),
            sheets: vec![crate::types::SheetSpec::new("Rooms", &["room"], 10.0)],
        };
        assert!(relationship_lines(&template).is_empty());
    }

    #[test]
    fn test_check_builtin() {
        assert!(check(None).is_ok());
    }

    #[test]
    fn test_inspect_lines() {
        let sheets = vec![SheetContents {
            name: "Teachers".to_string(),
            rows: vec![
                vec!["email".to_string(), "name".to_string()],
                vec!["t@example.com".to_string(), "T".to_string()],
            ],
        }];
        assert_eq!(
            inspect_lines(&sheets),
            vec!["Teachers (2 columns, 1 rows)", "   email, name"]
        );
    }
}
