use clap::{Parser, Subcommand};
use import_template::cli;
use import_template::error::TemplateResult;
use import_template::schema::DEFAULT_OUTPUT;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "import-template")]
#[command(about = "Generate the Excel import template (Students, Teachers, Courses, Classes, Enrollments)")]
#[command(long_about = "Generate the Excel import template for bulk imports.

With no arguments, writes import-template.xlsx to the current directory:
five sheets with a styled header row and sample rows.

COMMANDS:
  schema   - Print the built-in schema as YAML
  check    - Verify cross-sheet references in the sample rows
  inspect  - Show sheets, headers and row counts of a workbook

EXAMPLES:
  import-template                              # Write import-template.xlsx
  import-template -o out/template.xlsx         # Custom output path
  import-template schema > template.yaml       # Dump schema for editing
  import-template --schema template.yaml       # Build from an edited schema
  import-template check --schema template.yaml

Set RUST_LOG=debug for build diagnostics on stderr.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output Excel file path (.xlsx)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// YAML schema to build instead of the built-in one
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Show verbose build steps
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built-in schema as YAML
    Schema,

    /// Verify cross-sheet references in the sample rows
    Check {
        /// YAML schema to check instead of the built-in one
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },

    /// Show sheets, headers and row counts of a workbook
    Inspect {
        /// Path to Excel file (.xlsx)
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "import_template=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> TemplateResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        None => cli::generate(cli.output, cli.schema, cli.verbose),
        Some(Commands::Schema) => cli::print_schema(),
        Some(Commands::Check { schema }) => cli::check(schema),
        Some(Commands::Inspect { file }) => cli::inspect(file),
    }
}
