mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use datasim_core::Error as CoreError;
use datasim_generate::{
    DatasetGenerator, GenerationError, GeneratorRegistry, OutputFormat, compile_document,
};
use datasim_plan::{
    PlanError, SchemaDocument, ValidationIssue, ValidationReport, load_document,
    validate_document,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("schema document error: {0}")]
    Plan(#[from] PlanError),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("schema has {0} validation error(s)")]
    InvalidSchema(usize),
}

#[derive(Parser, Debug)]
#[command(name = "datasim", version, about = "Declarative synthetic dataset generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset from a schema document.
    Generate(GenerateArgs),
    /// Check a schema document without generating rows.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Schema document (.toml or .json).
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,
    /// Output file.
    #[arg(long)]
    out: PathBuf,
    /// Output format, overriding the document's.
    #[arg(long)]
    format: Option<String>,
    /// Number of rows, overriding the document's.
    #[arg(long)]
    count: Option<usize>,
    /// Deterministic seed, overriding the document's.
    #[arg(long)]
    seed: Option<u64>,
    /// Append JSON log events to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Print the first N rows as JSON before writing.
    #[arg(long, value_name = "N")]
    preview: Option<usize>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Schema document (.toml or .json).
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        schema,
        out,
        format,
        count,
        seed,
        log_file,
        preview,
    } = args;

    logging::init_logging(log_file.as_deref())?;

    let mut doc = load_document(&schema)?;
    apply_overrides(&mut doc, format, count, seed);
    check_document(&doc)?;

    let schema = compile_document(&doc, &GeneratorRegistry::with_builtins())?;
    let mut generator = DatasetGenerator::new(&schema)?;

    if let Some(n) = preview {
        let head = generator.head(n);
        println!("{}", serde_json::to_string_pretty(head)?);
    }

    let report = generator.write(&out)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    logging::init_logging(None)?;

    let doc = load_document(&args.schema)?;
    check_document(&doc)?;
    let schema = compile_document(&doc, &GeneratorRegistry::with_builtins())?;
    let format: OutputFormat = schema.format().parse()?;

    println!(
        "ok: {} field(s), {} row(s), format {}",
        schema.fields().len(),
        schema.count(),
        format.as_str()
    );
    Ok(())
}

fn apply_overrides(
    doc: &mut SchemaDocument,
    format: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
) {
    if let Some(format) = format {
        doc.format = format;
    }
    if let Some(count) = count {
        doc.count = count;
    }
    if let Some(seed) = seed {
        doc.seed = Some(seed);
    }
}

fn check_document(doc: &SchemaDocument) -> Result<(), CliError> {
    let report = validate_document(doc);
    log_report(&report);
    if report.is_ok() {
        info!(
            fields = doc.fields.len(),
            warnings = report.warnings.len(),
            "schema validated"
        );
        Ok(())
    } else {
        Err(CliError::InvalidSchema(report.errors.len()))
    }
}

fn log_report(report: &ValidationReport) {
    for issue in &report.warnings {
        warn!(code = %issue.code, path = %issue.path, "{}", describe(issue));
    }
    for issue in &report.errors {
        eprintln!("{}: {} ({})", issue.code, describe(issue), issue.path);
    }
}

fn describe(issue: &ValidationIssue) -> String {
    match &issue.hint {
        Some(hint) => format!("{}; {hint}", issue.message),
        None => issue.message.clone(),
    }
}
