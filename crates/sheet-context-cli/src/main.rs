use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use sheet_context_core::{ProcessorConfig, PromptTemplate, SheetProcessor};
use tracing_subscriber::EnvFilter;

const CLI_CONTRACT_VERSION: &str = "cli.v1";

#[derive(Debug, Parser)]
#[command(name = "sheetctx")]
#[command(about = "Summarize, search and build model context from a spreadsheet")]
struct Cli {
    /// Spreadsheet to load (xlsx, xlsm, xlsb, xls, ods)
    #[arg(long)]
    file: PathBuf,

    /// YAML processor configuration
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Summary,
    Sheets,
    Search(SearchArgs),
    Context,
    Prompt(PromptArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    query: String,
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Debug, Args)]
struct PromptArgs {
    question: String,
    #[arg(long, default_value_t = false)]
    voice: bool,
}

#[derive(Debug, Serialize)]
struct SheetInfo<'a> {
    name: &'a str,
    rows: usize,
    columns: usize,
    headers: &'a [String],
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match cli.config.as_ref() {
        Some(path) => ProcessorConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ProcessorConfig::default(),
    };
    let processor = SheetProcessor::new(config);
    processor
        .ingest_path(&cli.file)
        .await
        .with_context(|| format!("failed to load spreadsheet {}", cli.file.display()))?;

    tracing::debug!("Running {:?}", cli.command);
    match cli.command {
        Command::Summary => {
            print!("{}", processor.summarize(None));
            Ok(())
        }
        Command::Sheets => run_sheets(&processor),
        Command::Search(args) => run_search(&args, &processor),
        Command::Context => {
            print!("{}", processor.format_for_model(None));
            Ok(())
        }
        Command::Prompt(args) => {
            let template = if args.voice { PromptTemplate::Voice } else { PromptTemplate::Analyst };
            println!("{}", processor.prompt_for(template, &args.question));
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn with_contract_version(value: Value) -> Value {
    match value {
        Value::Object(mut object) => {
            object.insert(
                "contract_version".to_string(),
                Value::String(CLI_CONTRACT_VERSION.to_string()),
            );
            Value::Object(object)
        }
        other => serde_json::json!({
            "contract_version": CLI_CONTRACT_VERSION,
            "payload": other
        }),
    }
}

fn emit_json(value: Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&with_contract_version(value))?);
    Ok(())
}

fn run_sheets(processor: &SheetProcessor) -> Result<()> {
    let sheets = processor.all_sheets();
    let infos = sheets
        .iter()
        .map(|sheet| SheetInfo {
            name: sheet.name(),
            rows: sheet.row_count(),
            columns: sheet.column_count(),
            headers: sheet.headers(),
        })
        .collect::<Vec<_>>();
    emit_json(serde_json::to_value(infos)?)
}

fn run_search(args: &SearchArgs, processor: &SheetProcessor) -> Result<()> {
    let mut results = processor.search(&args.query, None);
    let total = results.len();
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }
    emit_json(serde_json::json!({
        "query": args.query,
        "total": total,
        "results": results
    }))
}
