//! CLI Adapter.

mod batch;
mod logging;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::adapters::csv_table::parse_delimiter;
use crate::app::api::{self, ConsolidateOptions, RenderOptions};
use crate::domain::{AppError, DocumentFormat, RunConfig};

#[derive(Parser)]
#[command(name = "rpt")]
#[command(version)]
#[command(about = "Batch-generate personalized reports from tabular records", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Config file (default: ./rpt.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter rpt.toml and prompt template
    #[clap(visible_alias = "i")]
    Init,
    /// Fill the template for every record and write the prompts archive
    #[clap(visible_alias = "p")]
    Prepare {
        #[command(flatten)]
        batch: batch::BatchArgs,
    },
    /// Prepare, generate every report, and write both archives
    #[clap(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: batch::RunArgs,
    },
    /// Merge each subject's second row into its first
    #[clap(visible_alias = "c")]
    Consolidate {
        /// Raw CSV export
        #[arg(long)]
        input: PathBuf,
        /// Consolidated CSV to write
        #[arg(long)]
        output: PathBuf,
        /// Column identifying a subject
        #[arg(long)]
        key_field: Option<String>,
        /// First column copied from the second row
        #[arg(long)]
        cutoff_field: Option<String>,
        /// CSV delimiter: one character or `tab`
        #[arg(long, default_value = ",")]
        delimiter: String,
    },
    /// List template placeholders
    Placeholders {
        #[arg(long)]
        template: PathBuf,
        /// Mark placeholders that have no matching column
        #[arg(long)]
        table: Option<PathBuf>,
        /// CSV delimiter: one character or `tab`
        #[arg(long, default_value = ",")]
        delimiter: String,
    },
    /// Convert one markdown file into a document
    Render {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// docx or md (default: from the output extension)
        #[arg(long)]
        format: Option<String>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match dispatch(cli) {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn dispatch(cli: Cli) -> Result<i32, AppError> {
    let Cli { config, command, .. } = cli;
    let load = || api::load_config(config.as_deref());

    match command {
        Commands::Init => run_init().map(|_| 0),
        Commands::Prepare { batch } => batch::run_prepare(load()?, batch).map(|_| 0),
        Commands::Run { args } => batch::run_batch(load()?, args),
        Commands::Consolidate { input, output, key_field, cutoff_field, delimiter } => {
            let config = load()?;
            let options = ConsolidateOptions {
                input,
                output,
                key_field: key_field.unwrap_or(config.consolidate.key_field),
                cutoff_field: cutoff_field.unwrap_or(config.consolidate.cutoff_field),
                delimiter: parse_delimiter(&delimiter)?,
            };
            run_consolidate(&options).map(|_| 0)
        }
        Commands::Placeholders { template, table, delimiter } => {
            run_placeholders(template, table, &delimiter).map(|_| 0)
        }
        Commands::Render { input, output, format } => {
            run_render(&load()?, input, output, format).map(|_| 0)
        }
    }
}

fn run_init() -> Result<(), AppError> {
    let outcome = api::init()?;
    for path in &outcome.created {
        println!("✅ Created {}", path.display());
    }
    Ok(())
}

fn run_consolidate(options: &ConsolidateOptions) -> Result<(), AppError> {
    let outcome = api::consolidate(options)?;
    println!(
        "✅ Consolidated {} row(s) into {} record(s) at {}",
        outcome.input_rows,
        outcome.output_rows,
        outcome.output.display()
    );
    Ok(())
}

fn run_placeholders(
    template: PathBuf,
    table: Option<PathBuf>,
    delimiter: &str,
) -> Result<(), AppError> {
    let delimiter = parse_delimiter(delimiter)?;
    let found = api::placeholders(&template, table.as_deref().map(|path| (path, delimiter)))?;

    if found.is_empty() {
        println!("No placeholders found");
        return Ok(());
    }
    for placeholder in found {
        match placeholder.in_table {
            Some(false) => println!("{} (not in table, will be empty)", placeholder.name),
            _ => println!("{}", placeholder.name),
        }
    }
    Ok(())
}

fn run_render(
    config: &RunConfig,
    input: PathBuf,
    output: PathBuf,
    format: Option<String>,
) -> Result<(), AppError> {
    let format = format.as_deref().map(DocumentFormat::parse).transpose()?;
    let outcome = api::render(&RenderOptions { input, output, format }, config)?;
    println!("✅ Rendered {} block(s) into {}", outcome.blocks, outcome.output.display());
    Ok(())
}
