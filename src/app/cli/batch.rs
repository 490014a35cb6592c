//! `prepare` and `run` subcommands.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::Args;
use dialoguer::Password;

use crate::adapters::csv_table::parse_delimiter;
use crate::app::api::{self, BatchInputs, CompletionBackend, RunOptions};
use crate::domain::{
    AppError, CompletionConfig, DocumentFormat, PreparedPrompt, ResponseRecord, RunConfig,
    Selection,
};
use crate::ports::ProgressSink;

/// Exit code when `--fail-on-error` is set and an item failed.
const EXIT_ITEM_FAILURES: i32 = 2;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// CSV table with a header row
    #[arg(long)]
    table: PathBuf,
    /// Prompt template with {{column}} placeholders
    #[arg(long)]
    template: PathBuf,
    /// Columns visible to the template (comma-separated; default all)
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,
    /// Column used to name each record
    #[arg(long)]
    display_field: Option<String>,
    /// CSV delimiter: one character or `tab`
    #[arg(long, default_value = ",")]
    delimiter: String,
    /// Directory for the output archives
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

impl BatchArgs {
    fn inputs(&self) -> Result<BatchInputs, AppError> {
        Ok(BatchInputs {
            table: self.table.clone(),
            template: self.template.clone(),
            columns: self.columns.clone(),
            delimiter: parse_delimiter(&self.delimiter)?,
        })
    }

    fn apply(&self, config: &mut RunConfig) {
        if let Some(field) = &self.display_field {
            config.batch.display_field = field.clone();
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    batch: BatchArgs,
    /// Only process records with this label (repeatable)
    #[arg(long = "only", value_name = "LABEL", conflicts_with = "first")]
    only: Vec<String>,
    /// Only process the first N records
    #[arg(long, value_name = "N")]
    first: Option<usize>,
    /// Model name sent to the completion endpoint
    #[arg(long)]
    model: Option<String>,
    /// Response document format: docx or md
    #[arg(long)]
    format: Option<String>,
    /// Use offline canned replies instead of the endpoint
    #[arg(long)]
    mock: bool,
    /// Exit with status 2 when any item failed
    #[arg(long)]
    fail_on_error: bool,
}

impl RunArgs {
    fn selection(&self) -> Selection {
        if !self.only.is_empty() {
            Selection::Labels(self.only.clone())
        } else if let Some(count) = self.first {
            Selection::First(count)
        } else {
            Selection::All
        }
    }
}

pub fn run_prepare(mut config: RunConfig, args: BatchArgs) -> Result<(), AppError> {
    args.apply(&mut config);
    config.validate()?;

    let outcome = api::prepare(&args.inputs()?, &config, &args.out_dir)?;
    println!("✅ Prepared {} prompt(s) into {}", outcome.prompts, outcome.archive.display());
    Ok(())
}

pub fn run_batch(mut config: RunConfig, args: RunArgs) -> Result<i32, AppError> {
    args.batch.apply(&mut config);
    if let Some(model) = &args.model {
        config.completion.model = model.clone();
    }
    if let Some(format) = &args.format {
        config.batch.document_format = DocumentFormat::parse(format)?;
    }
    config.validate()?;

    let backend = if args.mock {
        CompletionBackend::Mock
    } else {
        CompletionBackend::Http { api_key: resolve_api_key(&config.completion)? }
    };

    let options = RunOptions {
        inputs: args.batch.inputs()?,
        selection: args.selection(),
        out_dir: args.batch.out_dir.clone(),
    };
    let result = api::run(&options, &config, backend, &mut ConsoleProgress)?;

    println!(
        "✅ Processed {} record(s): {} succeeded, {} failed",
        result.report.total(),
        result.report.succeeded,
        result.report.failed
    );
    println!("  Prompts: {}", result.prompts_archive.display());
    println!("  Responses: {}", result.responses_archive.display());

    if args.fail_on_error && result.report.has_failures() {
        return Ok(EXIT_ITEM_FAILURES);
    }
    Ok(0)
}

/// Read the API key from the configured variable, or ask for it on a terminal.
fn resolve_api_key(config: &CompletionConfig) -> Result<String, AppError> {
    if let Ok(key) = std::env::var(&config.api_key_env)
        && !key.trim().is_empty()
    {
        return Ok(key);
    }

    if !std::io::stdin().is_terminal() {
        return Err(AppError::EnvironmentVariableMissing(config.api_key_env.clone()));
    }

    Password::new()
        .with_prompt(format!("{} is not set. API key", config.api_key_env))
        .interact()
        .map_err(|err| AppError::Validation(format!("Failed to read API key: {}", err)))
}

/// Prints one line per started item and its result.
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn started(&mut self, position: usize, total: usize, item: &PreparedPrompt) {
        print!("[{}/{}] {}... ", position, total, item.name);
        let _ = std::io::stdout().flush();
    }

    fn finished(&mut self, _position: usize, _total: usize, response: &ResponseRecord) {
        match response.outcome.failure() {
            None => println!("✅"),
            Some(error) => println!("❌ {}", summarize(&error.to_string())),
        }
    }
}

/// First line of `message`, cut to a console-friendly width.
fn summarize(message: &str) -> String {
    const MAX_CHARS: usize = 160;
    let line = message.lines().next().unwrap_or_default();
    if line.chars().count() <= MAX_CHARS {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(MAX_CHARS).collect();
    cut.push_str("...");
    cut
}
