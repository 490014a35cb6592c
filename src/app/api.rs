//! API Facade for the application.
//!
//! These functions wire adapters into the commands. The CLI goes through
//! them, and so can library callers.

use std::path::{Path, PathBuf};

use crate::adapters::completion_client::build_client;
use crate::app::commands::{consolidate, init, placeholders, prepare, render, run};
use crate::domain::configuration;
use crate::ports::{CompletionClient, MockCompletionClient, ProgressSink};

pub use crate::app::batch::{BatchJob, ExecuteOptions, PrepareOptions};
pub use crate::app::commands::consolidate::{ConsolidateOptions, ConsolidateOutcome};
pub use crate::app::commands::init::InitOutcome;
pub use crate::app::commands::placeholders::Placeholder;
pub use crate::app::commands::prepare::{BatchInputs, PrepareOutcome};
pub use crate::app::commands::render::{RenderOptions, RenderOutcome};
pub use crate::app::commands::run::{RunOptions, RunResult};
pub use crate::domain::{AppError, DocumentFormat, RunConfig, Selection};

/// Where completions come from.
#[derive(Clone)]
pub enum CompletionBackend {
    /// Offline canned replies.
    Mock,
    /// The configured HTTP endpoint, with retries.
    Http { api_key: String },
}

impl std::fmt::Debug for CompletionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionBackend::Mock => f.write_str("Mock"),
            CompletionBackend::Http { .. } => f.write_str("Http { api_key: [REDACTED] }"),
        }
    }
}

/// Load configuration relative to the current directory.
pub fn load_config(path: Option<&Path>) -> Result<RunConfig, AppError> {
    load_config_at(std::env::current_dir()?, path)
}

pub fn load_config_at(root: impl AsRef<Path>, path: Option<&Path>) -> Result<RunConfig, AppError> {
    configuration::load_config(root.as_ref(), path)
}

/// Write the starter config and template into the current directory.
pub fn init() -> Result<InitOutcome, AppError> {
    init_at(std::env::current_dir()?)
}

pub fn init_at(path: impl Into<PathBuf>) -> Result<InitOutcome, AppError> {
    init::execute(&path.into())
}

// =============================================================================
// Batch API
// =============================================================================

/// Prepare prompts and write the prompts archive into `out_dir`.
pub fn prepare(
    inputs: &BatchInputs,
    config: &RunConfig,
    out_dir: &Path,
) -> Result<PrepareOutcome, AppError> {
    prepare::execute(inputs, &config.batch, out_dir)
}

/// Prepare, execute the selection against `backend`, and write both archives.
pub fn run(
    options: &RunOptions,
    config: &RunConfig,
    backend: CompletionBackend,
    progress: &mut dyn ProgressSink,
) -> Result<RunResult, AppError> {
    let client: Box<dyn CompletionClient> = match backend {
        CompletionBackend::Mock => Box::new(MockCompletionClient),
        CompletionBackend::Http { api_key } => build_client(api_key, &config.completion)?,
    };
    run::execute(options, config, client.as_ref(), progress)
}

// =============================================================================
// Table + Document Utilities
// =============================================================================

pub fn consolidate(options: &ConsolidateOptions) -> Result<ConsolidateOutcome, AppError> {
    consolidate::execute(options)
}

/// Placeholders of a template, checked against a table's columns when given.
pub fn placeholders(
    template: &Path,
    table: Option<(&Path, u8)>,
) -> Result<Vec<Placeholder>, AppError> {
    placeholders::execute(template, table)
}

pub fn render(options: &RenderOptions, config: &RunConfig) -> Result<RenderOutcome, AppError> {
    render::execute(options, config.batch.document_format)
}
