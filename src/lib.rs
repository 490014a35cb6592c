//! rpt: batch-generate personalized reports from tabular records.
//!
//! Records are read from CSV, substituted into a `{{placeholder}}` prompt
//! template, sent to a chat-completions endpoint, and the markdown replies
//! are rendered into `.docx` (or normalized `.md`) documents packed into ZIP
//! archives. A separate flow consolidates multi-row survey exports into one
//! row per subject.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    BatchInputs, BatchJob, CompletionBackend, ConsolidateOptions, ConsolidateOutcome,
    ExecuteOptions, InitOutcome, Placeholder, PrepareOptions, PrepareOutcome, RenderOptions,
    RenderOutcome, RunOptions, RunResult, consolidate, init, init_at, load_config, load_config_at,
    placeholders, prepare, render, run,
};
pub use domain::{
    AppError, CompletionError, CompletionOutcome, DocumentFormat, Record, RunConfig, Selection,
    Table,
};
