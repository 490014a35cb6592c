//! `run`: prepare, execute a selection, and write both archives.

use std::path::PathBuf;

use crate::adapters::documents::encoder_for;
use crate::app::batch::ExecuteOptions;
use crate::app::commands::prepare::{BatchInputs, write_output};
use crate::domain::{AppError, ExecutionReport, ResponseRecord, RunConfig, Selection};
use crate::ports::{CompletionClient, ProgressSink};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub inputs: BatchInputs,
    pub selection: Selection,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub prompts_archive: PathBuf,
    pub responses_archive: PathBuf,
    pub report: ExecutionReport,
    pub responses: Vec<ResponseRecord>,
}

pub fn execute(
    options: &RunOptions,
    config: &RunConfig,
    client: &dyn CompletionClient,
    progress: &mut dyn ProgressSink,
) -> Result<RunResult, AppError> {
    let mut job = options.inputs.load(&config.batch)?;
    let prompts_archive =
        write_output(&options.out_dir, &config.batch.prompts_archive, job.prompts_archive())?;

    let encoder = encoder_for(config.batch.document_format);
    let execute_options = ExecuteOptions {
        model: config.completion.model.clone(),
        temperature: config.completion.temperature,
    };
    let report =
        job.execute(&options.selection, client, encoder.as_ref(), &execute_options, progress)?;

    let responses_bytes = job.responses_archive().unwrap_or_default();
    let responses_archive =
        write_output(&options.out_dir, &config.batch.responses_archive, responses_bytes)?;

    Ok(RunResult {
        prompts_archive,
        responses_archive,
        report,
        responses: job.responses().to_vec(),
    })
}
