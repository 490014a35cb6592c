//! `prepare`: fill the template for every record and write the prompts archive.

use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::csv_table::read_table;
use crate::app::batch::{BatchJob, PrepareOptions};
use crate::domain::{AppError, BatchConfig, PromptTemplate};

/// Table and template files feeding a batch.
#[derive(Debug, Clone)]
pub struct BatchInputs {
    pub table: PathBuf,
    pub template: PathBuf,
    /// Columns visible to the template; `None` means all.
    pub columns: Option<Vec<String>>,
    pub delimiter: u8,
}

impl BatchInputs {
    /// Read both files and prepare the job.
    pub fn load(&self, batch: &BatchConfig) -> Result<BatchJob, AppError> {
        let template = read_template(&self.template)?;
        let table = read_table(&self.table, self.delimiter)?;
        let options = PrepareOptions {
            columns: self.columns.clone(),
            display_field: batch.display_field.clone(),
        };
        BatchJob::prepare(&table, &template, &options)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareOutcome {
    pub prompts: usize,
    pub archive: PathBuf,
}

pub fn execute(
    inputs: &BatchInputs,
    batch: &BatchConfig,
    out_dir: &Path,
) -> Result<PrepareOutcome, AppError> {
    let job = inputs.load(batch)?;
    let archive = write_output(out_dir, &batch.prompts_archive, job.prompts_archive())?;
    Ok(PrepareOutcome { prompts: job.prompts().len(), archive })
}

pub(crate) fn read_template(path: &Path) -> Result<PromptTemplate, AppError> {
    let source = fs::read_to_string(path).map_err(|err| {
        AppError::Validation(format!("Failed to read template {}: {}", path.display(), err))
    })?;
    Ok(PromptTemplate::new(source))
}

/// Write `bytes` to `out_dir/name`, creating the directory when needed.
pub(crate) fn write_output(out_dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(name);
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "archive written");
    Ok(path)
}
