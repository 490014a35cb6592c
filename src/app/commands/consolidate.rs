//! `consolidate`: merge each subject's second survey row into its first.

use std::path::PathBuf;

use crate::adapters::csv_table::{read_table, write_table};
use crate::domain::{AppError, consolidate};

#[derive(Debug, Clone)]
pub struct ConsolidateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub key_field: String,
    pub cutoff_field: String,
    pub delimiter: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidateOutcome {
    pub input_rows: usize,
    pub output_rows: usize,
    pub output: PathBuf,
}

pub fn execute(options: &ConsolidateOptions) -> Result<ConsolidateOutcome, AppError> {
    let table = read_table(&options.input, options.delimiter)?;
    let merged = consolidate(&table, &options.key_field, &options.cutoff_field)?;
    write_table(&options.output, &merged, options.delimiter)?;

    Ok(ConsolidateOutcome {
        input_rows: table.len(),
        output_rows: merged.len(),
        output: options.output.clone(),
    })
}
