//! Batch job lifecycle.
//!
//! A [`BatchJob`] is created by [`BatchJob::prepare`], which fills the
//! template for every record and packs the prompts archive. [`BatchJob::execute`]
//! then sends a selection of those prompts, renders each reply, and rebuilds
//! the responses archive. Executing again discards the previous responses.

use crate::adapters::archive::ArchiveBuilder;
use crate::domain::document::render;
use crate::domain::{
    AppError, CompletionRequest, ExecutionReport, PreparedPrompt, PromptTemplate, ResponseRecord,
    Selection, Table, display_name, label_for,
};
use crate::ports::{CompletionClient, DocumentEncoder, ProgressSink, complete};

/// How records become prompts.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Columns visible to the template. `None` means every column.
    pub columns: Option<Vec<String>>,
    /// Column holding the display name used for labels.
    pub display_field: String,
}

/// Model parameters applied to every request of one execution.
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    pub model: String,
    pub temperature: f64,
}

#[derive(Debug, Clone)]
pub struct BatchJob {
    prompts: Vec<PreparedPrompt>,
    prompts_archive: Vec<u8>,
    responses: Vec<ResponseRecord>,
    responses_archive: Option<Vec<u8>>,
}

impl BatchJob {
    /// Fill `template` for every row of `table`.
    ///
    /// The display name is read from the full row, so the display field
    /// does not need to be among the selected columns.
    pub fn prepare(
        table: &Table,
        template: &PromptTemplate,
        options: &PrepareOptions,
    ) -> Result<Self, AppError> {
        let selected;
        let visible = match &options.columns {
            Some(columns) => {
                selected = table.select(columns)?;
                &selected
            }
            None => table,
        };

        let mut archive = ArchiveBuilder::new();
        let mut prompts = Vec::with_capacity(table.len());
        for (index, (row, visible_row)) in table.rows().iter().zip(visible.rows()).enumerate() {
            let name = display_name(row, &options.display_field, index);
            let label = label_for(&name);
            let prompt = template.render(visible_row);
            let prepared = PreparedPrompt { index, name, label, prompt };

            archive.add(&prepared.prompt_entry_name(), prepared.prompt.as_bytes())?;
            prompts.push(prepared);
        }

        tracing::info!(prompts = prompts.len(), "prompts prepared");
        Ok(Self {
            prompts,
            prompts_archive: archive.finish()?,
            responses: Vec::new(),
            responses_archive: None,
        })
    }

    /// Send the selected prompts one at a time and rebuild the responses.
    ///
    /// A failed completion does not stop the batch. Its description is
    /// rendered into the item's document and the item is counted as failed.
    pub fn execute(
        &mut self,
        selection: &Selection,
        client: &dyn CompletionClient,
        encoder: &dyn DocumentEncoder,
        options: &ExecuteOptions,
        progress: &mut dyn ProgressSink,
    ) -> Result<ExecutionReport, AppError> {
        let positions = selection.resolve(&self.prompts)?;
        self.responses.clear();
        self.responses_archive = None;

        let total = positions.len();
        let mut archive = ArchiveBuilder::new();
        let mut report = ExecutionReport::default();

        for (offset, position) in positions.into_iter().enumerate() {
            let item = &self.prompts[position];
            progress.started(offset + 1, total, item);

            let request = CompletionRequest {
                model: options.model.clone(),
                prompt: item.prompt.clone(),
                temperature: options.temperature,
            };
            let outcome = complete(client, &request);
            if outcome.is_success() {
                report.succeeded += 1;
            } else {
                report.failed += 1;
            }

            let document = render(&outcome.text());
            let bytes = encoder.encode(&document)?;
            archive.add(&item.response_entry_name(encoder.extension()), &bytes)?;
            tracing::debug!(label = %item.label, success = outcome.is_success(), "item processed");

            let response = ResponseRecord {
                index: item.index,
                name: item.name.clone(),
                label: item.label.clone(),
                outcome,
            };
            progress.finished(offset + 1, total, &response);
            self.responses.push(response);
        }

        self.responses_archive = Some(archive.finish()?);
        tracing::info!(succeeded = report.succeeded, failed = report.failed, "batch executed");
        Ok(report)
    }

    pub fn prompts(&self) -> &[PreparedPrompt] {
        &self.prompts
    }

    pub fn prompts_archive(&self) -> &[u8] {
        &self.prompts_archive
    }

    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// Archive from the last execution, if any.
    pub fn responses_archive(&self) -> Option<&[u8]> {
        self.responses_archive.as_deref()
    }
}
