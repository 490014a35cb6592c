//! Batch item types and record selection.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{AppError, CompletionOutcome};

/// A record's filled prompt, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedPrompt {
    /// Zero-based row position in the input table.
    pub index: usize,
    /// Display name taken from the record.
    pub name: String,
    /// Filesystem-safe label derived from `name`.
    pub label: String,
    pub prompt: String,
}

impl PreparedPrompt {
    pub fn prompt_entry_name(&self) -> String {
        format!("{}_prompt.txt", self.label)
    }

    pub fn response_entry_name(&self, extension: &str) -> String {
        format!("RESPOSTA_{}.{}", self.label, extension)
    }
}

/// A processed item kept for display after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    pub index: usize,
    pub name: String,
    pub label: String,
    pub outcome: CompletionOutcome,
}

/// Which prepared prompts to execute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    /// Every prompt whose label is listed.
    Labels(Vec<String>),
    /// Prompts by zero-based row index.
    Indices(Vec<usize>),
    /// The first `n` prompts.
    First(usize),
}

impl Selection {
    /// Positions into `prompts`, in prepared order.
    pub fn resolve(&self, prompts: &[PreparedPrompt]) -> Result<Vec<usize>, AppError> {
        match self {
            Selection::All => Ok((0..prompts.len()).collect()),
            Selection::First(count) => Ok((0..prompts.len().min(*count)).collect()),
            Selection::Labels(labels) => {
                if let Some(unknown) =
                    labels.iter().find(|label| !prompts.iter().any(|p| &p.label == *label))
                {
                    return Err(AppError::RecordNotFound(unknown.clone()));
                }
                let wanted: HashSet<&str> = labels.iter().map(String::as_str).collect();
                Ok(positions_where(prompts, |p| wanted.contains(p.label.as_str())))
            }
            Selection::Indices(indices) => {
                if let Some(unknown) =
                    indices.iter().find(|index| !prompts.iter().any(|p| p.index == **index))
                {
                    return Err(AppError::RecordNotFound(format!("#{}", unknown)));
                }
                Ok(positions_where(prompts, |p| indices.contains(&p.index)))
            }
        }
    }
}

fn positions_where(
    prompts: &[PreparedPrompt],
    keep: impl Fn(&PreparedPrompt) -> bool,
) -> Vec<usize> {
    prompts
        .iter()
        .enumerate()
        .filter(|(_, prompt)| keep(prompt))
        .map(|(position, _)| position)
        .collect()
}

/// Counts from one execution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl ExecutionReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
