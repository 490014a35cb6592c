//! Completion endpoint port definition.

use std::time::Instant;

use crate::domain::{CompletionError, CompletionOutcome, CompletionRequest};

/// Port for text-completion calls.
pub trait CompletionClient {
    /// Send `request` and return the first choice's message content verbatim.
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

impl<C: CompletionClient + ?Sized> CompletionClient for Box<C> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        (**self).complete(request)
    }
}

/// Run one completion and tag the result.
pub fn complete<C: CompletionClient + ?Sized>(
    client: &C,
    request: &CompletionRequest,
) -> CompletionOutcome {
    let started = Instant::now();
    let result = client.complete(request);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(reply) => tracing::debug!(elapsed_ms, reply_chars = reply.len(), "completion succeeded"),
        Err(error) => tracing::warn!(elapsed_ms, kind = error.kind(), "completion failed"),
    }
    CompletionOutcome::from(result)
}

/// Offline client that answers every request with a fixed-shape report.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionClient;

impl CompletionClient for MockCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let prompt_chars = request.prompt.chars().count();
        tracing::info!(model = %request.model, prompt_chars, "mock completion");

        Ok(format!(
            "# Mock report\n\nModel: {}\n\n- **Prompt length:** {} chars\n",
            request.model, prompt_chars
        ))
    }
}
