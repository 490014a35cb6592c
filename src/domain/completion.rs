//! Completion request and tagged outcome types.

use std::borrow::Cow;

use thiserror::Error;

/// One chat-completion call: a single user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
}

/// Why a completion produced no reply text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// Endpoint answered with a non-success status other than an exhausted 429.
    #[error("API error (HTTP {status}): {body}")]
    RemoteStatus { status: u16, body: String },

    /// Endpoint kept answering 429 until the attempt budget ran out.
    #[error("API error: rate limit persisted after {attempts} attempt(s)")]
    RateLimitExhausted { attempts: u32 },

    /// Request never got a response (DNS, connect, reset, timeout).
    #[error("Fatal connection error: {message}")]
    Transport { message: String },

    /// Success status, but the body had no usable first choice.
    #[error("Fatal connection error: unexpected response: {message}")]
    InvalidResponse { message: String },
}

impl CompletionError {
    /// Short machine-readable kind for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::RemoteStatus { .. } => "remote_status",
            CompletionError::RateLimitExhausted { .. } => "rate_limit_exhausted",
            CompletionError::Transport { .. } => "transport",
            CompletionError::InvalidResponse { .. } => "invalid_response",
        }
    }
}

/// Result of one batch item's completion, checked by tag rather than text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Success(String),
    Failure(CompletionError),
}

impl CompletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success(_))
    }

    pub fn failure(&self) -> Option<&CompletionError> {
        match self {
            CompletionOutcome::Success(_) => None,
            CompletionOutcome::Failure(error) => Some(error),
        }
    }

    /// Reply text on success, or the failure's description.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            CompletionOutcome::Success(text) => Cow::Borrowed(text),
            CompletionOutcome::Failure(error) => Cow::Owned(error.to_string()),
        }
    }
}

impl From<Result<String, CompletionError>> for CompletionOutcome {
    fn from(result: Result<String, CompletionError>) -> Self {
        match result {
            Ok(text) => CompletionOutcome::Success(text),
            Err(error) => CompletionOutcome::Failure(error),
        }
    }
}
