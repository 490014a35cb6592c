//! Retry wrapper for completion client operations.

use std::thread;
use std::time::Duration;

use crate::domain::{CompletionConfig, CompletionError, CompletionRequest};
use crate::ports::CompletionClient;

const RATE_LIMITED: u16 = 429;
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    rate_limit_backoff: Duration,
    transport_retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        rate_limit_backoff: Duration,
        transport_retry_delay: Duration,
    ) -> Self {
        Self { max_attempts: max_attempts.max(1), rate_limit_backoff, transport_retry_delay }
    }

    pub fn from_config(config: &CompletionConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.rate_limit_backoff_ms),
            Duration::from_millis(config.transport_retry_delay_ms),
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// attempt=1 -> backoff, attempt=2 -> backoff*2, attempt=3 -> backoff*3.
    fn rate_limit_delay(&self, failed_attempt: u32) -> Duration {
        self.rate_limit_backoff.saturating_mul(failed_attempt)
    }
}

/// Applies the retry policy around a single-attempt client.
///
/// 429 responses back off linearly and end in `RateLimitExhausted`;
/// transport failures retry after a fixed delay and surface on the last
/// attempt; every other failure returns immediately.
pub struct RetryingCompletionClient {
    inner: Box<dyn CompletionClient>,
    policy: RetryPolicy,
}

impl RetryingCompletionClient {
    pub fn new(inner: Box<dyn CompletionClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl CompletionClient for RetryingCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            let error = match self.inner.complete(request) {
                Ok(reply) => return Ok(reply),
                Err(error) => error,
            };
            let last_attempt = attempt == max_attempts;

            let delay = match &error {
                CompletionError::RemoteStatus { status: RATE_LIMITED, .. } => {
                    if last_attempt {
                        return Err(CompletionError::RateLimitExhausted { attempts: attempt });
                    }
                    self.policy.rate_limit_delay(attempt)
                }
                CompletionError::Transport { .. } => {
                    if last_attempt {
                        return Err(error);
                    }
                    self.policy.transport_retry_delay
                }
                _ => return Err(error),
            };

            tracing::warn!(
                attempt,
                max_attempts,
                kind = error.kind(),
                delay_ms = delay.as_millis() as u64,
                error = %format_error_for_log(&error),
                "completion failed, retrying"
            );
            thread::sleep(delay);
        }

        Err(CompletionError::RateLimitExhausted { attempts: max_attempts })
    }
}

fn format_error_for_log(error: &CompletionError) -> String {
    match error {
        CompletionError::RemoteStatus { status, body } => {
            let detail = super::http::extract_error_message(body).unwrap_or_else(|| body.clone());
            format!("status={}: {}", status, sanitize_and_truncate_for_log(&detail))
        }
        other => sanitize_and_truncate_for_log(&other.to_string()),
    }
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let mut output = String::new();

    for (count, ch) in input.chars().enumerate() {
        if count >= MAX_LOG_ERROR_CHARS {
            break;
        }
        output.push(if ch.is_control() { ' ' } else { ch });
    }

    let mut compact = output.split_whitespace().collect::<Vec<_>>().join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact.trim().to_string()
}
