mod http;
mod retrying;

pub use self::http::HttpCompletionClient;
pub use self::retrying::{RetryPolicy, RetryingCompletionClient};

use crate::domain::{AppError, CompletionConfig};
use crate::ports::CompletionClient;

/// Build the HTTP client wrapped in the configured retry policy.
pub fn build_client(
    api_key: String,
    config: &CompletionConfig,
) -> Result<Box<dyn CompletionClient>, AppError> {
    let transport = HttpCompletionClient::new(api_key, config)?;
    let retry_policy = RetryPolicy::from_config(config);
    Ok(Box::new(RetryingCompletionClient::new(Box::new(transport), retry_policy)))
}
