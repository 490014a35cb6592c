//! Run configuration domain models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Configuration loaded from `rpt.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Completion endpoint configuration.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Batch naming and output configuration.
    #[serde(default)]
    pub batch: BatchConfig,
    /// Row consolidation defaults.
    #[serde(default)]
    pub consolidate: ConsolidateConfig,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.completion.validate()?;
        self.batch.validate()?;
        self.consolidate.validate()?;
        Ok(())
    }
}

/// Completion endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionConfig {
    /// Chat-completions endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Per-attempt request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Attempts per item, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Sleep after the n-th rate-limited attempt is `n * rate_limit_backoff_ms`.
    #[serde(default = "default_rate_limit_backoff_ms")]
    pub rate_limit_backoff_ms: u64,
    /// Sleep after a transport failure.
    #[serde(default = "default_transport_retry_delay_ms")]
    pub transport_retry_delay_ms: u64,
    /// Environment variable holding the bearer token.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            rate_limit_backoff_ms: default_rate_limit_backoff_ms(),
            transport_retry_delay_ms: default_transport_retry_delay_ms(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl CompletionConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::config_error("model must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::config_error("temperature must be between 0 and 2"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        if self.max_attempts == 0 {
            return Err(AppError::config_error("max_attempts must be greater than 0"));
        }
        if self.rate_limit_backoff_ms == 0 {
            return Err(AppError::config_error("rate_limit_backoff_ms must be greater than 0"));
        }
        if self.transport_retry_delay_ms == 0 {
            return Err(AppError::config_error("transport_retry_delay_ms must be greater than 0"));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(AppError::config_error("api_key_env must not be empty"));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.openai.com/v1/chat/completions")
        .expect("Default API URL must be valid")
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_timeout() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_rate_limit_backoff_ms() -> u64 {
    2000
}

fn default_transport_retry_delay_ms() -> u64 {
    1000
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// Output document format for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentFormat {
    #[default]
    #[serde(rename = "docx")]
    Docx,
    #[serde(rename = "md")]
    Markdown,
}

impl DocumentFormat {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "docx" => Ok(DocumentFormat::Docx),
            "md" | "markdown" => Ok(DocumentFormat::Markdown),
            other => Err(AppError::config_error(format!(
                "unsupported document format '{}': expected docx or md",
                other
            ))),
        }
    }
}

/// Batch naming and output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Column holding each record's display name.
    #[serde(default = "default_display_field")]
    pub display_field: String,
    #[serde(default)]
    pub document_format: DocumentFormat,
    #[serde(default = "default_prompts_archive")]
    pub prompts_archive: String,
    #[serde(default = "default_responses_archive")]
    pub responses_archive: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            display_field: default_display_field(),
            document_format: DocumentFormat::default(),
            prompts_archive: default_prompts_archive(),
            responses_archive: default_responses_archive(),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.display_field.trim().is_empty() {
            return Err(AppError::config_error("display_field must not be empty"));
        }
        if self.prompts_archive.trim().is_empty() || self.responses_archive.trim().is_empty() {
            return Err(AppError::config_error("archive names must not be empty"));
        }
        if self.prompts_archive == self.responses_archive {
            return Err(AppError::config_error(
                "prompts_archive and responses_archive must differ",
            ));
        }
        Ok(())
    }
}

fn default_display_field() -> String {
    "nome_completo".to_string()
}

fn default_prompts_archive() -> String {
    "prompts.zip".to_string()
}

fn default_responses_archive() -> String {
    "respostas.zip".to_string()
}

/// Row consolidation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsolidateConfig {
    #[serde(default = "default_key_field")]
    pub key_field: String,
    #[serde(default = "default_cutoff_field")]
    pub cutoff_field: String,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self { key_field: default_key_field(), cutoff_field: default_cutoff_field() }
    }
}

impl ConsolidateConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.key_field.trim().is_empty() {
            return Err(AppError::config_error("key_field must not be empty"));
        }
        if self.cutoff_field.trim().is_empty() {
            return Err(AppError::config_error("cutoff_field must not be empty"));
        }
        Ok(())
    }
}

fn default_key_field() -> String {
    "CPF".to_string()
}

fn default_cutoff_field() -> String {
    "Pergunta".to_string()
}
