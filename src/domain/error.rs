use std::io;

use thiserror::Error;

/// Library-wide error type for rpt operations.
///
/// Completion failures are deliberately absent: they are per-item outcomes
/// (see [`crate::domain::CompletionError`]) and never stop a batch.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration value out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// Input rejected before any work was done.
    #[error("{0}")]
    Validation(String),

    /// Table lacks one or more required columns.
    #[error("Missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Column selection resolved to nothing.
    #[error("Select at least one column")]
    EmptySelection,

    /// Requested record is not part of the prepared batch.
    #[error("Record '{0}' not found in prepared batch")]
    RecordNotFound(String),

    /// Tabular input could not be read or written.
    #[error("Table error in {path}: {details}")]
    TableError { path: String, details: String },

    /// Archive could not be assembled.
    #[error("Archive error: {0}")]
    ArchiveError(String),

    /// Rendered document could not be encoded.
    #[error("Document encoding error: {0}")]
    DocumentError(String),

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Target file already exists and will not be overwritten.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Embedded asset or invariant missing from the binary.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }

    pub fn table_error(path: impl Into<String>, details: impl std::fmt::Display) -> Self {
        AppError::TableError { path: path.into(), details: details.to_string() }
    }
}
