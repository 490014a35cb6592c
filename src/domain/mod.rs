pub mod batch;
pub mod completion;
pub mod configuration;
pub mod consolidate;
pub mod document;
pub mod error;
pub mod prompt;
pub mod record;

pub use batch::{ExecutionReport, PreparedPrompt, ResponseRecord, Selection};
pub use completion::{CompletionError, CompletionOutcome, CompletionRequest};
pub use configuration::{
    BatchConfig, CompletionConfig, ConsolidateConfig, DocumentFormat, RunConfig,
};
pub use consolidate::consolidate;
pub use document::{Block, Document, ParagraphStyle, Span};
pub use error::AppError;
pub use prompt::{PromptTemplate, display_name, label_for, substitute};
pub use record::{Record, Table};
