use crate::domain::{AppError, Document};

/// Port for serializing a rendered document to bytes.
pub trait DocumentEncoder {
    /// File extension for encoded documents, without the dot.
    fn extension(&self) -> &'static str;

    fn encode(&self, document: &Document) -> Result<Vec<u8>, AppError>;
}
