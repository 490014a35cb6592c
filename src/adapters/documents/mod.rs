mod docx;
mod markdown;

pub use docx::DocxEncoder;
pub use markdown::MarkdownEncoder;

use crate::domain::DocumentFormat;
use crate::ports::DocumentEncoder;

/// Encoder for the configured output format.
pub fn encoder_for(format: DocumentFormat) -> Box<dyn DocumentEncoder> {
    match format {
        DocumentFormat::Docx => Box::new(DocxEncoder::new()),
        DocumentFormat::Markdown => Box::new(MarkdownEncoder),
    }
}
