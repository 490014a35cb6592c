mod markdown;
mod model;

pub use markdown::{MAX_HEADING_LEVEL, render, spans};
pub use model::{Block, Document, ParagraphStyle, Span};
