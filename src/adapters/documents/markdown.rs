use crate::domain::{AppError, Block, Document, ParagraphStyle};
use crate::ports::DocumentEncoder;

/// Re-emits a document as normalized markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownEncoder;

impl DocumentEncoder for MarkdownEncoder {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn encode(&self, document: &Document) -> Result<Vec<u8>, AppError> {
        let mut out = String::new();

        for block in document.blocks() {
            match block {
                Block::Heading { level, text } => {
                    out.push_str(&"#".repeat(usize::from(*level)));
                    out.push(' ');
                    out.push_str(text);
                    out.push_str("\n\n");
                }
                Block::Paragraph { style, spans } => {
                    if *style == ParagraphStyle::Bulleted {
                        out.push_str("- ");
                    }
                    for span in spans {
                        if span.bold {
                            out.push_str("**");
                            out.push_str(&span.text);
                            out.push_str("**");
                        } else {
                            out.push_str(&span.text);
                        }
                    }
                    out.push_str(if *style == ParagraphStyle::Bulleted { "\n" } else { "\n\n" });
                }
            }
        }

        Ok(out.into_bytes())
    }
}
