//! `render`: convert one markdown file into a document.

use std::fs;
use std::path::PathBuf;

use crate::adapters::documents::encoder_for;
use crate::domain::document::render;
use crate::domain::{AppError, DocumentFormat};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Explicit format; otherwise taken from the output extension.
    pub format: Option<DocumentFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub blocks: usize,
    pub format: DocumentFormat,
    pub output: PathBuf,
}

pub fn execute(options: &RenderOptions, fallback: DocumentFormat) -> Result<RenderOutcome, AppError> {
    let format = match options.format {
        Some(format) => format,
        None => options
            .output
            .extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| DocumentFormat::parse(extension).ok())
            .unwrap_or(fallback),
    };

    let text = fs::read_to_string(&options.input)?;
    let document = render(&text);
    let bytes = encoder_for(format).encode(&document)?;
    fs::write(&options.output, bytes)?;

    Ok(RenderOutcome { blocks: document.len(), format, output: options.output.clone() })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn format_follows_output_extension() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.md");
        fs::write(&input, "# Título\n\n- **a** b\n").unwrap();

        let options = RenderOptions { input, output: dir.path().join("out.md"), format: None };
        let outcome = execute(&options, DocumentFormat::Docx).unwrap();

        assert_eq!(outcome.format, DocumentFormat::Markdown);
        assert_eq!(outcome.blocks, 2);
        assert_eq!(fs::read_to_string(outcome.output).unwrap(), "# Título\n\n- **a** b\n");
    }

    #[test]
    fn unknown_extension_uses_fallback() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.md");
        fs::write(&input, "texto").unwrap();

        let options = RenderOptions { input, output: dir.path().join("out.bin"), format: None };
        let outcome = execute(&options, DocumentFormat::Docx).unwrap();

        assert_eq!(outcome.format, DocumentFormat::Docx);
        assert!(fs::read(outcome.output).unwrap().starts_with(b"PK"));
    }
}
