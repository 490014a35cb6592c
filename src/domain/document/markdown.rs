//! Markdown-subset renderer: headings, bullet items and `**bold**` spans.
//!
//! Every line maps to exactly one block or to nothing (blank lines). Input
//! that matches no construct becomes a plain paragraph, so rendering is total.

use std::sync::OnceLock;

use regex::Regex;

use super::model::{Block, Document, Span};

/// Deepest heading level a document can carry.
pub const MAX_HEADING_LEVEL: u8 = 9;

const BULLET_PREFIXES: [&str; 2] = ["- ", "* "];

static BOLD: OnceLock<Regex> = OnceLock::new();

fn bold_pattern() -> &'static Regex {
    BOLD.get_or_init(|| Regex::new(r"\*\*.*?\*\*").expect("bold pattern must be valid"))
}

/// Render markdown-like `text` into a [`Document`].
pub fn render(text: &str) -> Document {
    let mut document = Document::new();

    for raw_line in text.split('\n') {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            let hashes = line.chars().take_while(|ch| *ch == '#').count();
            let level = hashes.clamp(1, MAX_HEADING_LEVEL as usize) as u8;
            document.push(Block::heading(level, line[hashes..].trim()));
        } else if let Some(rest) = BULLET_PREFIXES.iter().find_map(|prefix| line.strip_prefix(prefix))
        {
            document.push(Block::bullet(spans(rest)));
        } else {
            document.push(Block::paragraph(spans(line)));
        }
    }

    document
}

/// Split `text` into plain and bold spans.
///
/// Only fully paired `**...**` markers produce bold spans (matched
/// non-greedily); a stray `**` stays literal. Empty plain gaps between or
/// around bold spans are dropped.
pub fn spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for found in bold_pattern().find_iter(text) {
        push_plain(&mut spans, &text[cursor..found.start()]);
        let marked = found.as_str();
        spans.push(Span::bold(&marked[2..marked.len() - 2]));
        cursor = found.end();
    }
    push_plain(&mut spans, &text[cursor..]);

    spans
}

fn push_plain(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::plain(text));
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::domain::document::ParagraphStyle;

    #[test]
    fn renders_heading_bullet_and_paragraph() {
        let document = render("# Title\n- **Bold** item\nPlain line");

        assert_eq!(
            document.blocks(),
            [
                Block::heading(1, "Title"),
                Block::bullet(vec![Span::bold("Bold"), Span::plain(" item")]),
                Block::paragraph(vec![Span::plain("Plain line")]),
            ]
        );
    }

    #[test]
    fn blank_lines_produce_no_blocks() {
        let document = render("\n\n# A\n\n");
        assert_eq!(document.blocks(), [Block::heading(1, "A")]);

        assert!(render("   \n\t\n").is_empty());
    }

    #[test]
    fn heading_level_counts_leading_hashes() {
        let document = render("### Third ## level");
        assert_eq!(document.blocks(), [Block::heading(3, "Third ## level")]);
    }

    #[test]
    fn heading_level_is_capped_at_nine() {
        let document = render("############ Deep");
        assert_eq!(document.blocks(), [Block::heading(9, "Deep")]);
    }

    #[test]
    fn lines_are_trimmed_before_matching() {
        let document = render("   ## Indented\r\n   * star item  ");
        assert_eq!(
            document.blocks(),
            [Block::heading(2, "Indented"), Block::bullet(vec![Span::plain("star item")])]
        );
    }

    #[test]
    fn dash_without_space_is_plain() {
        let document = render("-not a bullet");
        assert!(matches!(
            &document.blocks()[0],
            Block::Paragraph { style: ParagraphStyle::Normal, .. }
        ));
    }

    #[test]
    fn bold_spans_are_non_greedy() {
        assert_eq!(
            spans("**a** and **b**"),
            vec![Span::bold("a"), Span::plain(" and "), Span::bold("b")]
        );
    }

    #[test]
    fn adjacent_bold_spans_have_no_empty_gap() {
        assert_eq!(spans("**a****b**"), vec![Span::bold("a"), Span::bold("b")]);
    }

    #[test]
    fn unterminated_marker_is_literal() {
        assert_eq!(spans("a **b"), vec![Span::plain("a **b")]);
        assert_eq!(
            spans("**x** then **y"),
            vec![Span::bold("x"), Span::plain(" then **y")]
        );
    }

    #[test]
    fn empty_bold_pair_is_kept() {
        assert_eq!(spans("****"), vec![Span::bold("")]);
    }

    proptest! {
        #[test]
        fn render_never_emits_empty_blocks(text in "(?s).{0,200}") {
            let document = render(&text);
            let lines = text.split('\n').filter(|line| !line.trim().is_empty()).count();
            prop_assert_eq!(document.len(), lines);
            for block in document.blocks() {
                if let Block::Paragraph { spans, .. } = block {
                    prop_assert!(!spans.is_empty());
                }
            }
        }
    }
}
