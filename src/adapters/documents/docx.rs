//! WordprocessingML (`.docx`) encoder.
//!
//! Writes the smallest package Word and LibreOffice open cleanly: content
//! types, package relationships, the main document part, a styles part with
//! `Heading1`..`Heading9` and `ListBullet`, and a numbering part backing the
//! bullet style.

use crate::adapters::archive::ArchiveBuilder;
use crate::domain::document::MAX_HEADING_LEVEL;
use crate::domain::{AppError, Block, Document, ParagraphStyle, Span};
use crate::ports::DocumentEncoder;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="&#8226;"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Numbering instance referenced by bulleted paragraphs.
const BULLET_NUM_ID: u32 = 1;

/// Encodes documents as `.docx` packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxEncoder;

impl DocxEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentEncoder for DocxEncoder {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn encode(&self, document: &Document) -> Result<Vec<u8>, AppError> {
        let mut package = ArchiveBuilder::new();
        package.add("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes())?;
        package.add("_rels/.rels", PACKAGE_RELS_XML.as_bytes())?;
        package.add("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes())?;
        package.add("word/document.xml", document_xml(document).as_bytes())?;
        package.add("word/styles.xml", styles_xml().as_bytes())?;
        package.add("word/numbering.xml", NUMBERING_XML.as_bytes())?;
        package.finish().map_err(|err| AppError::DocumentError(err.to_string()))
    }
}

fn document_xml(document: &Document) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:document xmlns:w="{}"><w:body>"#, WORD_NS));

    for block in document.blocks() {
        match block {
            Block::Heading { level, text } => {
                xml.push_str(&format!(
                    r#"<w:p><w:pPr><w:pStyle w:val="Heading{}"/></w:pPr>"#,
                    (*level).clamp(1, MAX_HEADING_LEVEL)
                ));
                push_run(&mut xml, &Span::plain(text.as_str()));
                xml.push_str("</w:p>");
            }
            Block::Paragraph { style, spans } => {
                xml.push_str("<w:p>");
                if *style == ParagraphStyle::Bulleted {
                    xml.push_str(&format!(
                        r#"<w:pPr><w:pStyle w:val="ListBullet"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr></w:pPr>"#,
                        BULLET_NUM_ID
                    ));
                }
                for span in spans {
                    push_run(&mut xml, span);
                }
                xml.push_str("</w:p>");
            }
        }
    }

    xml.push_str(r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#);
    xml.push_str("</w:body></w:document>");
    xml
}

fn push_run(xml: &mut String, span: &Span) {
    xml.push_str("<w:r>");
    if span.bold {
        xml.push_str("<w:rPr><w:b/></w:rPr>");
    }
    xml.push_str(r#"<w:t xml:space="preserve">"#);
    xml.push_str(&escape_xml(&span.text));
    xml.push_str("</w:t></w:r>");
}

fn styles_xml() -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, WORD_NS));
    xml.push_str(r#"<w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160"/></w:pPr></w:pPrDefault></w:docDefaults>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);

    for level in 1..=MAX_HEADING_LEVEL {
        // 16pt for Heading1 down to 11pt, in half-points.
        let size = 32u8.saturating_sub((level - 1) * 2).max(22);
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:sz w:val="{size}"/></w:rPr></w:style>"#,
            level = level,
            outline = level - 1,
            size = size
        ));
    }

    xml.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:numId w:val="{}"/></w:numPr></w:pPr></w:style>"#,
        BULLET_NUM_ID
    ));
    xml.push_str("</w:styles>");
    xml
}

/// Escape markup characters and drop code points XML 1.0 cannot carry.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(ch),
            ch if (ch as u32) < 0x20 || ch == '\u{FFFE}' || ch == '\u{FFFF}' => {}
            ch => escaped.push(ch),
        }
    }
    escaped
}
