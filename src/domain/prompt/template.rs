use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::domain::Record;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_pattern() -> &'static Regex {
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern must be valid"))
}

/// Prompt template with `{{name}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder names in first-appearance order, trimmed.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in placeholder_pattern().captures_iter(&self.source) {
            let name = caps[1].trim();
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Fill this template from `record`. See [`substitute`].
    pub fn render(&self, record: &Record) -> String {
        substitute(&self.source, record)
    }
}

/// Replace every `{{name}}` in `template` with the trimmed value of `name`.
///
/// Unknown or empty fields become the empty string; this never fails.
/// Substituted text is not rescanned, so values containing `{{...}}` are
/// emitted literally.
pub fn substitute(template: &str, record: &Record) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| {
            let name = caps[1].trim();
            record.get(name).map(|value| value.trim().to_string()).unwrap_or_default()
        })
        .into_owned()
}
