use crate::domain::Record;

/// Filesystem-safe label: keeps ASCII letters, digits and spaces, then
/// turns each space into `_`.
///
/// Distinct names can collapse to the same label ("Jo,ão" and "João" both
/// become "Jo"); callers must not rely on labels being unique.
pub fn label_for(display_name: &str) -> String {
    display_name
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == ' ')
        .map(|ch| if ch == ' ' { '_' } else { ch })
        .collect()
}

/// Display name of the record at zero-based `index`, falling back to
/// `Registro <n>` when `display_field` has no value.
pub fn display_name(record: &Record, display_field: &str, index: usize) -> String {
    match record.get(display_field) {
        Some(name) => name.to_string(),
        None => format!("Registro {}", index + 1),
    }
}
