//! `placeholders`: list template placeholders, optionally against a table.

use std::path::Path;

use crate::adapters::csv_table::read_table;
use crate::app::commands::prepare::read_template;
use crate::domain::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    /// Whether the table has a matching column; `None` without a table.
    pub in_table: Option<bool>,
}

pub fn execute(template: &Path, table: Option<(&Path, u8)>) -> Result<Vec<Placeholder>, AppError> {
    let template = read_template(template)?;
    let columns = match table {
        Some((path, delimiter)) => Some(read_table(path, delimiter)?.columns().to_vec()),
        None => None,
    };

    Ok(template
        .placeholders()
        .into_iter()
        .map(|name| {
            let in_table = columns.as_ref().map(|columns| columns.contains(&name));
            Placeholder { name, in_table }
        })
        .collect())
}
