//! Row consolidation for multi-row survey exports.
//!
//! Raw exports carry one row per answer set; a subject answering twice shows
//! up as two rows sharing a key. Consolidation keeps one row per key and
//! folds the second row's tail columns in under `<column>_2`.

use std::collections::HashMap;

use crate::domain::{AppError, Record, Table};

/// Suffix appended to tail columns copied from a subject's second row.
pub const SECOND_ROW_SUFFIX: &str = "_2";

/// Merge rows sharing `key_field` into one record per key.
///
/// Tail columns are `cutoff_field` and every column after it. Rows with a
/// blank key are dropped; rows beyond the second for a key are ignored.
/// Output order follows first appearance of each key.
pub fn consolidate(table: &Table, key_field: &str, cutoff_field: &str) -> Result<Table, AppError> {
    table.require_columns(&[key_field, cutoff_field])?;

    let cutoff = table
        .column_index(cutoff_field)
        .ok_or_else(|| AppError::MissingColumns { columns: vec![cutoff_field.to_string()] })?;
    let tail = &table.columns()[cutoff..];

    let mut groups: Vec<Vec<&Record>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut skipped = 0usize;

    for row in table.rows() {
        let Some(key) = row.get(key_field).filter(|key| !key.trim().is_empty()) else {
            skipped += 1;
            continue;
        };

        match positions.get(key) {
            Some(&position) => groups[position].push(row),
            None => {
                positions.insert(key, groups.len());
                groups.push(vec![row]);
            }
        }
    }

    let mut columns = table.columns().to_vec();
    for column in tail {
        let suffixed = format!("{}{}", column, SECOND_ROW_SUFFIX);
        if !columns.contains(&suffixed) {
            columns.push(suffixed);
        }
    }

    let mut output = Table::new(columns);
    for group in groups {
        let mut merged = group[0].clone();

        if let Some(second) = group.get(1) {
            for column in tail {
                let value = second.get(column).map(str::to_string);
                merged.insert(format!("{}{}", column, SECOND_ROW_SUFFIX), value);
            }
        }

        if group.len() > 2 {
            tracing::debug!(
                key = group[0].get(key_field).unwrap_or_default(),
                ignored = group.len() - 2,
                "consolidate ignores rows beyond the second"
            );
        }

        output.push(merged);
    }

    tracing::debug!(
        input_rows = table.len(),
        output_rows = output.len(),
        skipped_blank_keys = skipped,
        "consolidation complete"
    );

    Ok(output)
}
