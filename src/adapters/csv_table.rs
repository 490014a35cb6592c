//! CSV reader and writer for [`Table`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::{AppError, Record, Table};

const BOM: char = '\u{feff}';

/// Read a CSV file with a header row.
pub fn read_table(path: &Path, delimiter: u8) -> Result<Table, AppError> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|err| AppError::table_error(&source, err))?;
    read_from(file, delimiter, &source)
}

/// Parse CSV content with a header row.
///
/// Empty cells become valueless fields. Short rows are padded the same
/// way; extra cells beyond the header are ignored.
pub fn read_from<R: Read>(reader: R, delimiter: u8, source: &str) -> Result<Table, AppError> {
    let mut reader =
        csv::ReaderBuilder::new().delimiter(delimiter).flexible(true).from_reader(reader);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|err| AppError::table_error(source, err))?
        .iter()
        .enumerate()
        .map(|(position, header)| {
            let header = if position == 0 { header.trim_start_matches(BOM) } else { header };
            header.trim().to_string()
        })
        .collect();

    let mut table = Table::new(columns.clone());
    for result in reader.records() {
        let row = result.map_err(|err| AppError::table_error(source, err))?;
        let mut record = Record::new();
        for (position, column) in columns.iter().enumerate() {
            let value = row.get(position).filter(|value| !value.is_empty()).map(str::to_string);
            record.insert(column.clone(), value);
        }
        table.push(record);
    }

    tracing::debug!(source, rows = table.len(), columns = table.columns().len(), "table loaded");
    Ok(table)
}

/// Write `table` as CSV, one column per table column.
pub fn write_table(path: &Path, table: &Table, delimiter: u8) -> Result<(), AppError> {
    let source = path.display().to_string();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|err| AppError::table_error(&source, err))?;

    writer.write_record(table.columns()).map_err(|err| AppError::table_error(&source, err))?;
    for row in table.rows() {
        let cells = table.columns().iter().map(|column| row.get(column).unwrap_or(""));
        writer.write_record(cells).map_err(|err| AppError::table_error(&source, err))?;
    }
    writer.flush()?;
    Ok(())
}

/// Parse a delimiter argument: a single ASCII character or `tab`.
pub fn parse_delimiter(value: &str) -> Result<u8, AppError> {
    match value {
        "tab" | "\\t" => Ok(b'\t'),
        single if single.len() == 1 && single.is_ascii() => Ok(single.as_bytes()[0]),
        other => Err(AppError::Validation(format!(
            "Invalid delimiter '{}': expected one ASCII character or 'tab'",
            other
        ))),
    }
}
