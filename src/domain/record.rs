//! Tabular input model: ordered columns and text-valued records.

use crate::domain::AppError;

/// One row of tabular input.
///
/// Field order is insertion order. A field may be present with no value
/// (an empty cell), which lookups treat the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record where every given value is present.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.insert(name, Some(value.into()));
        }
        record
    }

    /// Value of `name`, or `None` when absent or valueless.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(field, _)| field == name).and_then(|(_, value)| value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    /// Set `name`, overwriting in place when it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of this record restricted to `columns`, in `columns` order.
    pub fn select(&self, columns: &[String]) -> Record {
        let mut selected = Record::new();
        for column in columns {
            if let Some((name, value)) = self.fields.iter().find(|(field, _)| field == column) {
                selected.insert(name.clone(), value.clone());
            }
        }
        selected
    }
}

/// Ordered set of records sharing one column list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Record>) -> Self {
        Self { columns, rows }
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// Append `name` to the column list unless it is already there.
    pub fn add_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.columns.contains(&name) {
            self.columns.push(name);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Fail with every missing name when any of `names` is not a column.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), AppError> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() { Ok(()) } else { Err(AppError::MissingColumns { columns: missing }) }
    }

    /// Restrict every record to `columns`.
    pub fn select(&self, columns: &[String]) -> Result<Table, AppError> {
        if columns.is_empty() {
            return Err(AppError::EmptySelection);
        }
        let names: Vec<&str> = columns.iter().map(String::as_str).collect();
        self.require_columns(&names)?;

        let rows = self.rows.iter().map(|row| row.select(columns)).collect();
        Ok(Table { columns: columns.to_vec(), rows })
    }
}
