//! In-memory ZIP archive writer.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::AppError;

/// Accumulates named entries into a ZIP archive held in memory.
///
/// Entry names must be unique inside a ZIP; a repeated name is written as
/// `stem_2.ext`, `stem_3.ext`, ... instead.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self { writer: ZipWriter::new(Cursor::new(Vec::new())), names: HashSet::new() }
    }

    /// Add an entry and return the name it was stored under.
    pub fn add(&mut self, name: &str, contents: &[u8]) -> Result<String, AppError> {
        let stored = self.unique_name(name);
        if stored != name {
            tracing::warn!(requested = name, stored = %stored, "duplicate archive entry renamed");
        }

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer.start_file(stored.as_str(), options).map_err(archive_error)?;
        self.writer.write_all(contents)?;
        self.names.insert(stored.clone());
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Finalize the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>, AppError> {
        let cursor = self.writer.finish().map_err(archive_error)?;
        Ok(cursor.into_inner())
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.names.contains(name) {
            return name.to_string();
        }

        let (stem, extension) = match name.rfind('.') {
            Some(dot) if dot > 0 => (&name[..dot], &name[dot..]),
            _ => (name, ""),
        };
        (2..)
            .map(|counter| format!("{}_{}{}", stem, counter, extension))
            .find(|candidate| !self.names.contains(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

fn archive_error(err: zip::result::ZipError) -> AppError {
    AppError::ArchiveError(err.to_string())
}
