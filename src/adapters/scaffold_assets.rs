//! Starter files embedded in the binary for `rpt init`.

use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

/// A starter file: path relative to the target directory plus its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: String,
    pub content: String,
}

/// Every embedded starter file, sorted by path.
pub fn scaffold_files() -> Result<Vec<ScaffoldFile>, AppError> {
    let mut files = Vec::new();
    for file in SCAFFOLD_DIR.files() {
        let path = file.path().to_string_lossy().to_string();
        let content = file
            .contents_utf8()
            .ok_or_else(|| AppError::InternalError(format!("Scaffold file is not UTF-8: {}", path)))?;
        files.push(ScaffoldFile { path, content: content.to_string() });
    }

    if files.is_empty() {
        return Err(AppError::InternalError("Missing scaffold assets".into()));
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

pub fn scaffold_file_content(path: &str) -> Option<String> {
    SCAFFOLD_DIR.get_file(path).and_then(|file| file.contents_utf8()).map(|s| s.to_string())
}
