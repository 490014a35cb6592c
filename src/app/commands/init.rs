//! `init`: write the starter config and template.

use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::scaffold_assets::scaffold_files;
use crate::domain::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub created: Vec<PathBuf>,
}

/// Write every scaffold file under `root`.
///
/// Nothing is written when any target already exists.
pub fn execute(root: &Path) -> Result<InitOutcome, AppError> {
    let files = scaffold_files()?;

    if let Some(existing) = files.iter().map(|file| root.join(&file.path)).find(|p| p.exists()) {
        return Err(AppError::AlreadyExists(existing.display().to_string()));
    }

    fs::create_dir_all(root)?;
    let mut created = Vec::with_capacity(files.len());
    for file in files {
        let target = root.join(&file.path);
        fs::write(&target, file.content)?;
        tracing::debug!(path = %target.display(), "scaffold file written");
        created.push(target);
    }

    Ok(InitOutcome { created })
}
