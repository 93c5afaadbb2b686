//! Path probing and directory management.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PublishError, Result};

/// Find the first of `candidates` that exists as a file under `dir`.
///
/// Candidates are checked in order; a later candidate never wins over an
/// earlier one, even if both exist.
pub fn find_first_file(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Ensure a directory exists, creating it and its parents if necessary.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| PublishError::unwritable(path, e))
}

/// Names of the immediate entries of `dir`, sorted.
///
/// Unreadable entries are skipped; this only feeds diagnostics.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
