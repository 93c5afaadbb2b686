//! File copy and write helpers that report failures against the destination path.

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PublishError, Result};

/// Size and digest of a file that was just copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub bytes: u64,
    pub sha256: String,
}

/// Copy `src` to `dst`, overwriting `dst` if it exists.
///
/// The caller is expected to have checked that `src` exists. Any I/O failure
/// is reported as [`PublishError::DestinationUnwritable`] for `dst`.
pub fn copy_artifact(src: &Path, dst: &Path) -> Result<ArtifactInfo> {
    let bytes = fs::copy(src, dst).map_err(|e| PublishError::unwritable(dst, e))?;
    let sha256 = file_digest(dst).map_err(|e| PublishError::unwritable(dst, e))?;
    Ok(ArtifactInfo { bytes, sha256 })
}

/// Hex SHA-256 of a file's contents.
pub fn file_digest(path: &Path) -> io::Result<String> {
    let content = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write a file, creating parent directories as needed.
///
/// Truncates any existing file. There is no temp-file-and-rename step, so a
/// crash mid-write can leave a partial file behind.
pub fn write_file_with_dirs<C: AsRef<[u8]>>(path: &Path, content: C) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PublishError::unwritable(parent, e))?;
    }
    fs::write(path, content).map_err(|e| PublishError::unwritable(path, e))?;
    Ok(())
}
