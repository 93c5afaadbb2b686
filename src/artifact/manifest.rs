//! `version.json` build manifest.

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::write_file_with_dirs;
use crate::error::{PublishError, Result};

/// Manifest filename inside the release directory.
pub const MANIFEST_FILE: &str = "version.json";

/// What one publish run produced.
///
/// `firmware_filename` is left out of the JSON entirely when no firmware was
/// published; `fs_filename` is always written, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub project: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_filename: Option<String>,
    #[serde(default)]
    pub fs_filename: Option<String>,
}

impl BuildManifest {
    /// Indented JSON form, as written to disk.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn manifest_path(release_dir: &Path) -> PathBuf {
    release_dir.join(MANIFEST_FILE)
}

/// A manifest as it was written to disk.
#[derive(Debug, Clone)]
pub struct WrittenManifest {
    pub path: PathBuf,
    pub json: String,
}

/// Write the manifest to `release_dir/version.json`, replacing any previous one.
pub fn write_manifest(
    release_dir: &Path,
    manifest: &BuildManifest,
) -> Result<WrittenManifest> {
    let path = manifest_path(release_dir);
    let mut json = manifest.to_json().map_err(|e| PublishError::Serialization {
        path: path.clone(),
        source: e,
    })?;
    json.push('\n');
    write_file_with_dirs(&path, &json)?;
    Ok(WrittenManifest { path, json })
}

/// Read the manifest back from `release_dir/version.json`.
pub fn read_manifest(release_dir: &Path) -> AnyResult<BuildManifest> {
    let path = manifest_path(release_dir);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Malformed manifest {}", path.display()))
}
