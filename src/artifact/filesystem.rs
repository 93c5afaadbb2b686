//! Filesystem image publishing.

use std::path::Path;
use tracing::info;

use crate::common::{copy_artifact, find_first_file};
use crate::error::Result;

/// Filesystem image names, in priority order.
pub const FS_IMAGE_CANDIDATES: &[&str] = &["spiffs.bin", "littlefs.bin"];

/// Release filename of the filesystem image: `{project}-fs-v{version}.bin`.
pub fn fs_filename(project_name: &str, version: &str) -> String {
    format!("{}-fs-v{}.bin", project_name, version)
}

/// Copy the first filesystem image found into the release directory.
///
/// Only one image is published even when several candidates exist. A missing
/// image is not an error.
pub fn publish_filesystem_image(
    artifact_dir: &Path,
    release_dir: &Path,
    project_name: &str,
    version: &str,
) -> Result<Option<String>> {
    let Some(src) = find_first_file(artifact_dir, FS_IMAGE_CANDIDATES) else {
        info!("No filesystem image found");
        return Ok(None);
    };

    let filename = fs_filename(project_name, version);
    let dst = release_dir.join(&filename);
    let info = copy_artifact(&src, &dst)?;
    info!(
        "Copied filesystem image {} to {} ({} bytes, sha256 {})",
        src.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
        dst.display(),
        info.bytes,
        info.sha256
    );
    Ok(Some(filename))
}
