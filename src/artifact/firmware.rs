//! Firmware image publishing.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::common::copy_artifact;
use crate::config::PublishMode;
use crate::error::{PublishError, Result};

/// Name of the linked firmware image in the build output.
pub const FIRMWARE_IMAGE: &str = "firmware.bin";

/// Release filename of the firmware image: `{project}-v{version}.bin`.
pub fn firmware_filename(project_name: &str, version: &str) -> String {
    format!("{}-v{}.bin", project_name, version)
}

/// Copy the firmware image into the release directory under its versioned name.
///
/// Returns the published filename, or `None` when the image is missing and
/// `mode` is [`PublishMode::Lenient`]. In strict mode a missing image is
/// [`PublishError::SourceArtifactMissing`].
pub fn publish_firmware(
    artifact_dir: &Path,
    release_dir: &Path,
    project_name: &str,
    version: &str,
    mode: PublishMode,
) -> Result<Option<String>> {
    let filename = firmware_filename(project_name, version);
    let src = artifact_dir.join(FIRMWARE_IMAGE);
    let dst = release_dir.join(&filename);

    if !src.is_file() {
        match mode {
            PublishMode::Strict => {
                return Err(PublishError::SourceArtifactMissing {
                    source_path: src,
                    dest_path: dst,
                });
            }
            PublishMode::Lenient => {
                warn!("Firmware not found at {}", src.display());
                return Ok(None);
            }
        }
    }

    debug!("Copying {} -> {}", src.display(), dst.display());
    let info = copy_artifact(&src, &dst)?;
    info!(
        "Copied firmware to {} ({} bytes, sha256 {})",
        dst.display(),
        info.bytes,
        info.sha256
    );
    Ok(Some(filename))
}
