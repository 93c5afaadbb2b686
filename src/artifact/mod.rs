//! Release artifacts - firmware image, filesystem image, and manifest.
//!
//! - `firmware` - versioned copy of `firmware.bin`
//! - `filesystem` - versioned copy of the first SPIFFS/LittleFS image found
//! - `manifest` - `version.json` describing what was published
//!
//! [`publish`] runs the steps in order against a resolved [`PublishConfig`].

pub mod filesystem;
pub mod firmware;
pub mod manifest;

pub use filesystem::{fs_filename, publish_filesystem_image, FS_IMAGE_CANDIDATES};
pub use firmware::{firmware_filename, publish_firmware, FIRMWARE_IMAGE};
pub use manifest::{
    read_manifest, write_manifest, BuildManifest, WrittenManifest, MANIFEST_FILE,
};

use std::path::PathBuf;
use tracing::{debug, info};

use crate::common::{ensure_dir_exists, list_dir};
use crate::config::PublishConfig;
use crate::error::{PublishError, Result};
use crate::timing::Timer;

/// Outcome of a successful publish run.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub manifest: BuildManifest,
    pub manifest_path: PathBuf,
    /// Manifest text exactly as written.
    pub manifest_json: String,
}

/// Publish the build output described by `config` into its release directory.
///
/// The manifest is only written once both copy steps have finished, so a
/// strict-mode failure leaves no manifest behind.
pub fn publish(config: &PublishConfig) -> Result<PublishReport> {
    let timer = Timer::start("Publish");
    let artifact_dir = config.artifact_dir();

    info!(
        "Publishing {} v{} ({} mode)",
        config.project_name, config.version, config.mode
    );

    if !artifact_dir.is_dir() {
        return Err(PublishError::BuildDirMissing(artifact_dir));
    }
    debug!(
        "Build directory {} contents: {:?}",
        artifact_dir.display(),
        list_dir(&artifact_dir)
    );

    ensure_dir_exists(&config.release_dir)?;

    let firmware_filename = publish_firmware(
        &artifact_dir,
        &config.release_dir,
        &config.project_name,
        &config.version,
        config.mode,
    )?;
    let fs_filename = publish_filesystem_image(
        &artifact_dir,
        &config.release_dir,
        &config.project_name,
        &config.version,
    )?;

    let manifest = BuildManifest {
        project: config.project_name.clone(),
        version: config.version.clone(),
        firmware_filename,
        fs_filename,
    };
    let written = write_manifest(&config.release_dir, &manifest)?;
    info!("Wrote {}", written.path.display());
    info!("Manifest contents:\n{}", written.json.trim_end());

    timer.finish();
    Ok(PublishReport {
        manifest,
        manifest_path: written.path,
        manifest_json: written.json,
    })
}
