//! Show command - displays information.

use anyhow::Result;
use tracing::warn;

use crate::artifact::read_manifest;
use crate::config::PublishConfig;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show resolved configuration
    Config,
    /// Show the published manifest
    Manifest,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &PublishConfig) -> Result<()> {
    match target {
        ShowTarget::Config => config.print(),
        ShowTarget::Manifest => {
            let manifest = read_manifest(&config.release_dir)?;
            println!("{}", manifest.to_json()?);
            let published = [&manifest.firmware_filename, &manifest.fs_filename];
            for name in published.into_iter().flatten() {
                let path = config.release_dir.join(name);
                if !path.is_file() {
                    warn!("{} listed in manifest but missing", path.display());
                }
            }
        }
    }
    Ok(())
}
