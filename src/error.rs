//! Publisher error taxonomy.
//!
//! Configuration lookups fail with [`ConfigError`], which the metadata
//! resolver chain always recovers from. Everything in [`PublishError`] is
//! fatal to the publish step, except `SourceArtifactMissing` in lenient mode,
//! which the firmware step downgrades to a log line.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A project-configuration lookup that came back empty.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("section [{0}] not found in project configuration")]
    MissingSection(String),
    #[error("option '{key}' not found in section [{section}]")]
    MissingKey { section: String, key: String },
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("build directory not found: {}", .0.display())]
    BuildDirMissing(PathBuf),

    #[error(
        "firmware not found at {} (would have been published to {})",
        .source_path.display(),
        .dest_path.display()
    )]
    SourceArtifactMissing {
        source_path: PathBuf,
        dest_path: PathBuf,
    },

    #[error("cannot write {}", .path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize manifest for {}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PublishError {
    pub fn unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DestinationUnwritable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PublishError> = std::result::Result<T, E>;
