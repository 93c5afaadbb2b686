//! Shared filesystem helpers for the publish steps.

pub mod files;
pub mod paths;

pub use files::{copy_artifact, file_digest, write_file_with_dirs, ArtifactInfo};
pub use paths::{ensure_dir_exists, find_first_file, list_dir};
