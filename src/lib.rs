//! fwpub library exports.
//!
//! The binary in `main.rs` is a thin clap front end; everything it runs lives
//! here so integration tests can drive the publisher directly.

pub mod artifact;
pub mod commands;
pub mod common;
pub mod config;
pub mod error;
pub mod hook;
pub mod metadata;
pub mod project;
pub mod timing;

pub use artifact::{publish, BuildManifest, PublishReport};
pub use config::{Overrides, PublishConfig, PublishMode};
pub use error::{ConfigError, PublishError};
