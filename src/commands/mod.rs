//! CLI command handlers.
//!
//! - `publish` - Fire the post-build action (copies artifacts, writes the manifest)
//! - `show` - Display the resolved configuration or the current manifest

pub mod publish;
pub mod show;

pub use publish::cmd_publish;
pub use show::cmd_show;
