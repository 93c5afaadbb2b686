//! Publish command - runs the post-build hook.

use anyhow::Result;
use tracing::info;

use crate::config::PublishConfig;
use crate::hook::{register_publisher, HookRegistry, POST_BUILD_ACTION};

/// Execute the publish command.
pub fn cmd_publish(config: &PublishConfig) -> Result<()> {
    let mut registry = HookRegistry::new();
    register_publisher(&mut registry);

    let ran = registry.fire(POST_BUILD_ACTION, config)?;
    info!(
        "Post-build action '{}' complete ({} hook(s))",
        POST_BUILD_ACTION, ran
    );
    Ok(())
}
