//! Post-build action hooks.
//!
//! The build tool calls back into named actions once it has produced output.
//! Listeners are registered per action and run in registration order.

use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::debug;

use crate::artifact;
use crate::config::PublishConfig;

/// Action fired once the firmware image has been linked.
pub const POST_BUILD_ACTION: &str = "buildprog";

type Listener = Box<dyn FnMut(&PublishConfig) -> Result<()>>;

/// Listeners keyed by action name.
#[derive(Default)]
pub struct HookRegistry {
    listeners: HashMap<String, Vec<(String, Listener)>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` to `action` under a descriptive `name`.
    pub fn register<F>(&mut self, action: &str, name: &str, listener: F)
    where
        F: FnMut(&PublishConfig) -> Result<()> + 'static,
    {
        self.listeners
            .entry(action.to_string())
            .or_default()
            .push((name.to_string(), Box::new(listener)));
    }

    /// Number of listeners attached to `action`.
    pub fn listener_count(&self, action: &str) -> usize {
        self.listeners.get(action).map_or(0, Vec::len)
    }

    /// Run every listener of `action`, stopping at the first failure.
    ///
    /// Returns the number of listeners that ran. An action with no listeners
    /// runs nothing and succeeds.
    pub fn fire(&mut self, action: &str, config: &PublishConfig) -> Result<usize> {
        let Some(listeners) = self.listeners.get_mut(action) else {
            debug!("No listeners for action '{}'", action);
            return Ok(0);
        };
        for (name, listener) in listeners.iter_mut() {
            debug!("Running '{}' for action '{}'", name, action);
            listener(config).with_context(|| format!("{} failed after '{}'", name, action))?;
        }
        Ok(listeners.len())
    }
}

/// Attach the artifact publisher to [`POST_BUILD_ACTION`].
pub fn register_publisher(registry: &mut HookRegistry) {
    registry.register(POST_BUILD_ACTION, "publish", |config| {
        artifact::publish(config)?;
        Ok(())
    });
}
