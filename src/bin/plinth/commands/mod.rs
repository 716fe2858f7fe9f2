//! Command implementations

pub mod build;
pub mod completions;
pub mod install;
pub mod plugins;
pub mod resolve;
pub mod update;

use std::sync::Arc;

use plinth::registry::{self, PluginRegistry, StaticDiscovery};

/// The process-wide registry populated with the built-in plugins.
pub fn registry() -> Arc<PluginRegistry> {
    registry::global(&StaticDiscovery::builtin())
}
