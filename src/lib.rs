//! plinth - plugin resolution for native build tooling
//!
//! This crate discovers generator, provider and source-control plugins,
//! picks a compatible combination for a project, resolves each plugin's
//! configuration from `pyproject.toml`, and constructs the plugins.

pub mod builder;
pub mod config;
pub mod core;
pub mod ops;
pub mod plugin;
pub mod plugins;
pub mod registry;
pub mod resolver;
pub mod util;

/// Mock plugins and manifest fixtures for unit tests.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildError, BuildFailure, BuildResult, BuildStage, Builder};
pub use config::{GlobalDefaults, PluginSchema, ResolvedConfiguration};
pub use core::{CoreData, PluginData, PluginGroup, ProjectConfiguration, SyncFormat};
pub use plugin::{Plugin, PluginDescriptor};
pub use registry::{PluginDiscovery, PluginRegistry, StaticDiscovery};
pub use resolver::ResolveError;
pub use util::context::GlobalContext;
