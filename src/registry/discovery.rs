//! Plugin discovery - how implementations reach the registry.
//!
//! The registry depends only on [`PluginDiscovery`]; whether plugins are
//! compiled in, loaded from a host-managed list, or injected by tests is the
//! discovery provider's business.

use crate::core::PluginGroup;
use crate::plugin::Plugin;
use crate::plugins::git::GitScm;

/// A source of plugin candidates.
///
/// `load` is allowed to block (it may touch the filesystem); it runs once per
/// process when the registry is first populated.
pub trait PluginDiscovery: Send + Sync {
    /// Candidates advertised for `group`. They are validated by the registry.
    fn load(&self, group: PluginGroup) -> Vec<Plugin>;

    /// Whether `load` returns candidates in a meaningful, stable order.
    ///
    /// When false, the registry sorts each group by plugin name.
    fn is_ordered(&self) -> bool {
        false
    }
}

/// Discovery over a fixed list of advertisements.
///
/// Candidates are returned in registration order.
#[derive(Clone, Default)]
pub struct StaticDiscovery {
    entries: Vec<(PluginGroup, Plugin)>,
}

impl StaticDiscovery {
    /// Create discovery with no plugins.
    pub fn new() -> Self {
        StaticDiscovery::default()
    }

    /// Discovery over the plugins that ship with plinth.
    pub fn builtin() -> Self {
        StaticDiscovery::new().with_plugin(Plugin::source_control(GitScm::new()))
    }

    /// Advertise a plugin under its own group.
    pub fn with_plugin(self, plugin: Plugin) -> Self {
        let group = plugin.group();
        self.advertise(group, plugin)
    }

    /// Advertise a plugin under an explicit group.
    ///
    /// The registry rejects the plugin if it does not implement that group.
    pub fn advertise(mut self, group: PluginGroup, plugin: Plugin) -> Self {
        self.entries.push((group, plugin));
        self
    }

    /// Number of advertisements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is advertised.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PluginDiscovery for StaticDiscovery {
    fn load(&self, group: PluginGroup) -> Vec<Plugin> {
        self.entries
            .iter()
            .filter(|(advertised, _)| *advertised == group)
            .map(|(_, plugin)| plugin.clone())
            .collect()
    }

    fn is_ordered(&self) -> bool {
        true
    }
}
