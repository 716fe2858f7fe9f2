//! Plugin descriptors - immutable snapshots of discovered implementations.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::config::schema::PluginSchema;
use crate::core::{PluginGroup, SyncFormat};
use crate::plugin::capabilities::CapabilitySet;
use crate::plugin::trait_def::{GeneratorPlugin, ProviderPlugin, ScmPlugin};

/// A type-erased plugin implementation, as advertised by discovery.
#[derive(Clone)]
pub enum Plugin {
    /// A generator implementation
    Generator(Arc<dyn GeneratorPlugin>),
    /// A provider implementation
    Provider(Arc<dyn ProviderPlugin>),
    /// A source-control implementation
    SourceControl(Arc<dyn ScmPlugin>),
}

impl Plugin {
    /// Wrap a generator implementation.
    pub fn generator(plugin: impl GeneratorPlugin + 'static) -> Self {
        Plugin::Generator(Arc::new(plugin))
    }

    /// Wrap a provider implementation.
    pub fn provider(plugin: impl ProviderPlugin + 'static) -> Self {
        Plugin::Provider(Arc::new(plugin))
    }

    /// Wrap a source-control implementation.
    pub fn source_control(plugin: impl ScmPlugin + 'static) -> Self {
        Plugin::SourceControl(Arc::new(plugin))
    }

    /// The group this implementation actually belongs to.
    pub fn group(&self) -> PluginGroup {
        match self {
            Plugin::Generator(_) => PluginGroup::Generator,
            Plugin::Provider(_) => PluginGroup::Provider,
            Plugin::SourceControl(_) => PluginGroup::SourceControl,
        }
    }

    /// The implementation's declared name.
    pub fn name(&self) -> &str {
        match self {
            Plugin::Generator(p) => p.name(),
            Plugin::Provider(p) => p.name(),
            Plugin::SourceControl(p) => p.name(),
        }
    }

    /// The implementation's declared capabilities.
    pub fn capabilities(&self) -> CapabilitySet {
        match self {
            Plugin::Generator(p) => p.capabilities(),
            Plugin::Provider(p) => p.capabilities(),
            Plugin::SourceControl(p) => p.capabilities(),
        }
    }

    /// The implementation's configuration schema.
    pub fn schema(&self) -> PluginSchema {
        match self {
            Plugin::Generator(p) => p.schema(),
            Plugin::Provider(p) => p.schema(),
            Plugin::SourceControl(p) => p.schema(),
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plugin({}:{})", self.group(), self.name())
    }
}

/// A discovered plugin: name, group and capabilities captured once, plus the
/// implementation used to probe and construct it.
#[derive(Clone)]
pub struct PluginDescriptor {
    group: PluginGroup,
    name: String,
    capabilities: CapabilitySet,
    sync_formats: Vec<SyncFormat>,
    plugin: Plugin,
}

impl PluginDescriptor {
    /// Snapshot a plugin implementation.
    pub fn new(plugin: Plugin) -> Self {
        let sync_formats = match &plugin {
            Plugin::Generator(p) => p.sync_formats(),
            _ => Vec::new(),
        };

        PluginDescriptor {
            group: plugin.group(),
            name: plugin.name().to_string(),
            capabilities: plugin.capabilities(),
            sync_formats,
            plugin,
        }
    }

    /// Plugin group.
    pub fn group(&self) -> PluginGroup {
        self.group
    }

    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared capabilities.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// The underlying implementation.
    pub fn plugin(&self) -> &Plugin {
        &self.plugin
    }

    /// Sync formats in preference order. Empty for non-generators.
    pub fn sync_formats(&self) -> &[SyncFormat] {
        &self.sync_formats
    }

    /// Check if this descriptor is a provider that supports `format`.
    pub fn supports(&self, format: &SyncFormat) -> bool {
        match &self.plugin {
            Plugin::Provider(p) => p.supports(format),
            _ => false,
        }
    }

    /// Check if this descriptor is a source-control plugin managing `path`.
    pub fn is_repository(&self, path: &Path) -> bool {
        match &self.plugin {
            Plugin::SourceControl(p) => p.is_repository(path),
            _ => false,
        }
    }

    /// Configuration schema of the implementation.
    pub fn schema(&self) -> PluginSchema {
        self.plugin.schema()
    }

    /// Generator implementation, if this is a generator.
    pub fn as_generator(&self) -> Option<&Arc<dyn GeneratorPlugin>> {
        match &self.plugin {
            Plugin::Generator(p) => Some(p),
            _ => None,
        }
    }

    /// Provider implementation, if this is a provider.
    pub fn as_provider(&self) -> Option<&Arc<dyn ProviderPlugin>> {
        match &self.plugin {
            Plugin::Provider(p) => Some(p),
            _ => None,
        }
    }

    /// Source-control implementation, if this is one.
    pub fn as_source_control(&self) -> Option<&Arc<dyn ScmPlugin>> {
        match &self.plugin {
            Plugin::SourceControl(p) => Some(p),
            _ => None,
        }
    }
}

impl PartialEq for PluginDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.name == other.name
    }
}

impl Eq for PluginDescriptor {}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("group", &self.group)
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .field("sync_formats", &self.sync_formats)
            .finish()
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.group, self.name)
    }
}
