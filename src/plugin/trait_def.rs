//! Plugin trait definitions.
//!
//! Each group has two traits. The descriptor-level trait (`GeneratorPlugin`,
//! `ProviderPlugin`, `ScmPlugin`) describes an implementation before any
//! project is known: its name, capabilities, schema, and the predicates the
//! solver needs. Its `create` method builds the instance-level trait object
//! (`Generator`, `Provider`, `SourceControl`) once configuration is resolved.
//!
//! Instance operations return `anyhow::Result`; failures are plugin-defined
//! and propagated without interpretation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

use crate::config::schema::PluginSchema;
use crate::core::{CoreData, PluginData, PluginGroup, SyncFormat};
use crate::plugin::capabilities::CapabilitySet;

/// Data a provider hands to a generator in an agreed format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncData {
    /// Format the payload is shaped as
    pub format: SyncFormat,

    /// Name of the provider that produced it
    pub provider: String,

    /// Format-specific payload
    pub payload: toml::Table,
}

impl SyncData {
    /// Create sync data with an empty payload.
    pub fn new(format: SyncFormat, provider: impl Into<String>) -> Self {
        SyncData {
            format,
            provider: provider.into(),
            payload: toml::Table::new(),
        }
    }

    /// Set a payload entry.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }
}

/// Errors raised by source-control plugins.
#[derive(Debug, Error)]
pub enum ScmError {
    /// The path is not managed by this source-control system.
    #[error("`{}` is not a repository", path.display())]
    NotARepository { path: PathBuf },

    /// The repository exists but no version could be derived from it.
    #[error("no version available for `{}`: {reason}", path.display())]
    VersionUnavailable { path: PathBuf, reason: String },

    /// The underlying VCS library failed.
    #[error("source control error: {0}")]
    Backend(String),
}

/// Descriptor-level contract of a generator implementation.
pub trait GeneratorPlugin: Send + Sync {
    /// Stable plugin name, unique within the generator group.
    fn name(&self) -> &str;

    /// Declared operations.
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::required(PluginGroup::Generator)
    }

    /// Sync formats this generator consumes, best first.
    fn sync_formats(&self) -> Vec<SyncFormat>;

    /// Configuration schema for `[tool.plinth.generators.<name>]`.
    fn schema(&self) -> PluginSchema {
        PluginSchema::new()
    }

    /// Build an instance bound to a resolved configuration.
    fn create(&self, core: &CoreData, data: PluginData) -> Result<Box<dyn Generator>>;
}

/// Descriptor-level contract of a provider implementation.
pub trait ProviderPlugin: Send + Sync {
    /// Stable plugin name, unique within the provider group.
    fn name(&self) -> &str;

    /// Declared operations.
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::required(PluginGroup::Provider)
    }

    /// Check if this provider can produce data in `format`.
    fn supports(&self, format: &SyncFormat) -> bool;

    /// Configuration schema for `[tool.plinth.providers.<name>]`.
    fn schema(&self) -> PluginSchema {
        PluginSchema::new()
    }

    /// Build an instance bound to a resolved configuration.
    fn create(&self, core: &CoreData, data: PluginData) -> Result<Box<dyn Provider>>;
}

/// Descriptor-level contract of a source-control implementation.
pub trait ScmPlugin: Send + Sync {
    /// Stable plugin name, unique within the source-control group.
    fn name(&self) -> &str;

    /// Declared operations.
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::required(PluginGroup::SourceControl)
    }

    /// Check if `path` is inside a repository this plugin manages.
    fn is_repository(&self, path: &Path) -> bool;

    /// Extract the project version from the repository at `path`.
    ///
    /// Returns [`ScmError::NotARepository`] when `is_repository(path)` is
    /// false; callers must guard.
    fn extract_version(&self, path: &Path) -> Result<String, ScmError>;

    /// Extract the project version using this plugin's resolved table.
    ///
    /// Plugins whose version lookup depends on configuration override this;
    /// the default ignores the table.
    fn extract_configured_version(
        &self,
        path: &Path,
        _data: &PluginData,
    ) -> Result<String, ScmError> {
        self.extract_version(path)
    }

    /// Configuration schema for `[tool.plinth.scm.<name>]`.
    fn schema(&self) -> PluginSchema {
        PluginSchema::new()
    }

    /// Build an instance bound to a resolved configuration and repository.
    fn create(
        &self,
        core: &CoreData,
        data: PluginData,
        repository: &Path,
    ) -> Result<Box<dyn SourceControl>>;
}

/// A configured generator.
pub trait Generator {
    /// Plugin name.
    fn name(&self) -> &str;

    /// Accept dependency data from the provider.
    fn sync(&mut self, data: &SyncData) -> Result<()>;

    /// Write whatever the generator needs for a first build.
    fn install(&mut self) -> Result<()>;

    /// Refresh generated state after dependencies changed.
    fn update(&mut self) -> Result<()>;

    /// Run the build.
    fn build(&mut self) -> Result<()>;
}

/// A configured provider.
pub trait Provider {
    /// Plugin name.
    fn name(&self) -> &str;

    /// Produce sync data in `format` for the generator.
    fn sync_data(&self, format: &SyncFormat) -> Result<SyncData>;

    /// Install dependencies.
    fn install(&mut self) -> Result<()>;

    /// Update dependencies.
    fn update(&mut self) -> Result<()>;
}

/// A configured source-control binding for one repository.
pub trait SourceControl {
    /// Plugin name.
    fn name(&self) -> &str;

    /// Repository path this instance is bound to.
    fn repository(&self) -> &Path;

    /// Current project version according to the repository.
    fn version(&self) -> Result<String, ScmError>;
}
