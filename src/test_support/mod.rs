//! Test utilities and mocks for plinth unit tests.
//!
//! Mock generator, provider, and source-control plugins with configurable
//! names, formats, capabilities, and schemas. Instances record what they
//! were asked to do in a shared [`CallLog`].
//!
//! # Example
//!
//! ```rust,ignore
//! use plinth::test_support::{CallLog, MockGenerator, MockProvider};
//!
//! let log = CallLog::new();
//! let discovery = StaticDiscovery::new()
//!     .with_plugin(Plugin::generator(MockGenerator::new("cmake", &["cmake"]).with_log(&log)))
//!     .with_plugin(Plugin::provider(MockProvider::new("vcpkg", &["cmake"]).with_log(&log)));
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::config::PluginSchema;
use crate::core::{CoreData, PluginData, PluginGroup, SyncFormat};
use crate::plugin::{
    CapabilitySet, Generator, GeneratorPlugin, Provider, ProviderPlugin, ScmError, ScmPlugin,
    SourceControl, SyncData,
};

pub use fixtures::*;

/// Shared, ordered record of mock operations.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        CallLog::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.into());
    }

    /// All entries so far.
    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

fn formats(names: &[&str]) -> Vec<SyncFormat> {
    names.iter().map(|n| SyncFormat::new(*n)).collect()
}

/// Mock generator plugin.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    name: String,
    formats: Vec<SyncFormat>,
    capabilities: CapabilitySet,
    schema: PluginSchema,
    fail_create: bool,
    log: CallLog,
}

impl MockGenerator {
    /// A generator consuming `formats`, best first.
    pub fn new(name: &str, sync_formats: &[&str]) -> Self {
        MockGenerator {
            name: name.to_string(),
            formats: formats(sync_formats),
            capabilities: CapabilitySet::required(PluginGroup::Generator),
            schema: PluginSchema::new(),
            fail_create: false,
            log: CallLog::new(),
        }
    }

    /// Override declared capabilities.
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the configuration schema.
    pub fn with_schema(mut self, schema: PluginSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Make `create` fail.
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Record operations into `log`.
    pub fn with_log(mut self, log: &CallLog) -> Self {
        self.log = log.clone();
        self
    }
}

impl GeneratorPlugin for MockGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> CapabilitySet {
        self.capabilities.clone()
    }

    fn sync_formats(&self) -> Vec<SyncFormat> {
        self.formats.clone()
    }

    fn schema(&self) -> PluginSchema {
        self.schema.clone()
    }

    fn create(&self, _core: &CoreData, data: PluginData) -> Result<Box<dyn Generator>> {
        if self.fail_create {
            bail!("generator `{}` refused to start", self.name);
        }
        self.log.record(format!("generator:{}:create", self.name));
        Ok(Box::new(MockGeneratorInstance {
            name: self.name.clone(),
            data,
            log: self.log.clone(),
        }))
    }
}

/// Instance created by [`MockGenerator`].
#[derive(Debug)]
pub struct MockGeneratorInstance {
    name: String,
    data: PluginData,
    log: CallLog,
}

impl MockGeneratorInstance {
    /// Configuration the instance was created with.
    pub fn data(&self) -> &PluginData {
        &self.data
    }
}

impl Generator for MockGeneratorInstance {
    fn name(&self) -> &str {
        &self.name
    }

    fn sync(&mut self, data: &SyncData) -> Result<()> {
        self.log.record(format!(
            "generator:{}:sync:{}:{}",
            self.name, data.format, data.provider
        ));
        Ok(())
    }

    fn install(&mut self) -> Result<()> {
        self.log.record(format!("generator:{}:install", self.name));
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        self.log.record(format!("generator:{}:update", self.name));
        Ok(())
    }

    fn build(&mut self) -> Result<()> {
        self.log.record(format!("generator:{}:build", self.name));
        Ok(())
    }
}

/// Mock provider plugin.
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: String,
    formats: Vec<SyncFormat>,
    capabilities: CapabilitySet,
    schema: PluginSchema,
    fail_install: bool,
    log: CallLog,
}

impl MockProvider {
    /// A provider producing `formats`.
    pub fn new(name: &str, sync_formats: &[&str]) -> Self {
        MockProvider {
            name: name.to_string(),
            formats: formats(sync_formats),
            capabilities: CapabilitySet::required(PluginGroup::Provider),
            schema: PluginSchema::new(),
            fail_install: false,
            log: CallLog::new(),
        }
    }

    /// Override declared capabilities.
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the configuration schema.
    pub fn with_schema(mut self, schema: PluginSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Make `install` and `update` fail.
    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    /// Record operations into `log`.
    pub fn with_log(mut self, log: &CallLog) -> Self {
        self.log = log.clone();
        self
    }
}

impl ProviderPlugin for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> CapabilitySet {
        self.capabilities.clone()
    }

    fn supports(&self, format: &SyncFormat) -> bool {
        self.formats.contains(format)
    }

    fn schema(&self) -> PluginSchema {
        self.schema.clone()
    }

    fn create(&self, _core: &CoreData, data: PluginData) -> Result<Box<dyn Provider>> {
        self.log.record(format!("provider:{}:create", self.name));
        Ok(Box::new(MockProviderInstance {
            name: self.name.clone(),
            formats: self.formats.clone(),
            data,
            fail_install: self.fail_install,
            log: self.log.clone(),
        }))
    }
}

/// Instance created by [`MockProvider`].
#[derive(Debug)]
pub struct MockProviderInstance {
    name: String,
    formats: Vec<SyncFormat>,
    data: PluginData,
    fail_install: bool,
    log: CallLog,
}

impl MockProviderInstance {
    /// Configuration the instance was created with.
    pub fn data(&self) -> &PluginData {
        &self.data
    }
}

impl Provider for MockProviderInstance {
    fn name(&self) -> &str {
        &self.name
    }

    fn sync_data(&self, format: &SyncFormat) -> Result<SyncData> {
        if !self.formats.contains(format) {
            bail!("provider `{}` cannot produce `{}`", self.name, format);
        }
        self.log
            .record(format!("provider:{}:sync-data:{}", self.name, format));
        Ok(SyncData::new(format.clone(), self.name.clone()).with_entry("source", "mock"))
    }

    fn install(&mut self) -> Result<()> {
        if self.fail_install {
            bail!("provider `{}` failed to install", self.name);
        }
        self.log.record(format!("provider:{}:install", self.name));
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        if self.fail_install {
            bail!("provider `{}` failed to update", self.name);
        }
        self.log.record(format!("provider:{}:update", self.name));
        Ok(())
    }
}

/// Mock source-control plugin.
///
/// Recognizes paths under its configured repository root, if any.
#[derive(Debug, Clone)]
pub struct MockScm {
    name: String,
    repository: Option<PathBuf>,
    version: Option<String>,
    schema: PluginSchema,
}

impl MockScm {
    /// A source-control plugin that recognizes nothing.
    pub fn new(name: &str) -> Self {
        MockScm {
            name: name.to_string(),
            repository: None,
            version: None,
            schema: PluginSchema::new(),
        }
    }

    /// Recognize paths under `root`.
    pub fn with_repository(mut self, root: impl AsRef<Path>) -> Self {
        self.repository = Some(root.as_ref().to_path_buf());
        self
    }

    /// Version reported for recognized repositories.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Set the configuration schema.
    pub fn with_schema(mut self, schema: PluginSchema) -> Self {
        self.schema = schema;
        self
    }
}

impl ScmPlugin for MockScm {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_repository(&self, path: &Path) -> bool {
        self.repository
            .as_ref()
            .is_some_and(|root| path.starts_with(root))
    }

    fn extract_version(&self, path: &Path) -> Result<String, ScmError> {
        if !self.is_repository(path) {
            return Err(ScmError::NotARepository {
                path: path.to_path_buf(),
            });
        }
        self.version
            .clone()
            .ok_or_else(|| ScmError::VersionUnavailable {
                path: path.to_path_buf(),
                reason: "no tags".to_string(),
            })
    }

    fn schema(&self) -> PluginSchema {
        self.schema.clone()
    }

    fn create(
        &self,
        _core: &CoreData,
        _data: PluginData,
        repository: &Path,
    ) -> Result<Box<dyn SourceControl>> {
        Ok(Box::new(MockSourceControl {
            name: self.name.clone(),
            repository: repository.to_path_buf(),
            version: self.version.clone(),
        }))
    }
}

/// Instance created by [`MockScm`].
#[derive(Debug)]
pub struct MockSourceControl {
    name: String,
    repository: PathBuf,
    version: Option<String>,
}

impl SourceControl for MockSourceControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn repository(&self) -> &Path {
        &self.repository
    }

    fn version(&self) -> Result<String, ScmError> {
        self.version
            .clone()
            .ok_or_else(|| ScmError::VersionUnavailable {
                path: self.repository.clone(),
                reason: "no tags".to_string(),
            })
    }
}
