//! Resolved configuration handed to plugins.
//!
//! Everything here is built once per build by the configuration resolver and
//! is read-only afterwards. A configuration change means a new build, not a
//! mutation.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::group::PluginGroup;

/// Where the project lives and how loudly to talk about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectData {
    /// Project root directory (parent of the manifest)
    pub root: PathBuf,

    /// Path to the manifest the build was resolved from
    pub manifest: PathBuf,

    /// Verbosity level
    pub verbosity: u8,

    /// Debug mode
    pub debug: bool,
}

/// Tool-wide settings from `[tool.plinth]`, with paths made absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoreSettings {
    /// Where providers install shared tooling
    pub install_path: PathBuf,

    /// Project-local directory for generated tool files
    pub tool_path: PathBuf,

    /// Project-local build directory
    pub build_path: PathBuf,

    /// Pinned generator name
    pub generator_name: Option<String>,

    /// Pinned provider name
    pub provider_name: Option<String>,

    /// Pinned source-control plugin name
    pub scm_name: Option<String>,
}

impl CoreSettings {
    /// The pinned plugin name for a group, if any.
    pub fn pin(&self, group: PluginGroup) -> Option<&str> {
        match group {
            PluginGroup::Generator => self.generator_name.as_deref(),
            PluginGroup::Provider => self.provider_name.as_deref(),
            PluginGroup::SourceControl => self.scm_name.as_deref(),
        }
    }
}

/// PEP 621 package metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PepData {
    /// Distribution name
    pub name: String,

    /// Resolved version (absent only for an unresolved dynamic version)
    pub version: Option<String>,

    /// One-line summary
    pub description: String,

    /// Fields the project declares as dynamic
    pub dynamic: Vec<String>,
}

impl PepData {
    /// Check if a field is declared dynamic.
    pub fn is_dynamic(&self, field: &str) -> bool {
        self.dynamic.iter().any(|f| f == field)
    }
}

/// Project identity and tool settings shared by every plugin constructor.
///
/// Plugin-specific tables are deliberately not part of this structure; each
/// plugin receives only its own [`PluginData`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreData {
    project: ProjectData,
    settings: CoreSettings,
    pep: PepData,
}

impl CoreData {
    pub(crate) fn new(project: ProjectData, settings: CoreSettings, pep: PepData) -> Self {
        CoreData {
            project,
            settings,
            pep,
        }
    }

    /// Project location and verbosity.
    pub fn project(&self) -> &ProjectData {
        &self.project
    }

    /// Tool-wide settings.
    pub fn settings(&self) -> &CoreSettings {
        &self.settings
    }

    /// Package metadata.
    pub fn pep(&self) -> &PepData {
        &self.pep
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.project.root
    }
}

/// The merged, validated configuration table of one plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginData {
    group: PluginGroup,
    name: String,
    table: toml::Table,
}

impl PluginData {
    pub(crate) fn new(group: PluginGroup, name: impl Into<String>, table: toml::Table) -> Self {
        PluginData {
            group,
            name: name.into(),
            table,
        }
    }

    /// Group of the plugin this data belongs to.
    pub fn group(&self) -> PluginGroup {
        self.group
    }

    /// Name of the plugin this data belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw merged table.
    pub fn table(&self) -> &toml::Table {
        &self.table
    }

    /// Look up a single top-level field.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.table.get(key)
    }

    /// Deserialize the table into a plugin's typed configuration struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, toml::de::Error> {
        toml::Value::Table(self.table.clone()).try_into()
    }
}
