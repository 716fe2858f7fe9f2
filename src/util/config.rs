//! User configuration files.
//!
//! plinth reads two configuration files:
//! - Global: `~/.plinth/config.toml` - user-wide defaults
//! - Project: `.plinth/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config. Both only feed the
//! lowest resolution layer; anything in `pyproject.toml` still wins.
//!
//! ```toml
//! [defaults]
//! install-path = "/opt/plinth"
//!
//! [defaults.provider]
//! cache = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::defaults::HOME_DIR_NAME;
use crate::config::{deep_merge, GlobalDefaults};
use crate::core::PluginGroup;

/// plinth configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults applied beneath project configuration
    pub defaults: DefaultsConfig,
}

/// The `[defaults]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DefaultsConfig {
    /// Where providers install shared tooling
    pub install_path: Option<PathBuf>,

    /// Defaults for every generator
    pub generator: toml::Table,

    /// Defaults for every provider
    pub provider: toml::Table,

    /// Defaults for every source-control plugin
    pub scm: toml::Table,
}

impl DefaultsConfig {
    fn group_mut(&mut self, group: PluginGroup) -> &mut toml::Table {
        match group {
            PluginGroup::Generator => &mut self.generator,
            PluginGroup::Provider => &mut self.provider,
            PluginGroup::SourceControl => &mut self.scm,
        }
    }

    /// Defaults for one group.
    pub fn group(&self, group: PluginGroup) -> &toml::Table {
        match group {
            PluginGroup::Generator => &self.generator,
            PluginGroup::Provider => &self.provider,
            PluginGroup::SourceControl => &self.scm,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is unusable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, mut other: Config) {
        if let Some(path) = other.defaults.install_path.take() {
            self.defaults.install_path = Some(path);
        }
        for group in PluginGroup::ALL {
            let incoming = std::mem::take(other.defaults.group_mut(group));
            deep_merge(self.defaults.group_mut(group), incoming);
        }
    }

    /// Overlay this configuration onto `base`.
    pub fn apply_to(&self, mut base: GlobalDefaults) -> GlobalDefaults {
        for group in PluginGroup::ALL {
            let table = self.defaults.group(group);
            if !table.is_empty() {
                base.overlay(group, table.clone());
            }
        }
        if let Some(path) = &self.defaults.install_path {
            base.set_install_path(path);
        }
        base
    }

    /// Built-in defaults with this configuration applied.
    pub fn global_defaults(&self) -> GlobalDefaults {
        self.apply_to(GlobalDefaults::builtin())
    }
}

/// Load and merge global and project configuration.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.plinth/config.toml)
/// 2. Global config (~/.plinth/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the project config path (.plinth/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(HOME_DIR_NAME).join("config.toml")
}
