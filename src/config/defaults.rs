//! Global defaults, the lowest configuration layer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::config::merge::deep_merge;
use crate::core::PluginGroup;

/// Directory under the home directory holding plinth's user state.
pub const HOME_DIR_NAME: &str = ".plinth";

/// Default tables applied beneath every plugin's project configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalDefaults {
    groups: BTreeMap<PluginGroup, toml::Table>,
    install_path: Option<PathBuf>,
}

impl GlobalDefaults {
    /// Defaults with no values at all.
    pub fn new() -> Self {
        GlobalDefaults::default()
    }

    /// Hard-coded defaults.
    ///
    /// Group tables start empty; the install path is `~/.plinth/install`
    /// when a home directory is known.
    pub fn builtin() -> Self {
        let install_path = BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(HOME_DIR_NAME).join("install"));

        GlobalDefaults {
            groups: BTreeMap::new(),
            install_path,
        }
    }

    /// Default table for a group; empty when none is set.
    pub fn group(&self, group: PluginGroup) -> toml::Table {
        self.groups.get(&group).cloned().unwrap_or_default()
    }

    /// Set one default value for a group.
    pub fn with_value(
        mut self,
        group: PluginGroup,
        key: impl Into<String>,
        value: impl Into<toml::Value>,
    ) -> Self {
        self.groups
            .entry(group)
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Deep-merge `table` over the current defaults of `group`.
    pub fn overlay(&mut self, group: PluginGroup, table: toml::Table) {
        deep_merge(self.groups.entry(group).or_default(), table);
    }

    /// Default install path, if one is known.
    pub fn install_path(&self) -> Option<&Path> {
        self.install_path.as_deref()
    }

    /// Replace the default install path.
    pub fn with_install_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.install_path = Some(path.into());
        self
    }

    /// Replace the default install path in place.
    pub fn set_install_path(&mut self, path: impl Into<PathBuf>) {
        self.install_path = Some(path.into());
    }
}
