//! Plugin capability groups.

use serde::{Deserialize, Serialize};

/// The three interchangeable plugin families a build is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginGroup {
    /// Emits build-system configuration from resolved project data
    Generator,
    /// Supplies dependency data in a format a generator can consume
    Provider,
    /// Detects and queries a version-control repository
    #[serde(rename = "scm", alias = "source-control")]
    SourceControl,
}

impl PluginGroup {
    /// All groups, in the order a build discovers them.
    pub const ALL: [PluginGroup; 3] = [
        PluginGroup::Generator,
        PluginGroup::Provider,
        PluginGroup::SourceControl,
    ];

    /// Get the group name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginGroup::Generator => "generator",
            PluginGroup::Provider => "provider",
            PluginGroup::SourceControl => "scm",
        }
    }

    /// Name of the `[tool.plinth.<section>]` table holding per-plugin
    /// declarations for this group.
    pub fn section(&self) -> &'static str {
        match self {
            PluginGroup::Generator => "generators",
            PluginGroup::Provider => "providers",
            PluginGroup::SourceControl => "scm",
        }
    }

    /// Key in `[tool.plinth]` used to pin a plugin of this group by name.
    pub fn pin_key(&self) -> &'static str {
        match self {
            PluginGroup::Generator => "generator-name",
            PluginGroup::Provider => "provider-name",
            PluginGroup::SourceControl => "scm-name",
        }
    }
}

impl std::fmt::Display for PluginGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PluginGroup {
    type Err = PluginGroupParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generator" | "generators" => Ok(PluginGroup::Generator),
            "provider" | "providers" => Ok(PluginGroup::Provider),
            "scm" | "source-control" | "sourcecontrol" => Ok(PluginGroup::SourceControl),
            _ => Err(PluginGroupParseError(s.to_string())),
        }
    }
}

/// Error parsing a plugin group name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown plugin group `{0}`, expected one of: generator, provider, scm")]
pub struct PluginGroupParseError(pub String);
