//! Read-only reports for `plinth plugins` and `plinth resolve`.

use std::path::PathBuf;

use serde::Serialize;

use crate::builder::BuildResult;
use crate::config::ResolvedConfiguration;
use crate::core::PluginGroup;
use crate::plugin::{CapabilitySet, PluginDescriptor};
use crate::registry::{PluginRegistry, RejectedPlugin};
use crate::resolver::{RepositorySummary, ResolvedPluginPair};
use crate::util::hash::Fingerprint;

/// Summary of one discovered plugin.
#[derive(Debug, Clone, Serialize)]
pub struct PluginSummary {
    /// Plugin group
    pub group: PluginGroup,

    /// Plugin name
    pub name: String,

    /// Declared operations
    pub capabilities: CapabilitySet,

    /// Sync formats consumed (generators only), best first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sync_formats: Vec<String>,
}

impl PluginSummary {
    /// Create a summary from a descriptor.
    pub fn from_descriptor(descriptor: &PluginDescriptor) -> Self {
        PluginSummary {
            group: descriptor.group(),
            name: descriptor.name().to_string(),
            capabilities: descriptor.capabilities().clone(),
            sync_formats: descriptor
                .sync_formats()
                .iter()
                .map(|f| f.as_str().to_string())
                .collect(),
        }
    }
}

/// Everything the registry knows, for listing.
#[derive(Debug, Clone, Serialize)]
pub struct PluginListing {
    pub plugins: Vec<PluginSummary>,
    pub rejected: Vec<RejectedPlugin>,
}

/// Summaries of accepted plugins, optionally limited to one group.
pub fn plugin_listing(registry: &PluginRegistry, group: Option<PluginGroup>) -> PluginListing {
    let wanted = |g: PluginGroup| group.map_or(true, |only| only == g);

    PluginListing {
        plugins: registry
            .all()
            .filter(|d| wanted(d.group()))
            .map(PluginSummary::from_descriptor)
            .collect(),
        rejected: registry
            .rejected()
            .iter()
            .filter(|r| wanted(r.group))
            .cloned()
            .collect(),
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub project: String,
    pub version: Option<String>,
    pub generator: String,
    pub provider: String,
    pub format: String,
    pub repository: Option<RepositorySummary>,
    pub install_path: PathBuf,
    pub tool_path: PathBuf,
    pub build_path: PathBuf,

    /// Stable hash of the resolved plugins and their configuration
    pub fingerprint: String,
}

impl ResolutionReport {
    /// Summarize a build result.
    pub fn from_result(result: &BuildResult) -> Self {
        let core = result.core();
        let settings = core.settings();

        ResolutionReport {
            project: core.pep().name.clone(),
            version: core.pep().version.clone(),
            generator: result.pair.generator().name().to_string(),
            provider: result.pair.provider().name().to_string(),
            format: result.pair.format().to_string(),
            repository: result.repository.as_ref().map(RepositorySummary::from),
            install_path: settings.install_path.clone(),
            tool_path: settings.tool_path.clone(),
            build_path: settings.build_path.clone(),
            fingerprint: fingerprint(&result.pair, &result.configuration),
        }
    }
}

/// Hash of the chosen plugins, format, version and plugin tables.
pub fn fingerprint(pair: &ResolvedPluginPair, configuration: &ResolvedConfiguration) -> String {
    let mut fp = Fingerprint::new();
    fp.update_str(pair.generator().name())
        .update_str(pair.provider().name())
        .update_str(pair.format().as_str())
        .update_opt(configuration.core.pep().version.as_deref())
        .update_table(configuration.generator.table())
        .update_table(configuration.provider.table());

    match &configuration.scm {
        Some(scm) => {
            fp.update_opt(Some(scm.name())).update_table(scm.table());
        }
        None => {
            fp.update_opt(None);
        }
    }

    fp.finish_short()
}
