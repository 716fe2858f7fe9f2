//! Plugin registry - validated plugin candidates per group.
//!
//! Key principle: a broken third-party plugin must not block the others.
//! Candidates failing validation are logged and dropped; only an empty group
//! is an error, and only when a build asks for that group.
//!
//! The process-wide registry is populated at most once, on first use, and is
//! read-only afterwards. Newly installed plugins are picked up by restarting
//! the process; [`reset_global`] exists for test isolation.

pub mod discovery;
pub mod validation;

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, RwLock};

use serde::Serialize;

use crate::core::PluginGroup;
use crate::plugin::{Plugin, PluginDescriptor};
use crate::resolver::ResolveError;

pub use discovery::{PluginDiscovery, StaticDiscovery};
pub use validation::{validate_candidate, validate_plugin_name, CandidateError};

/// A candidate that discovery advertised but validation rejected.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedPlugin {
    /// Group the candidate was advertised under
    pub group: PluginGroup,

    /// Candidate's declared name
    pub name: String,

    /// Why it was dropped
    pub reason: String,
}

/// Registry of discovered, validated plugins.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    groups: BTreeMap<PluginGroup, Vec<PluginDescriptor>>,
    rejected: Vec<RejectedPlugin>,
}

impl PluginRegistry {
    /// Populate a registry from a discovery provider.
    ///
    /// This never fails; invalid candidates are excluded with a warning.
    pub fn load(discovery: &dyn PluginDiscovery) -> Self {
        let mut registry = PluginRegistry::default();

        for group in PluginGroup::ALL {
            let mut candidates = discovery.load(group);
            if !discovery.is_ordered() {
                candidates.sort_by(|a, b| a.name().cmp(b.name()));
            }

            let accepted = registry.admit(group, candidates);
            tracing::debug!("Discovered {} {} plugin(s)", accepted.len(), group);
            registry.groups.insert(group, accepted);
        }

        registry
    }

    fn admit(&mut self, group: PluginGroup, candidates: Vec<Plugin>) -> Vec<PluginDescriptor> {
        let mut accepted: Vec<PluginDescriptor> = Vec::with_capacity(candidates.len());

        for plugin in candidates {
            let verdict = validate_candidate(group, &plugin).and_then(|()| {
                if accepted.iter().any(|d| d.name() == plugin.name()) {
                    Err(CandidateError::Duplicate {
                        group,
                        name: plugin.name().to_string(),
                    })
                } else {
                    Ok(())
                }
            });

            match verdict {
                Ok(()) => accepted.push(PluginDescriptor::new(plugin)),
                Err(e) => {
                    tracing::warn!("Ignoring {} plugin `{}`: {}", group, plugin.name(), e);
                    self.rejected.push(RejectedPlugin {
                        group,
                        name: plugin.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        accepted
    }

    /// Candidates for a group, in discovery order.
    ///
    /// Fails with [`ResolveError::NoPluginsFound`] if the group is empty.
    pub fn discover(&self, group: PluginGroup) -> Result<Vec<PluginDescriptor>, ResolveError> {
        let candidates = self.candidates(group);
        if candidates.is_empty() {
            return Err(ResolveError::NoPluginsFound { group });
        }
        Ok(candidates.to_vec())
    }

    /// Candidates for a group; empty if none were discovered.
    pub fn candidates(&self, group: PluginGroup) -> &[PluginDescriptor] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a plugin by group and name.
    pub fn get(&self, group: PluginGroup, name: &str) -> Option<&PluginDescriptor> {
        self.candidates(group).iter().find(|d| d.name() == name)
    }

    /// All accepted plugins, grouped in group order.
    pub fn all(&self) -> impl Iterator<Item = &PluginDescriptor> + '_ {
        self.groups.values().flatten()
    }

    /// Candidates dropped during validation.
    pub fn rejected(&self) -> &[RejectedPlugin] {
        &self.rejected
    }

    /// Total number of accepted plugins.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Check if no plugins were accepted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-wide registry slot.
static GLOBAL: LazyLock<RwLock<Option<Arc<PluginRegistry>>>> =
    LazyLock::new(|| RwLock::new(None));

/// Get the process-wide registry, populating it from `discovery` on first use.
///
/// The first caller wins: once populated, later `discovery` arguments are
/// ignored and the cached registry is returned.
pub fn global(discovery: &dyn PluginDiscovery) -> Arc<PluginRegistry> {
    {
        let slot = GLOBAL.read().unwrap_or_else(|e| e.into_inner());
        if let Some(registry) = slot.as_ref() {
            return Arc::clone(registry);
        }
    }

    let mut slot = GLOBAL.write().unwrap_or_else(|e| e.into_inner());

    // Double-check after acquiring write lock
    if let Some(registry) = slot.as_ref() {
        return Arc::clone(registry);
    }

    let registry = Arc::new(PluginRegistry::load(discovery));
    *slot = Some(Arc::clone(&registry));
    registry
}

/// Drop the process-wide registry so the next [`global`] call repopulates it.
///
/// Intended for test isolation only.
pub fn reset_global() {
    let mut slot = GLOBAL.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}
