//! Plugin capability declarations.
//!
//! Capabilities are immutable facts about what a plugin implementation can
//! do. The registry checks them structurally against the contract of the
//! group the plugin is advertised under; inheritance plays no part.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::PluginGroup;

/// One operation a plugin may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Reports a stable plugin name
    Name,
    /// Lists consumable sync formats (generators)
    SyncFormats,
    /// Installs dependencies or generated files
    Install,
    /// Updates dependencies or generated files
    Update,
    /// Runs a build (generators)
    Build,
    /// Answers whether a sync format can be produced (providers)
    Supports,
    /// Produces sync data for a generator (providers)
    SyncData,
    /// Recognizes a path as a managed repository (source control)
    IsRepository,
    /// Extracts a version string from a repository (source control)
    ExtractVersion,
}

impl Operation {
    /// Get the operation name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Name => "name",
            Operation::SyncFormats => "sync-formats",
            Operation::Install => "install",
            Operation::Update => "update",
            Operation::Build => "build",
            Operation::Supports => "supports",
            Operation::SyncData => "sync-data",
            Operation::IsRepository => "is-repository",
            Operation::ExtractVersion => "extract-version",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of operations a plugin declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    operations: BTreeSet<Operation>,
}

impl CapabilitySet {
    /// Create an empty capability set.
    pub fn new() -> Self {
        CapabilitySet::default()
    }

    /// Create a set from a list of operations.
    pub fn of(operations: &[Operation]) -> Self {
        CapabilitySet {
            operations: operations.iter().copied().collect(),
        }
    }

    /// The full contract every plugin of `group` must expose.
    pub fn required(group: PluginGroup) -> Self {
        match group {
            PluginGroup::Generator => CapabilitySet::of(&[
                Operation::Name,
                Operation::SyncFormats,
                Operation::Install,
                Operation::Update,
                Operation::Build,
            ]),
            PluginGroup::Provider => CapabilitySet::of(&[Operation::Name, Operation::Supports]),
            PluginGroup::SourceControl => CapabilitySet::of(&[
                Operation::Name,
                Operation::IsRepository,
                Operation::ExtractVersion,
            ]),
        }
    }

    /// Add an operation.
    pub fn with(mut self, operation: Operation) -> Self {
        self.operations.insert(operation);
        self
    }

    /// Check if an operation is declared.
    pub fn contains(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Operations in `required` that this set does not declare, in order.
    pub fn missing(&self, required: &CapabilitySet) -> Vec<Operation> {
        required
            .operations
            .difference(&self.operations)
            .copied()
            .collect()
    }

    /// Check if this set satisfies the full contract of `group`.
    pub fn satisfies(&self, group: PluginGroup) -> bool {
        self.missing(&CapabilitySet::required(group)).is_empty()
    }

    /// Iterate declared operations in order.
    pub fn iter(&self) -> impl Iterator<Item = Operation> + '_ {
        self.operations.iter().copied()
    }

    /// Number of declared operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.operations.iter().map(|op| op.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}
