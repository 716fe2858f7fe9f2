//! Structural validation of discovered plugin candidates.
//!
//! A candidate is checked against the contract of the group it was
//! advertised under:
//! 1. Group - the implementation belongs to the advertised group
//! 2. Name - the name follows plugin naming rules
//! 3. Capabilities - every required operation is declared
//! 4. Formats - generators declare at least one sync format

use thiserror::Error;

use crate::core::PluginGroup;
use crate::plugin::{CapabilitySet, Operation, Plugin};

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateError {
    #[error("advertised as a {advertised} plugin but implements a {actual} plugin")]
    WrongGroup {
        advertised: PluginGroup,
        actual: PluginGroup,
    },

    #[error("invalid plugin name `{name}`: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("missing required operations: {}", join_operations(.missing))]
    MissingOperations { missing: Vec<Operation> },

    #[error("declares no sync formats")]
    NoSyncFormats,

    #[error("a {group} plugin named `{name}` is already registered")]
    Duplicate { group: PluginGroup, name: String },
}

fn join_operations(ops: &[Operation]) -> String {
    ops.iter()
        .map(|op| op.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a plugin name.
///
/// Plugin names must be:
/// - Non-empty
/// - First character must be [a-z]
/// - Characters: [a-z0-9_-]
pub fn validate_plugin_name(name: &str) -> Result<(), CandidateError> {
    let invalid = |reason: String| CandidateError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let Some(first_char) = name.chars().next() else {
        return Err(invalid("name cannot be empty".to_string()));
    };

    if !first_char.is_ascii_lowercase() {
        return Err(invalid("must start with lowercase letter [a-z]".to_string()));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '_' | '-'))
    {
        return Err(invalid(format!("only [a-z0-9_-] allowed, found '{}'", c)));
    }

    Ok(())
}

/// Validate a candidate advertised for `group`.
pub fn validate_candidate(group: PluginGroup, plugin: &Plugin) -> Result<(), CandidateError> {
    if plugin.group() != group {
        return Err(CandidateError::WrongGroup {
            advertised: group,
            actual: plugin.group(),
        });
    }

    validate_plugin_name(plugin.name())?;

    let missing = plugin
        .capabilities()
        .missing(&CapabilitySet::required(group));
    if !missing.is_empty() {
        return Err(CandidateError::MissingOperations { missing });
    }

    if let Plugin::Generator(generator) = plugin {
        if generator.sync_formats().is_empty() {
            return Err(CandidateError::NoSyncFormats);
        }
    }

    Ok(())
}
