//! Resolution error types and diagnostics.
//!
//! Every variant is a single, non-retryable failure: the build aborts and the
//! user fixes the condition (missing plugin, bad configuration) before trying
//! again.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::PluginGroup;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Which part of the configuration a schema error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConfigScope {
    /// `[tool.plinth]`
    Core,
    /// `[project]`
    Project,
    /// A plugin's own table
    Plugin(PluginGroup),
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Core => f.write_str("tool.plinth"),
            ConfigScope::Project => f.write_str("project"),
            ConfigScope::Plugin(group) => write!(f, "{}", group),
        }
    }
}

/// Error during plugin resolution.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("no {group} plugins found")]
    #[diagnostic(
        code(plinth::resolve::no_plugins),
        help("Make sure at least one plugin of this group is installed and registered")
    )]
    NoPluginsFound { group: PluginGroup },

    #[error("{group} plugin `{name}` not found")]
    #[diagnostic(
        code(plinth::resolve::plugin_not_found),
        help("Check the pinned plugin name in [tool.plinth]")
    )]
    PluginNotFound {
        group: PluginGroup,
        name: String,
        available: Vec<String>,
    },

    #[error("no compatible generator and provider")]
    #[diagnostic(
        code(plinth::resolve::no_compatible_plugins),
        help("Install a provider that supports a sync format one of the generators consumes")
    )]
    NoCompatiblePlugins {
        generators: Vec<String>,
        providers: Vec<String>,
    },

    #[error("invalid `{scope}` configuration: `{field}` {reason}")]
    #[diagnostic(code(plinth::config::schema))]
    SchemaValidation {
        scope: ConfigScope,
        field: String,
        reason: String,
    },
}

impl ResolveError {
    /// Shorthand for a schema validation failure.
    pub fn schema(scope: ConfigScope, field: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::SchemaValidation {
            scope,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = match self {
            ResolveError::NoPluginsFound { group } => {
                Diagnostic::error(format!("no {} plugins found", group))
                    .with_context(format!(
                        "a build needs at least one {} plugin, but discovery advertised none that passed validation",
                        group
                    ))
                    .with_suggestion(suggestions::LIST_PLUGINS)
                    .with_suggestion(format!("Install or register a {} plugin", group))
            }

            ResolveError::PluginNotFound {
                group,
                name,
                available,
            } => {
                let mut diag =
                    Diagnostic::error(format!("{} plugin `{}` not found", group, name));

                if !available.is_empty() {
                    diag = diag.with_context(format!(
                        "available {} plugins: {}",
                        group,
                        available.join(", ")
                    ));
                }

                diag.with_suggestion(format!(
                    "Fix or remove `{}` in [tool.plinth]",
                    group.pin_key()
                ))
            }

            ResolveError::NoCompatiblePlugins {
                generators,
                providers,
            } => Diagnostic::error("no compatible generator and provider")
                .with_context(format!("generators tried: {}", generators.join(", ")))
                .with_context(format!("providers tried: {}", providers.join(", ")))
                .with_suggestion(
                    "Install a provider that supports a sync format one of the generators consumes",
                )
                .with_suggestion("Pin a different generator with `generator-name` in [tool.plinth]"),

            ResolveError::SchemaValidation {
                scope,
                field,
                reason,
            } => Diagnostic::error(format!("invalid `{}` configuration", scope))
                .with_context(format!("`{}` {}", field, reason))
                .with_suggestion("Check the field in pyproject.toml against the plugin's documentation"),
        };

        if let Some(code) = MietteDiagnostic::code(self) {
            diag = diag.with_context(format!("code: {}", code));
        }

        diag
    }
}
