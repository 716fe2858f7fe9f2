//! Compatibility solving.
//!
//! The generator/provider solve is greedy and order-stable: generators in
//! discovery order, then providers in discovery order, then the generator's
//! sync formats in its preference order. The first provider that supports a
//! format wins. Ties are broken purely by discovery order, so the same
//! candidate sequences always yield the same pair.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::SyncFormat;
use crate::plugin::PluginDescriptor;
use crate::resolver::errors::ResolveError;

/// A generator and provider that share at least one sync format.
#[derive(Debug, Clone)]
pub struct ResolvedPluginPair {
    generator: PluginDescriptor,
    provider: PluginDescriptor,
    format: SyncFormat,
}

impl ResolvedPluginPair {
    /// The chosen generator.
    pub fn generator(&self) -> &PluginDescriptor {
        &self.generator
    }

    /// The chosen provider.
    pub fn provider(&self) -> &PluginDescriptor {
        &self.provider
    }

    /// The sync format that made the pair compatible.
    pub fn format(&self) -> &SyncFormat {
        &self.format
    }
}

/// A source-control plugin that recognized the project path.
#[derive(Debug, Clone)]
pub struct RepositoryDescriptor {
    source_control: PluginDescriptor,
    path: PathBuf,
}

impl RepositoryDescriptor {
    /// The source-control plugin managing the repository.
    pub fn source_control(&self) -> &PluginDescriptor {
        &self.source_control
    }

    /// The probed project path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serializable summary of a repository match.
#[derive(Debug, Clone, Serialize)]
pub struct RepositorySummary {
    pub plugin: String,
    pub path: PathBuf,
}

impl From<&RepositoryDescriptor> for RepositorySummary {
    fn from(repo: &RepositoryDescriptor) -> Self {
        RepositorySummary {
            plugin: repo.source_control.name().to_string(),
            path: repo.path.clone(),
        }
    }
}

/// Find the first compatible (generator, provider) pair.
pub fn solve(
    generators: &[PluginDescriptor],
    providers: &[PluginDescriptor],
) -> Result<ResolvedPluginPair, ResolveError> {
    for generator in generators {
        for provider in providers {
            for format in generator.sync_formats() {
                if provider.supports(format) {
                    tracing::debug!(
                        "Generator `{}` and provider `{}` agree on format `{}`",
                        generator.name(),
                        provider.name(),
                        format
                    );
                    return Ok(ResolvedPluginPair {
                        generator: generator.clone(),
                        provider: provider.clone(),
                        format: format.clone(),
                    });
                }
            }
            tracing::trace!(
                "Generator `{}` and provider `{}` share no format",
                generator.name(),
                provider.name()
            );
        }
    }

    Err(ResolveError::NoCompatiblePlugins {
        generators: generators.iter().map(|g| g.name().to_string()).collect(),
        providers: providers.iter().map(|p| p.name().to_string()).collect(),
    })
}

/// Find the first source-control plugin that recognizes `path`.
///
/// Returns `None` when no candidate does; an unmanaged project is an
/// expected state, not an error.
pub fn select_repository(
    candidates: &[PluginDescriptor],
    path: &Path,
) -> Option<RepositoryDescriptor> {
    let found = candidates.iter().find(|scm| scm.is_repository(path));

    match found {
        Some(scm) => {
            tracing::debug!("`{}` recognizes {} as a repository", scm.name(), path.display());
            Some(RepositoryDescriptor {
                source_control: scm.clone(),
                path: path.to_path_buf(),
            })
        }
        None => {
            tracing::debug!("No source control recognizes {}", path.display());
            None
        }
    }
}
