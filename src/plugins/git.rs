//! Git source control - versions from release tags.

use std::path::{Path, PathBuf};

use anyhow::Result;
use git2::Repository;
use semver::Version;

use crate::config::{FieldKind, PluginSchema};
use crate::core::{CoreData, PluginData};
use crate::plugin::{ScmError, ScmPlugin, SourceControl};

/// Tag prefix stripped before parsing a tag as a version.
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// The built-in git plugin.
#[derive(Debug, Clone, Default)]
pub struct GitScm;

impl GitScm {
    pub fn new() -> Self {
        GitScm
    }
}

impl ScmPlugin for GitScm {
    fn name(&self) -> &str {
        "git"
    }

    fn is_repository(&self, path: &Path) -> bool {
        Repository::discover(path).is_ok()
    }

    fn extract_version(&self, path: &Path) -> Result<String, ScmError> {
        let repo = open(path)?;
        latest_tag_version(&repo, path, DEFAULT_TAG_PREFIX)
    }

    fn extract_configured_version(
        &self,
        path: &Path,
        data: &PluginData,
    ) -> Result<String, ScmError> {
        let repo = open(path)?;
        latest_tag_version(&repo, path, tag_prefix(data))
    }

    fn schema(&self) -> PluginSchema {
        PluginSchema::new().with_default("tag-prefix", FieldKind::String, DEFAULT_TAG_PREFIX)
    }

    fn create(
        &self,
        _core: &CoreData,
        data: PluginData,
        repository: &Path,
    ) -> Result<Box<dyn SourceControl>> {
        Ok(Box::new(GitSourceControl {
            repository: repository.to_path_buf(),
            tag_prefix: tag_prefix(&data).to_string(),
        }))
    }
}

/// A git binding for one repository.
#[derive(Debug, Clone)]
pub struct GitSourceControl {
    repository: PathBuf,
    tag_prefix: String,
}

impl SourceControl for GitSourceControl {
    fn name(&self) -> &str {
        "git"
    }

    fn repository(&self) -> &Path {
        &self.repository
    }

    fn version(&self) -> Result<String, ScmError> {
        let repo = open(&self.repository)?;
        latest_tag_version(&repo, &self.repository, &self.tag_prefix)
    }
}

fn tag_prefix(data: &PluginData) -> &str {
    data.get("tag-prefix")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_TAG_PREFIX)
}

fn open(path: &Path) -> Result<Repository, ScmError> {
    Repository::discover(path).map_err(|e| {
        if e.code() == git2::ErrorCode::NotFound {
            ScmError::NotARepository {
                path: path.to_path_buf(),
            }
        } else {
            ScmError::Backend(e.message().to_string())
        }
    })
}

/// Highest semver tag in the repository.
///
/// Tags may carry `prefix`; tags that do not parse as versions are ignored.
fn latest_tag_version(repo: &Repository, path: &Path, prefix: &str) -> Result<String, ScmError> {
    let tags = repo
        .tag_names(None)
        .map_err(|e| ScmError::Backend(e.message().to_string()))?;

    let latest = tags
        .iter()
        .flatten()
        .filter_map(|tag| {
            let raw = tag.strip_prefix(prefix).unwrap_or(tag);
            Version::parse(raw).ok()
        })
        .max();

    match latest {
        Some(version) => {
            tracing::debug!("Latest release tag in {} is {}", path.display(), version);
            Ok(version.to_string())
        }
        None => Err(ScmError::VersionUnavailable {
            path: path.to_path_buf(),
            reason: "no release tags found".to_string(),
        }),
    }
}
