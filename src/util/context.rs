//! Global context for plinth operations.
//!
//! Provides centralized access to the working directory, the user's plinth
//! home, and front-end flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use thiserror::Error;

use crate::config::defaults::HOME_DIR_NAME;
use crate::core::{ProjectConfiguration, MANIFEST_NAME};
use crate::util::config::{load_config, project_config_path, Config};

/// Failure to locate the project manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `pyproject.toml` in `{}` or any parent directory", dir.display())]
    NotFound { dir: PathBuf },

    #[error("manifest `{}` does not exist", path.display())]
    Missing { path: PathBuf },
}

/// Global context containing paths and front-end flags.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for plinth's user data (~/.plinth/)
    home: PathBuf,

    /// Verbosity level
    verbosity: u8,

    /// Debug mode
    debug: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a context rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(HOME_DIR_NAME))
            .unwrap_or_else(|| cwd.join(HOME_DIR_NAME));

        GlobalContext {
            cwd,
            home,
            verbosity: 0,
            debug: false,
            color: true,
        }
    }

    /// Override the plinth home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Set the verbosity level.
    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.verbosity = verbosity;
    }

    /// Set debug mode.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the plinth home directory (~/.plinth/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find `pyproject.toml` starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        let mut current = self.cwd.clone();
        loop {
            let candidate = current.join(MANIFEST_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !current.pop() {
                return Err(ManifestError::NotFound {
                    dir: self.cwd.clone(),
                });
            }
        }
    }

    /// Resolve the manifest to use: an explicit path relative to cwd, or
    /// the nearest one found upward.
    pub fn manifest_path(&self, explicit: Option<&Path>) -> Result<PathBuf, ManifestError> {
        match explicit {
            Some(path) => {
                let path = self.cwd.join(path);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ManifestError::Missing { path })
                }
            }
            None => self.find_manifest(),
        }
    }

    /// Front-end project configuration for a manifest.
    pub fn project_configuration(
        &self,
        manifest: PathBuf,
        version_override: Option<String>,
    ) -> ProjectConfiguration {
        ProjectConfiguration::new(manifest)
            .with_verbosity(self.verbosity)
            .with_debug(self.debug)
            .with_version_override(version_override)
    }

    /// Load global and project user configuration.
    pub fn load_config(&self, project_root: &Path) -> Config {
        load_config(Some(&self.config_path()), &project_config_path(project_root))
    }
}
