//! Front-end supplied project configuration.

use std::path::{Path, PathBuf};

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "pyproject.toml";

/// What the front end knows about the project before resolution.
///
/// This is immutable input: the builder reads it but never changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfiguration {
    /// Path to the project's `pyproject.toml`
    pub pyproject_file: PathBuf,

    /// Verbosity level requested by the user (0 = normal)
    pub verbosity: u8,

    /// Debug mode
    pub debug: bool,

    /// Version supplied by the front end, taking precedence over any other source
    pub version_override: Option<String>,
}

impl ProjectConfiguration {
    /// Create a configuration for the given manifest.
    pub fn new(pyproject_file: impl Into<PathBuf>) -> Self {
        ProjectConfiguration {
            pyproject_file: pyproject_file.into(),
            verbosity: 0,
            debug: false,
            version_override: None,
        }
    }

    /// Set the verbosity level.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set debug mode.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set a version override.
    pub fn with_version_override(mut self, version: Option<String>) -> Self {
        self.version_override = version;
        self
    }

    /// Directory containing the manifest.
    pub fn project_root(&self) -> &Path {
        match self.pyproject_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// The `tracing` filter directive matching the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match (self.verbosity, self.debug) {
            (v, _) if v >= 2 => "plinth=trace",
            (1, _) | (_, true) => "plinth=debug",
            _ => "plinth=info",
        }
    }
}
