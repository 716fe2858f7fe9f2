//! User-facing diagnostics.
//!
//! Every error shown to the user carries the root cause, the context that
//! led to it, and at least one suggested fix where one exists.

use std::fmt;
use std::path::PathBuf;

use crate::builder::BuildFailure;
use crate::resolver::ResolveError;
use crate::util::context::ManifestError;

/// Common suggestion messages.
pub mod suggestions {
    /// No manifest was found from the working directory upward.
    pub const NO_MANIFEST: &str =
        "Run plinth from a directory containing pyproject.toml, or pass --manifest-path";

    /// Verbose output helps diagnose a plugin failure.
    pub const PLUGIN_FAILED: &str = "Run again with -v to see plugin log output";

    /// Listing discovered plugins.
    pub const LIST_PLUGINS: &str = "Run `plinth plugins` to see what was discovered";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(&self, color: bool) -> &'static str {
        match (self, color) {
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
            (Severity::Error, false) => "error",
            (Severity::Warning, false) => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(false))
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related file
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Warning, message)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Build a diagnostic from any error reaching the front end.
    ///
    /// Resolution failures get their dedicated rendering; anything else is
    /// shown as its context chain.
    pub fn from_error(error: &anyhow::Error) -> Self {
        if let Some(failure) = error.downcast_ref::<BuildFailure>() {
            return match failure.error.as_resolve() {
                Some(resolve) => resolve.to_diagnostic(),
                None => {
                    let mut diag = Diagnostic::error(failure.error.to_string())
                        .with_context(format!("stage: {}", failure.stage));
                    if let Some(source) = std::error::Error::source(&failure.error) {
                        diag = diag.with_context(source.to_string());
                    }
                    diag.with_suggestion(suggestions::PLUGIN_FAILED)
                }
            };
        }

        if let Some(resolve) = error.downcast_ref::<ResolveError>() {
            return resolve.to_diagnostic();
        }

        if let Some(manifest) = error.downcast_ref::<ManifestError>() {
            let diag = Diagnostic::error(manifest.to_string());
            return match manifest {
                ManifestError::NotFound { .. } => diag.with_suggestion(suggestions::NO_MANIFEST),
                ManifestError::Missing { path } => diag
                    .with_location(path.clone())
                    .with_suggestion(suggestions::NO_MANIFEST),
            };
        }

        let mut diag = Diagnostic::error(error.to_string());
        for cause in error.chain().skip(1) {
            diag = diag.with_context(cause.to_string());
        }
        diag
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = format!("{}: {}\n", self.severity.label(color), self.message);

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            output.push_str(&format!("{}: consider:\n", help));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
