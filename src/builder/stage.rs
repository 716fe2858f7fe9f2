//! Builder stages.

use std::fmt;

use serde::Serialize;

/// A step of the build pipeline.
///
/// Stages run strictly in declaration order. Any failure jumps to
/// [`BuildStage::Failed`], which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildStage {
    Start,
    DiscoverPlugins,
    SelectOrDefer,
    SolvePair,
    SelectScm,
    ResolveConfiguration,
    ConstructInstances,
    Done,
    Failed,
}

impl BuildStage {
    /// Get the stage name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStage::Start => "start",
            BuildStage::DiscoverPlugins => "discover-plugins",
            BuildStage::SelectOrDefer => "select-or-defer",
            BuildStage::SolvePair => "solve-pair",
            BuildStage::SelectScm => "select-scm",
            BuildStage::ResolveConfiguration => "resolve-configuration",
            BuildStage::ConstructInstances => "construct-instances",
            BuildStage::Done => "done",
            BuildStage::Failed => "failed",
        }
    }

    /// Check if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildStage::Done | BuildStage::Failed)
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
