//! Build orchestration.
//!
//! The builder sequences discovery, selection, solving, SCM detection and
//! configuration resolution, then constructs the chosen plugins:
//!
//! ```text
//! Start → DiscoverPlugins → SelectOrDefer → SolvePair → SelectScm
//!       → ResolveConfiguration → ConstructInstances → Done
//! ```
//!
//! Any failure moves to `Failed` and carries the stage it happened in.
//! There are no retries and no partial results; a builder runs once.

pub mod stage;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{self, GlobalDefaults, ResolvedConfiguration};
use crate::core::{CoreData, PluginGroup, ProjectConfiguration};
use crate::plugin::{Generator, PluginDescriptor, Provider, SourceControl};
use crate::registry::PluginRegistry;
use crate::resolver::{
    select, select_repository, solve, RepositoryDescriptor, ResolveError, ResolvedPluginPair,
};

pub use stage::BuildStage;

/// Why a build failed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to construct {group} plugin `{name}`")]
    Plugin {
        group: PluginGroup,
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("builder already ran; create a new builder to retry")]
    AlreadyRan,
}

impl BuildError {
    /// The resolution error, if this is one.
    pub fn as_resolve(&self) -> Option<&ResolveError> {
        match self {
            BuildError::Resolve(e) => Some(e),
            _ => None,
        }
    }
}

/// A failed build and where it stopped.
#[derive(Debug, Error)]
#[error("build failed during {stage}")]
pub struct BuildFailure {
    /// Stage that failed
    pub stage: BuildStage,

    /// The originating error
    #[source]
    pub error: BuildError,

    /// Stages visited, ending with `Failed`
    pub history: Vec<BuildStage>,
}

/// A resolved build: configuration plus constructed plugin instances.
///
/// Plugin instances are owned exclusively by the result.
pub struct BuildResult {
    /// Resolved configuration the instances were built from
    pub configuration: ResolvedConfiguration,

    /// The solved generator/provider pair
    pub pair: ResolvedPluginPair,

    /// The matched repository, if any
    pub repository: Option<RepositoryDescriptor>,

    pub generator: Box<dyn Generator>,
    pub provider: Box<dyn Provider>,
    pub scm: Option<Box<dyn SourceControl>>,

    /// Span that scopes this build's log output
    pub span: tracing::Span,
}

impl BuildResult {
    /// Shared project data.
    pub fn core(&self) -> &CoreData {
        &self.configuration.core
    }
}

impl fmt::Debug for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildResult")
            .field("configuration", &self.configuration)
            .field("generator", &self.generator.name())
            .field("provider", &self.provider.name())
            .field("scm", &self.scm.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}

/// Single-use build orchestrator.
pub struct Builder {
    registry: Arc<PluginRegistry>,
    defaults: GlobalDefaults,
    stage: BuildStage,
    history: Vec<BuildStage>,
}

impl Builder {
    /// Create a builder over a populated registry.
    pub fn new(registry: Arc<PluginRegistry>, defaults: GlobalDefaults) -> Self {
        Builder {
            registry,
            defaults,
            stage: BuildStage::Start,
            history: vec![BuildStage::Start],
        }
    }

    /// Current stage.
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Stages visited so far.
    pub fn history(&self) -> &[BuildStage] {
        &self.history
    }

    /// Run the pipeline.
    pub fn build(
        &mut self,
        project: &ProjectConfiguration,
        document: &toml::Table,
    ) -> Result<BuildResult, BuildFailure> {
        if self.stage.is_terminal() {
            return Err(BuildFailure {
                stage: self.stage,
                error: BuildError::AlreadyRan,
                history: self.history.clone(),
            });
        }

        let span = tracing::info_span!(
            "build",
            project = %project.pyproject_file.display()
        );
        let mut result = span.in_scope(|| self.run(project, document))?;
        result.span = span;
        Ok(result)
    }

    fn run(
        &mut self,
        project: &ProjectConfiguration,
        document: &toml::Table,
    ) -> Result<BuildResult, BuildFailure> {
        let registry = Arc::clone(&self.registry);

        self.enter(BuildStage::DiscoverPlugins);
        let generators = registry
            .discover(PluginGroup::Generator)
            .map_err(|e| self.fail(e))?;
        let providers = registry
            .discover(PluginGroup::Provider)
            .map_err(|e| self.fail(e))?;
        let scms = match registry.discover(PluginGroup::SourceControl) {
            Ok(scms) => scms,
            Err(e) => {
                tracing::debug!("Continuing without source control: {}", e);
                Vec::new()
            }
        };

        self.enter(BuildStage::SelectOrDefer);
        let settings = config::resolve_core_settings(project, document, &self.defaults)
            .map_err(|e| self.fail(e))?;
        let generators = select(
            PluginGroup::Generator,
            generators,
            settings.pin(PluginGroup::Generator),
        )
        .map_err(|e| self.fail(e))?;
        let providers = select(
            PluginGroup::Provider,
            providers,
            settings.pin(PluginGroup::Provider),
        )
        .map_err(|e| self.fail(e))?;
        let scms = select(
            PluginGroup::SourceControl,
            scms,
            settings.pin(PluginGroup::SourceControl),
        )
        .map_err(|e| self.fail(e))?;

        self.enter(BuildStage::SolvePair);
        let pair = solve(&generators, &providers).map_err(|e| self.fail(e))?;
        tracing::info!(
            "Using generator `{}` with provider `{}` via `{}`",
            pair.generator().name(),
            pair.provider().name(),
            pair.format()
        );

        self.enter(BuildStage::SelectScm);
        let repository = select_repository(&scms, project.project_root());
        match &repository {
            Some(repo) => tracing::info!(
                "Using source control `{}` at {}",
                repo.source_control().name(),
                repo.path().display()
            ),
            None => tracing::debug!("No repository detected"),
        }

        self.enter(BuildStage::ResolveConfiguration);
        let configuration = config::resolve(
            project,
            document,
            &pair,
            repository.as_ref(),
            &self.defaults,
        )
        .map_err(|e| self.fail(e))?;

        self.enter(BuildStage::ConstructInstances);
        let core = &configuration.core;

        let generator = construct(pair.generator(), |plugin| {
            plugin
                .as_generator()
                .map(|g| g.create(core, configuration.generator.clone()))
        })
        .map_err(|e| self.fail(e))?;

        let provider = construct(pair.provider(), |plugin| {
            plugin
                .as_provider()
                .map(|p| p.create(core, configuration.provider.clone()))
        })
        .map_err(|e| self.fail(e))?;

        let scm = match (&repository, &configuration.scm) {
            (Some(repo), Some(data)) => Some(
                construct(repo.source_control(), |plugin| {
                    plugin
                        .as_source_control()
                        .map(|s| s.create(core, data.clone(), repo.path()))
                })
                .map_err(|e| self.fail(e))?,
            ),
            _ => None,
        };

        self.enter(BuildStage::Done);

        Ok(BuildResult {
            configuration,
            pair,
            repository,
            generator,
            provider,
            scm,
            span: tracing::Span::none(),
        })
    }

    fn enter(&mut self, stage: BuildStage) {
        tracing::debug!("Entering stage {}", stage);
        self.stage = stage;
        self.history.push(stage);
    }

    fn fail(&mut self, error: impl Into<BuildError>) -> BuildFailure {
        let stage = self.stage;
        let error = error.into();
        tracing::debug!("Stage {} failed: {}", stage, error);

        self.stage = BuildStage::Failed;
        self.history.push(BuildStage::Failed);

        BuildFailure {
            stage,
            error,
            history: self.history.clone(),
        }
    }
}

/// Run a descriptor's constructor, labelling failures with the plugin.
fn construct<T>(
    descriptor: &PluginDescriptor,
    create: impl FnOnce(&PluginDescriptor) -> Option<anyhow::Result<T>>,
) -> Result<T, BuildError> {
    let failed = |source: anyhow::Error| BuildError::Plugin {
        group: descriptor.group(),
        name: descriptor.name().to_string(),
        source,
    };

    match create(descriptor) {
        Some(Ok(instance)) => Ok(instance),
        Some(Err(e)) => Err(failed(e)),
        None => Err(failed(anyhow::anyhow!(
            "descriptor does not hold a {} implementation",
            descriptor.group()
        ))),
    }
}
