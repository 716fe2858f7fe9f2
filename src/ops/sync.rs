//! Implementation of `plinth install` and `plinth update`.
//!
//! Both run the same sequence once resolution has succeeded: the provider
//! acquires dependencies, hands the generator sync data in the solved
//! format, and the generator refreshes its own state.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::builder::BuildResult;
use crate::ops::resolve::{resolve_project, ResolveOptions};
use crate::registry::PluginRegistry;
use crate::util::GlobalContext;

/// Which plugin operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Install,
    Update,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Install => f.write_str("install"),
            SyncMode::Update => f.write_str("update"),
        }
    }
}

/// Run provider, sync, and generator steps on a resolved build.
pub fn sync_project(result: &mut BuildResult, mode: SyncMode) -> Result<()> {
    let span = result.span.clone();
    let _guard = span.enter();

    let provider = result.provider.name().to_string();
    let generator = result.generator.name().to_string();

    tracing::info!("Running {} with provider `{}`", mode, provider);
    let acquired = match mode {
        SyncMode::Install => result.provider.install(),
        SyncMode::Update => result.provider.update(),
    };
    acquired.with_context(|| format!("provider `{}` failed to {}", provider, mode))?;

    let format = result.pair.format().clone();
    let data = result
        .provider
        .sync_data(&format)
        .with_context(|| format!("provider `{}` failed to produce `{}` data", provider, format))?;

    result
        .generator
        .sync(&data)
        .with_context(|| format!("generator `{}` rejected `{}` data", generator, format))?;

    tracing::info!("Running {} with generator `{}`", mode, generator);
    let generated = match mode {
        SyncMode::Install => result.generator.install(),
        SyncMode::Update => result.generator.update(),
    };
    generated.with_context(|| format!("generator `{}` failed to {}", generator, mode))?;

    Ok(())
}

/// Resolve the project, then install.
pub fn install(
    ctx: &GlobalContext,
    registry: Arc<PluginRegistry>,
    opts: &ResolveOptions,
) -> Result<BuildResult> {
    let mut result = resolve_project(ctx, registry, opts)?;
    sync_project(&mut result, SyncMode::Install)?;
    Ok(result)
}

/// Resolve the project, then update.
pub fn update(
    ctx: &GlobalContext,
    registry: Arc<PluginRegistry>,
    opts: &ResolveOptions,
) -> Result<BuildResult> {
    let mut result = resolve_project(ctx, registry, opts)?;
    sync_project(&mut result, SyncMode::Update)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::Plugin;
    use crate::registry::StaticDiscovery;
    use crate::test_support::{CallLog, MockGenerator, MockProvider, PyprojectFixture};
    use tempfile::TempDir;

    fn setup(provider: MockProvider, log: &CallLog) -> (TempDir, GlobalContext, Arc<PluginRegistry>) {
        let tmp = TempDir::new().unwrap();
        PyprojectFixture::new("app", "1.0.0")
            .write_to(tmp.path())
            .unwrap();

        let discovery = StaticDiscovery::new()
            .with_plugin(Plugin::generator(
                MockGenerator::new("cmake", &["pkgconfig", "cmake"]).with_log(log),
            ))
            .with_plugin(Plugin::provider(provider.with_log(log)));

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .with_home(tmp.path().join("home"));
        (tmp, ctx, Arc::new(PluginRegistry::load(&discovery)))
    }

    #[test]
    fn test_install_sequence() {
        let log = CallLog::new();
        let (_tmp, ctx, registry) = setup(MockProvider::new("vcpkg", &["cmake"]), &log);

        install(&ctx, registry, &ResolveOptions::default()).unwrap();

        assert_eq!(
            log.calls(),
            vec![
                "generator:cmake:create",
                "provider:vcpkg:create",
                "provider:vcpkg:install",
                "provider:vcpkg:sync-data:cmake",
                "generator:cmake:sync:cmake:vcpkg",
                "generator:cmake:install",
            ]
        );
    }

    #[test]
    fn test_update_sequence() {
        let log = CallLog::new();
        let (_tmp, ctx, registry) = setup(MockProvider::new("vcpkg", &["cmake"]), &log);

        update(&ctx, registry, &ResolveOptions::default()).unwrap();

        let calls = log.calls();
        assert!(calls.contains(&"provider:vcpkg:update".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("generator:cmake:update"));
    }

    #[test]
    fn test_provider_failure_stops_sequence() {
        let log = CallLog::new();
        let (_tmp, ctx, registry) =
            setup(MockProvider::new("vcpkg", &["cmake"]).failing_install(), &log);

        let err = install(&ctx, registry, &ResolveOptions::default()).unwrap_err();

        assert_eq!(err.to_string(), "provider `vcpkg` failed to install");
        assert!(!log.calls().iter().any(|c| c.contains("sync")));
    }
}
