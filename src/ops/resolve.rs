//! Project resolution operations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::builder::{BuildResult, Builder};
use crate::registry::PluginRegistry;
use crate::util::GlobalContext;

/// Options shared by every command that resolves the project.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Explicit manifest path (default: search upward from cwd)
    pub manifest_path: Option<PathBuf>,

    /// Version that overrides any declared or SCM version
    pub version_override: Option<String>,
}

/// Read a manifest into a raw TOML document.
pub fn load_manifest(path: &Path) -> Result<toml::Table> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("failed to parse manifest: {}", path.display()))
}

/// Locate, load and resolve the project.
///
/// User configuration from `ctx` feeds the global defaults layer.
pub fn resolve_project(
    ctx: &GlobalContext,
    registry: Arc<PluginRegistry>,
    opts: &ResolveOptions,
) -> Result<BuildResult> {
    let manifest = ctx.manifest_path(opts.manifest_path.as_deref())?;
    let project = ctx.project_configuration(manifest, opts.version_override.clone());
    tracing::debug!("Resolving {}", project.pyproject_file.display());

    let document = load_manifest(&project.pyproject_file)?;
    let defaults = ctx.load_config(project.project_root()).global_defaults();

    let mut builder = Builder::new(registry, defaults);
    let result = builder.build(&project, &document)?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildFailure;
    use crate::plugin::Plugin;
    use crate::registry::StaticDiscovery;
    use crate::test_support::{MockGenerator, MockProvider, PyprojectFixture};
    use tempfile::TempDir;

    fn registry() -> Arc<PluginRegistry> {
        let discovery = StaticDiscovery::new()
            .with_plugin(Plugin::generator(MockGenerator::new("cmake", &["cmake"])))
            .with_plugin(Plugin::provider(MockProvider::new("vcpkg", &["cmake"])));
        Arc::new(PluginRegistry::load(&discovery))
    }

    fn context(tmp: &TempDir) -> GlobalContext {
        GlobalContext::with_cwd(tmp.path().to_path_buf()).with_home(tmp.path().join("home"))
    }

    #[test]
    fn test_load_manifest_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pyproject.toml");

        let err = load_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read manifest"));

        std::fs::write(&path, "[project\n").unwrap();
        let err = load_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse manifest"));
    }

    #[test]
    fn test_resolve_project() {
        let tmp = TempDir::new().unwrap();
        PyprojectFixture::new("app", "1.0.0")
            .with_tool("[tool.plinth.providers.vcpkg]\ntriplet = \"x64-linux\"")
            .write_to(tmp.path())
            .unwrap();

        let result = resolve_project(&context(&tmp), registry(), &ResolveOptions::default())
            .unwrap();

        assert_eq!(result.generator.name(), "cmake");
        assert_eq!(
            result
                .configuration
                .provider
                .get("triplet")
                .and_then(|v| v.as_str()),
            Some("x64-linux")
        );
    }

    #[test]
    fn test_user_config_feeds_defaults() {
        let tmp = TempDir::new().unwrap();
        PyprojectFixture::new("app", "1.0.0")
            .write_to(tmp.path())
            .unwrap();
        std::fs::create_dir_all(tmp.path().join(".plinth")).unwrap();
        std::fs::write(
            tmp.path().join(".plinth").join("config.toml"),
            "[defaults.generator]\njobs = 6\n",
        )
        .unwrap();

        let result = resolve_project(&context(&tmp), registry(), &ResolveOptions::default())
            .unwrap();

        assert_eq!(
            result
                .configuration
                .generator
                .get("jobs")
                .and_then(|v| v.as_integer()),
            Some(6)
        );
    }

    #[test]
    fn test_resolve_failure_is_build_failure() {
        let tmp = TempDir::new().unwrap();
        PyprojectFixture::new("app", "1.0.0")
            .with_tool("[tool.plinth]\ngenerator-name = \"meson\"")
            .write_to(tmp.path())
            .unwrap();

        let err = resolve_project(&context(&tmp), registry(), &ResolveOptions::default())
            .unwrap_err();

        assert!(err.downcast_ref::<BuildFailure>().is_some());
    }

    #[test]
    fn test_version_override() {
        let tmp = TempDir::new().unwrap();
        PyprojectFixture::dynamic("app").write_to(tmp.path()).unwrap();

        let opts = ResolveOptions {
            manifest_path: None,
            version_override: Some("4.0.0".to_string()),
        };
        let result = resolve_project(&context(&tmp), registry(), &opts).unwrap();

        assert_eq!(result.core().pep().version.as_deref(), Some("4.0.0"));
    }
}
