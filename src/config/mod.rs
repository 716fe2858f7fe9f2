//! Configuration resolution.
//!
//! Turns the raw manifest into the immutable data plugins are constructed
//! from. Each plugin's table is built from three layers, lowest first:
//!
//! 1. [`GlobalDefaults`] for the plugin's group
//! 2. `[tool.plinth.<section>.<name>]` from the manifest
//! 3. schema defaults for fields neither layer supplied
//!
//! The merged table is validated once against the plugin's schema.
//! Resolution is a pure function of its inputs apart from the SCM version
//! lookup.

pub mod defaults;
pub mod merge;
pub mod pep;
pub mod schema;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{CoreData, CoreSettings, PluginData, ProjectConfiguration, ProjectData};
use crate::plugin::PluginDescriptor;
use crate::resolver::{ConfigScope, RepositoryDescriptor, ResolveError, ResolvedPluginPair};

pub use defaults::GlobalDefaults;
pub use merge::{deep_merge, table_at};
pub use pep::resolve_pep;
pub use schema::{FieldKind, FieldSpec, PluginSchema};

/// Path of the core table inside the manifest.
pub const CORE_TABLE: [&str; 2] = ["tool", "plinth"];

/// Everything a build needs to construct plugin instances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    /// Shared project data
    pub core: CoreData,

    /// The chosen generator's table
    pub generator: PluginData,

    /// The chosen provider's table
    pub provider: PluginData,

    /// The matched source-control plugin's table, if a repository was found
    pub scm: Option<PluginData>,
}

/// Schema of the `[tool.plinth]` table.
pub fn core_schema() -> PluginSchema {
    PluginSchema::new()
        .optional("install-path", FieldKind::Path)
        .with_default("tool-path", FieldKind::Path, "tool")
        .with_default("build-path", FieldKind::Path, "build")
        .optional("generator-name", FieldKind::String)
        .optional("provider-name", FieldKind::String)
        .optional("scm-name", FieldKind::String)
        .optional("generators", FieldKind::Table)
        .optional("providers", FieldKind::Table)
        .optional("scm", FieldKind::Table)
}

/// Resolve the full configuration for a solved pair.
pub fn resolve(
    project: &ProjectConfiguration,
    document: &toml::Table,
    pair: &ResolvedPluginPair,
    repository: Option<&RepositoryDescriptor>,
    defaults: &GlobalDefaults,
) -> Result<ResolvedConfiguration, ResolveError> {
    let root = project.project_root();

    let settings = resolve_core_settings(project, document, defaults)?;

    let generator = resolve_plugin_data(pair.generator(), document, defaults, root)?;
    let provider = resolve_plugin_data(pair.provider(), document, defaults, root)?;
    let scm = repository
        .map(|repo| resolve_plugin_data(repo.source_control(), document, defaults, root))
        .transpose()?;

    let pep = resolve_pep(project, document, repository.zip(scm.as_ref()))?;

    let core = CoreData::new(
        ProjectData {
            root: root.to_path_buf(),
            manifest: project.pyproject_file.clone(),
            verbosity: project.verbosity,
            debug: project.debug,
        },
        settings,
        pep,
    );

    Ok(ResolvedConfiguration {
        core,
        generator,
        provider,
        scm,
    })
}

/// Resolve `[tool.plinth]` into core settings.
///
/// Relative paths are made absolute under the project root. The install path
/// falls back to the global default, then to `<tool-path>/install`.
pub fn resolve_core_settings(
    project: &ProjectConfiguration,
    document: &toml::Table,
    defaults: &GlobalDefaults,
) -> Result<CoreSettings, ResolveError> {
    let root = project.project_root();

    let mut table = table_at(document, &CORE_TABLE, ConfigScope::Core)?
        .cloned()
        .unwrap_or_default();

    if !table.contains_key("install-path") {
        if let Some(path) = defaults.install_path() {
            table.insert(
                "install-path".to_string(),
                toml::Value::String(path.to_string_lossy().into_owned()),
            );
        }
    }

    let schema = core_schema();
    schema.fill_defaults(&mut table);
    schema.validate(ConfigScope::Core, &table)?;
    schema.resolve_paths(&mut table, root);

    let path = |key: &str| {
        table
            .get(key)
            .and_then(|v| v.as_str())
            .map(PathBuf::from)
    };

    let tool_path = path("tool-path").unwrap_or_else(|| root.join("tool"));
    let build_path = path("build-path").unwrap_or_else(|| root.join("build"));
    let install_path = path("install-path").unwrap_or_else(|| tool_path.join("install"));

    Ok(CoreSettings {
        install_path,
        tool_path,
        build_path,
        generator_name: pin(&table, "generator-name")?,
        provider_name: pin(&table, "provider-name")?,
        scm_name: pin(&table, "scm-name")?,
    })
}

fn pin(table: &toml::Table, key: &str) -> Result<Option<String>, ResolveError> {
    match table.get(key).and_then(|v| v.as_str()) {
        Some("") => Err(ResolveError::schema(ConfigScope::Core, key, "must not be empty")),
        Some(name) => Ok(Some(name.to_string())),
        None => Ok(None),
    }
}

/// Resolve one plugin's merged, validated table.
pub fn resolve_plugin_data(
    descriptor: &PluginDescriptor,
    document: &toml::Table,
    defaults: &GlobalDefaults,
    root: &Path,
) -> Result<PluginData, ResolveError> {
    let group = descriptor.group();
    let scope = ConfigScope::Plugin(group);

    let mut table = defaults.group(group);

    let path = [CORE_TABLE[0], CORE_TABLE[1], group.section(), descriptor.name()];
    if let Some(layer) = table_at(document, &path, scope)? {
        deep_merge(&mut table, layer.clone());
    }

    let schema = descriptor.schema();
    schema.fill_defaults(&mut table);
    schema.validate(scope, &table)?;
    schema.resolve_paths(&mut table, root);

    tracing::debug!("Resolved configuration for {}", descriptor);
    Ok(PluginData::new(group, descriptor.name(), table))
}
