//! PEP 621 metadata from the `[project]` table.

use crate::config::merge::table_at;
use crate::config::schema::{FieldKind, PluginSchema};
use crate::core::{PepData, PluginData, ProjectConfiguration};
use crate::resolver::{ConfigScope, RepositoryDescriptor, ResolveError};

/// Schema of the `[project]` fields plinth reads.
pub fn project_schema() -> PluginSchema {
    PluginSchema::new()
        .required("name", FieldKind::String)
        .optional("version", FieldKind::String)
        .with_default("description", FieldKind::String, "")
        .with_default("dynamic", FieldKind::Array, toml::Value::Array(Vec::new()))
}

/// Resolve package metadata.
///
/// Version precedence: front-end override, declared `project.version`, then
/// the version the repository's plugin extracts using its resolved table
/// `scm`. A version that is still missing is only accepted when `version`
/// is listed in `project.dynamic`.
pub fn resolve_pep(
    project: &ProjectConfiguration,
    document: &toml::Table,
    scm: Option<(&RepositoryDescriptor, &PluginData)>,
) -> Result<PepData, ResolveError> {
    let mut table = table_at(document, &["project"], ConfigScope::Project)?
        .cloned()
        .unwrap_or_default();

    let schema = project_schema();
    schema.fill_defaults(&mut table);
    schema.validate(ConfigScope::Project, &table)?;

    let string = |key: &str| table.get(key).and_then(|v| v.as_str()).map(str::to_string);

    let dynamic = match table.get("dynamic").and_then(|v| v.as_array()) {
        Some(values) => values
            .iter()
            .map(|v| {
                v.as_str().map(str::to_string).ok_or_else(|| {
                    ResolveError::schema(
                        ConfigScope::Project,
                        "dynamic",
                        format!("expected array of strings, found {}", v.type_str()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let mut pep = PepData {
        name: string("name").unwrap_or_default(),
        version: None,
        description: string("description").unwrap_or_default(),
        dynamic,
    };

    pep.version = if let Some(version) = &project.version_override {
        tracing::debug!("Using version override {}", version);
        Some(version.clone())
    } else if let Some(version) = string("version") {
        Some(version)
    } else {
        scm.and_then(|(repository, data)| scm_version(repository, data))
    };

    if pep.version.is_none() {
        if !pep.is_dynamic("version") {
            return Err(ResolveError::schema(
                ConfigScope::Project,
                "version",
                "is required unless listed in `project.dynamic`",
            ));
        }
        tracing::warn!("Project `{}` has a dynamic version that could not be resolved", pep.name);
    }

    Ok(pep)
}

/// Ask the repository's source-control plugin for a version.
///
/// Failures are logged and treated as no version.
fn scm_version(repository: &RepositoryDescriptor, data: &PluginData) -> Option<String> {
    let scm = repository.source_control().as_source_control()?;

    match scm.extract_configured_version(repository.path(), data) {
        Ok(version) => {
            tracing::debug!(
                "Version {} extracted by `{}` from {}",
                version,
                scm.name(),
                repository.path().display()
            );
            Some(version)
        }
        Err(e) => {
            tracing::warn!("Could not extract a version with `{}`: {}", scm.name(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PluginGroup;
    use crate::plugin::{Plugin, PluginDescriptor};
    use crate::resolver::select_repository;
    use crate::test_support::MockScm;

    fn document(src: &str) -> toml::Table {
        toml::from_str(src).unwrap()
    }

    fn repository(scm: MockScm, path: &str) -> RepositoryDescriptor {
        let descriptor = PluginDescriptor::new(Plugin::source_control(scm));
        select_repository(&[descriptor], std::path::Path::new(path)).unwrap()
    }

    fn scm_data() -> PluginData {
        PluginData::new(PluginGroup::SourceControl, "git", toml::Table::new())
    }

    fn project() -> ProjectConfiguration {
        ProjectConfiguration::new("/work/app/pyproject.toml")
    }

    #[test]
    fn test_declared_version_beats_scm() {
        let doc = document("[project]\nname = \"app\"\nversion = \"2.0.0\"");
        let repo = repository(
            MockScm::new("git").with_repository("/work/app").with_version("1.2.0"),
            "/work/app",
        );

        let pep = resolve_pep(&project(), &doc, Some((&repo, &scm_data()))).unwrap();
        assert_eq!(pep.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_scm_version_fills_dynamic() {
        let doc = document("[project]\nname = \"app\"\ndynamic = [\"version\"]");
        let repo = repository(
            MockScm::new("git").with_repository("/work/app").with_version("1.2.0"),
            "/work/app",
        );

        let pep = resolve_pep(&project(), &doc, Some((&repo, &scm_data()))).unwrap();
        assert_eq!(pep.version.as_deref(), Some("1.2.0"));
        assert!(pep.is_dynamic("version"));
    }

    #[test]
    fn test_override_beats_everything() {
        let doc = document("[project]\nname = \"app\"\nversion = \"2.0.0\"");
        let project = project().with_version_override(Some("3.1.4".to_string()));

        let pep = resolve_pep(&project, &doc, None).unwrap();
        assert_eq!(pep.version.as_deref(), Some("3.1.4"));
    }

    #[test]
    fn test_dynamic_version_unresolved() {
        let doc = document("[project]\nname = \"app\"\ndynamic = [\"version\"]");
        let repo = repository(MockScm::new("git").with_repository("/work/app"), "/work/app");

        let pep = resolve_pep(&project(), &doc, Some((&repo, &scm_data()))).unwrap();
        assert_eq!(pep.version, None);
    }

    #[test]
    fn test_missing_static_version_fails() {
        let doc = document("[project]\nname = \"app\"");
        let err = resolve_pep(&project(), &doc, None).unwrap_err();

        assert!(matches!(
            err,
            ResolveError::SchemaValidation { scope: ConfigScope::Project, ref field, .. }
                if field == "version"
        ));
    }

    #[test]
    fn test_missing_project_table() {
        let err = resolve_pep(&project(), &toml::Table::new(), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid `project` configuration: `name` is required"
        );
    }

    #[test]
    fn test_dynamic_must_be_strings() {
        let doc = document("[project]\nname = \"app\"\nversion = \"1.0\"\ndynamic = [1]");
        let err = resolve_pep(&project(), &doc, None).unwrap_err();
        assert!(err.to_string().contains("`dynamic` expected array of strings"));
    }
}
