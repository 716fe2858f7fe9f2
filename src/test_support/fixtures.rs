//! Manifest fixtures for common test scenarios.

use std::path::{Path, PathBuf};

use crate::core::MANIFEST_NAME;

/// Builder for `pyproject.toml` contents.
#[derive(Debug, Clone)]
pub struct PyprojectFixture {
    name: String,
    version: Option<String>,
    dynamic_version: bool,
    tool: Vec<String>,
}

impl PyprojectFixture {
    /// A project with a static version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        PyprojectFixture {
            name: name.into(),
            version: Some(version.into()),
            dynamic_version: false,
            tool: Vec::new(),
        }
    }

    /// A project whose version is listed in `project.dynamic`.
    pub fn dynamic(name: impl Into<String>) -> Self {
        PyprojectFixture {
            name: name.into(),
            version: None,
            dynamic_version: true,
            tool: Vec::new(),
        }
    }

    /// Append raw TOML after the `[project]` table.
    pub fn with_tool(mut self, toml: impl Into<String>) -> Self {
        self.tool.push(toml.into());
        self
    }

    /// Render the manifest.
    pub fn render(&self) -> String {
        let mut out = format!("[project]\nname = \"{}\"\n", self.name);
        if let Some(version) = &self.version {
            out.push_str(&format!("version = \"{}\"\n", version));
        }
        if self.dynamic_version {
            out.push_str("dynamic = [\"version\"]\n");
        }
        for section in &self.tool {
            out.push('\n');
            out.push_str(section.trim());
            out.push('\n');
        }
        out
    }

    /// Parse the rendered manifest.
    pub fn document(&self) -> toml::Table {
        match toml::from_str(&self.render()) {
            Ok(table) => table,
            Err(e) => panic!("fixture produced invalid TOML: {e}"),
        }
    }

    /// Write the manifest into `dir`, returning its path.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(MANIFEST_NAME);
        std::fs::write(&path, self.render())?;
        Ok(path)
    }
}

/// Initialize a git repository in `dir` with one commit carrying `tags`.
pub fn tagged_repository(dir: &Path, tags: &[&str]) -> Result<git2::Repository, git2::Error> {
    let repo = git2::Repository::init(dir)?;
    {
        let sig = git2::Signature::now("Plinth Test", "test@example.com")?;
        let tree_id = repo.index()?.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let oid = repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])?;
        let commit = repo.find_commit(oid)?;
        for tag in tags {
            repo.tag_lightweight(tag, commit.as_object(), false)?;
        }
    }
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_static() {
        let doc = PyprojectFixture::new("app", "1.0.0")
            .with_tool("[tool.plinth]\ngenerator-name = \"cmake\"")
            .document();

        assert_eq!(doc["project"]["version"].as_str(), Some("1.0.0"));
        assert_eq!(
            doc["tool"]["plinth"]["generator-name"].as_str(),
            Some("cmake")
        );
    }

    #[test]
    fn test_write_to() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = PyprojectFixture::dynamic("app").write_to(tmp.path()).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("dynamic = [\"version\"]"));
    }

    #[test]
    fn test_tagged_repository() {
        let tmp = tempfile::TempDir::new().unwrap();
        let repo = tagged_repository(tmp.path(), &["v0.1.0", "v0.2.0"]).unwrap();

        let tags = repo.tag_names(None).unwrap();
        assert_eq!(tags.len(), 2);
    }
}
