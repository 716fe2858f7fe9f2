//! Configuration schemas.
//!
//! A schema lists the fields a configuration table may carry, their kinds,
//! whether they are required, and their defaults. Schemas are applied once,
//! to the fully merged table, so a later layer can supply what an earlier
//! layer left out.

use std::fmt;
use std::path::Path;

use crate::resolver::{ConfigScope, ResolveError};

/// Expected kind of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    /// Floats also accept integers
    Float,
    Boolean,
    Array,
    Table,
    /// A string resolved against the project root after validation
    Path,
    Any,
}

impl FieldKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Table => "table",
            FieldKind::Path => "path",
            FieldKind::Any => "any",
        }
    }

    /// Check if a value has this kind.
    pub fn matches(&self, value: &toml::Value) -> bool {
        match self {
            FieldKind::String | FieldKind::Path => value.is_str(),
            FieldKind::Integer => value.is_integer(),
            FieldKind::Float => value.is_float() || value.is_integer(),
            FieldKind::Boolean => value.is_bool(),
            FieldKind::Array => value.is_array(),
            FieldKind::Table => value.is_table(),
            FieldKind::Any => true,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Key in the table
    pub name: String,

    /// Expected kind
    pub kind: FieldKind,

    /// Whether the merged table must contain the field
    pub required: bool,

    /// Value used when no layer supplies the field
    pub default: Option<toml::Value>,
}

/// An ordered set of field specifications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginSchema {
    fields: Vec<FieldSpec>,
    deny_unknown: bool,
}

impl PluginSchema {
    /// Create an empty schema that accepts any table.
    pub fn new() -> Self {
        PluginSchema::default()
    }

    /// Add an optional field with no default.
    pub fn optional(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.push(name.into(), kind, false, None)
    }

    /// Add a required field.
    pub fn required(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.push(name.into(), kind, true, None)
    }

    /// Add an optional field with a default.
    pub fn with_default(
        self,
        name: impl Into<String>,
        kind: FieldKind,
        default: impl Into<toml::Value>,
    ) -> Self {
        self.push(name.into(), kind, false, Some(default.into()))
    }

    /// Reject fields not listed in the schema.
    pub fn deny_unknown(mut self) -> Self {
        self.deny_unknown = true;
        self
    }

    fn push(
        mut self,
        name: String,
        kind: FieldKind,
        required: bool,
        default: Option<toml::Value>,
    ) -> Self {
        self.fields.retain(|f| f.name != name);
        self.fields.push(FieldSpec {
            name,
            kind,
            required,
            default,
        });
        self
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Insert schema defaults for fields absent from `table`.
    pub fn fill_defaults(&self, table: &mut toml::Table) {
        for field in &self.fields {
            if let Some(default) = &field.default {
                if !table.contains_key(&field.name) {
                    table.insert(field.name.clone(), default.clone());
                }
            }
        }
    }

    /// Validate a merged table.
    ///
    /// Reports the first failing field in declaration order, then any
    /// unknown field when the schema denies them.
    pub fn validate(&self, scope: ConfigScope, table: &toml::Table) -> Result<(), ResolveError> {
        for field in &self.fields {
            match table.get(&field.name) {
                None if field.required => {
                    return Err(ResolveError::schema(scope, &field.name, "is required"));
                }
                None => {}
                Some(value) if !field.kind.matches(value) => {
                    return Err(ResolveError::schema(
                        scope,
                        &field.name,
                        format!("expected {}, found {}", field.kind, value.type_str()),
                    ));
                }
                Some(_) => {}
            }
        }

        for key in table.keys() {
            if self.field(key).is_none() {
                if self.deny_unknown {
                    return Err(ResolveError::schema(scope, key, "is not a recognized field"));
                }
                tracing::debug!("Unrecognized `{}` field `{}` kept as-is", scope, key);
            }
        }

        Ok(())
    }

    /// Rewrite relative `Path` fields as paths under `root`.
    pub fn resolve_paths(&self, table: &mut toml::Table, root: &Path) {
        for field in self.fields.iter().filter(|f| f.kind == FieldKind::Path) {
            if let Some(toml::Value::String(raw)) = table.get_mut(&field.name) {
                let path = Path::new(raw.as_str());
                if path.is_relative() {
                    *raw = root.join(path).to_string_lossy().into_owned();
                }
            }
        }
    }
}
