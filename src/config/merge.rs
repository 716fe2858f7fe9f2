//! Layer lookup and deep merging of TOML tables.

use crate::resolver::{ConfigScope, ResolveError};

/// Merge `overlay` into `base`.
///
/// Tables merge key by key; any other value in `overlay` replaces the value
/// in `base`, including arrays.
pub fn deep_merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Look up the table at `path` inside `document`.
///
/// Returns `Ok(None)` when any segment is absent. A segment that exists but
/// is not a table is a schema error reported against `scope`.
pub fn table_at<'a>(
    document: &'a toml::Table,
    path: &[&str],
    scope: ConfigScope,
) -> Result<Option<&'a toml::Table>, ResolveError> {
    let mut current = document;

    for (depth, segment) in path.iter().enumerate() {
        match current.get(*segment) {
            None => return Ok(None),
            Some(toml::Value::Table(table)) => current = table,
            Some(other) => {
                return Err(ResolveError::schema(
                    scope,
                    path[..=depth].join("."),
                    format!("expected table, found {}", other.type_str()),
                ));
            }
        }
    }

    Ok(Some(current))
}
