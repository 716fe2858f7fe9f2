//! Sync formats - the data shapes exchanged between providers and generators.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque token naming one data-interchange shape.
///
/// Generators list the formats they can consume (best first); providers
/// answer whether they can emit a given format. Two formats are the same
/// shape exactly when their tokens are equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyncFormat(Arc<str>);

impl SyncFormat {
    /// Create a format token.
    pub fn new(token: impl AsRef<str>) -> Self {
        SyncFormat(Arc::from(token.as_ref()))
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SyncFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyncFormat({})", self.0)
    }
}

impl fmt::Display for SyncFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SyncFormat {
    fn from(s: &str) -> Self {
        SyncFormat::new(s)
    }
}

impl Serialize for SyncFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SyncFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SyncFormat::new(s))
    }
}
