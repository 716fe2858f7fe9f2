//! Core data types shared by every stage of resolution.

pub mod data;
pub mod group;
pub mod project;
pub mod sync_format;

pub use data::{CoreData, CoreSettings, PepData, PluginData, ProjectData};
pub use group::{PluginGroup, PluginGroupParseError};
pub use project::{ProjectConfiguration, MANIFEST_NAME};
pub use sync_format::SyncFormat;
