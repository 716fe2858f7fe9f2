//! High-level operations.
//!
//! This module contains the implementation of plinth commands.

pub mod build;
pub mod info;
pub mod resolve;
pub mod sync;

pub use build::{build, build_project};
pub use info::{fingerprint, plugin_listing, PluginListing, PluginSummary, ResolutionReport};
pub use resolve::{load_manifest, resolve_project, ResolveOptions};
pub use sync::{install, sync_project, update, SyncMode};
