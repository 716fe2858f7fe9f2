//! Plugin resolution.
//!
//! Resolution runs in two steps per build:
//!
//! 1. [`select`] narrows each group to a pinned plugin or defers with the
//!    full candidate set.
//! 2. [`solve`] picks the first compatible generator/provider pair, and
//!    [`select_repository`] picks the source-control plugin that recognizes
//!    the project path, if any.

pub mod errors;
pub mod select;
pub mod solve;

pub use errors::{ConfigScope, ResolveError};
pub use select::select;
pub use solve::{
    select_repository, solve, RepositoryDescriptor, RepositorySummary, ResolvedPluginPair,
};
