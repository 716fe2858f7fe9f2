//! Plugins that ship with plinth.
//!
//! Generators and providers are expected to come from elsewhere; only
//! source control has a built-in implementation.

pub mod git;

pub use git::{GitScm, GitSourceControl};
