//! Plugin contracts.
//!
//! Generators, providers and source-control plugins are interchangeable
//! implementations behind a declared capability contract. This module
//! defines the contracts; the registry discovers implementations, the
//! resolver picks a compatible combination, and the builder constructs them.
//!
//! # Key Concepts
//!
//! - **Capabilities** - Operations a plugin declares (in `capabilities.rs`)
//! - **Descriptor traits** - What the solver can ask before construction (in `trait_def.rs`)
//! - **Instance traits** - What a configured plugin does (in `trait_def.rs`)
//! - **Descriptors** - Immutable discovery snapshots (in `descriptor.rs`)

pub mod capabilities;
pub mod descriptor;
pub mod trait_def;

pub use capabilities::{CapabilitySet, Operation};
pub use descriptor::{Plugin, PluginDescriptor};
pub use trait_def::{
    Generator, GeneratorPlugin, Provider, ProviderPlugin, ScmError, ScmPlugin, SourceControl,
    SyncData,
};
