//! Implementation of `plinth build`.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::builder::BuildResult;
use crate::ops::resolve::{resolve_project, ResolveOptions};
use crate::registry::PluginRegistry;
use crate::util::GlobalContext;

/// Run the generator's build on a resolved project.
pub fn build_project(result: &mut BuildResult) -> Result<()> {
    let span = result.span.clone();
    let _guard = span.enter();

    let generator = result.generator.name().to_string();
    tracing::info!("Building with generator `{}`", generator);

    result
        .generator
        .build()
        .with_context(|| format!("generator `{}` failed to build", generator))
}

/// Resolve the project, then build it.
pub fn build(
    ctx: &GlobalContext,
    registry: Arc<PluginRegistry>,
    opts: &ResolveOptions,
) -> Result<BuildResult> {
    let mut result = resolve_project(ctx, registry, opts)?;
    build_project(&mut result)?;
    Ok(result)
}
