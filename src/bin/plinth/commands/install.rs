//! `plinth install` command

use anyhow::Result;

use plinth::ops::{install, ResolveOptions};
use plinth::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, opts: &ResolveOptions) -> Result<()> {
    let result = install(ctx, super::registry(), opts)?;

    tracing::info!(
        "Installed {} with {} and {}",
        result.core().pep().name,
        result.provider.name(),
        result.generator.name()
    );

    Ok(())
}
