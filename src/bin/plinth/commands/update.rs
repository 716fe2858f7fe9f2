//! `plinth update` command

use anyhow::Result;

use plinth::ops::{update, ResolveOptions};
use plinth::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, opts: &ResolveOptions) -> Result<()> {
    let result = update(ctx, super::registry(), opts)?;

    tracing::info!(
        "Updated {} with {} and {}",
        result.core().pep().name,
        result.provider.name(),
        result.generator.name()
    );

    Ok(())
}
