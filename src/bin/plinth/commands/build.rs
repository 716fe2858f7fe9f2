//! `plinth build` command

use anyhow::Result;

use plinth::ops::{build, ResolveOptions};
use plinth::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, opts: &ResolveOptions) -> Result<()> {
    let result = build(ctx, super::registry(), opts)?;

    tracing::info!(
        "Built {} with {}",
        result.core().pep().name,
        result.generator.name()
    );

    Ok(())
}
