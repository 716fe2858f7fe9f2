//! `plinth plugins` command
//!
//! Lists every discovered plugin and any that failed validation.

use anyhow::Result;

use plinth::ops::plugin_listing;
use plinth::util::diagnostic::{emit, Diagnostic};
use plinth::util::GlobalContext;

use crate::cli::PluginsArgs;

pub fn execute(ctx: &GlobalContext, args: PluginsArgs) -> Result<()> {
    let registry = super::registry();
    let listing = plugin_listing(&registry, args.group);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.plugins.is_empty() {
        println!("No plugins found.");
    }

    for plugin in &listing.plugins {
        let caps: Vec<&str> = plugin.capabilities.iter().map(|op| op.as_str()).collect();
        println!("{:<10} {}", plugin.group, plugin.name);
        println!("    capabilities: {}", caps.join(", "));
        if !plugin.sync_formats.is_empty() {
            println!("    formats:      {}", plugin.sync_formats.join(", "));
        }
    }

    for rejected in &listing.rejected {
        let diag = Diagnostic::warning(format!(
            "ignored {} plugin `{}`",
            rejected.group, rejected.name
        ))
        .with_context(rejected.reason.clone());
        emit(&diag, ctx.color());
    }

    Ok(())
}
