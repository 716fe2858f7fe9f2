//! `plinth resolve` command
//!
//! Resolves the project and prints the chosen plugins and paths.

use anyhow::Result;

use plinth::ops::{resolve_project, ResolutionReport, ResolveOptions};
use plinth::util::GlobalContext;

use crate::cli::ResolveArgs;

pub fn execute(ctx: &GlobalContext, opts: &ResolveOptions, args: ResolveArgs) -> Result<()> {
    let result = resolve_project(ctx, super::registry(), opts)?;
    let report = ResolutionReport::from_result(&result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        report.project,
        report.version.as_deref().unwrap_or("(no version)")
    );
    println!("  generator:   {}", report.generator);
    println!("  provider:    {}", report.provider);
    println!("  format:      {}", report.format);
    match &report.repository {
        Some(repo) => println!("  scm:         {} ({})", repo.plugin, repo.path.display()),
        None => println!("  scm:         none"),
    }
    println!("  install:     {}", report.install_path.display());
    println!("  tool:        {}", report.tool_path.display());
    println!("  build:       {}", report.build_path.display());
    println!("  fingerprint: {}", report.fingerprint);

    Ok(())
}
