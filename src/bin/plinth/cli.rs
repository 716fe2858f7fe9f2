//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use plinth::core::PluginGroup;
use plinth::ops::ResolveOptions;

/// plinth - resolve, configure and run build tooling plugins
#[derive(Parser)]
#[command(name = "plinth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to pyproject.toml (default: search upward from cwd)
    #[arg(long, global = true, env = "PLINTH_MANIFEST_PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Use this project version instead of the declared or SCM version
    #[arg(long, global = true)]
    pub project_version: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolution options from the global flags.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            manifest_path: self.manifest_path.clone(),
            version_override: self.project_version.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List discovered plugins
    Plugins(PluginsArgs),

    /// Resolve plugins and configuration for the current project
    Resolve(ResolveArgs),

    /// Resolve, then install dependencies and generate build files
    Install,

    /// Resolve, then update dependencies and regenerate build files
    Update,

    /// Resolve, then run the generator's build
    Build,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct PluginsArgs {
    /// Only list plugins of this group
    #[arg(long, value_parser = parse_group)]
    pub group: Option<PluginGroup>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_group(s: &str) -> Result<PluginGroup, String> {
    s.parse::<PluginGroup>().map_err(|e| e.to_string())
}
