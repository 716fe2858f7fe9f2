//! plinth CLI - plugin resolution for native build tooling

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plinth::core::ProjectConfiguration;
use plinth::util::diagnostic::{emit, Diagnostic};
use plinth::util::GlobalContext;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        emit(&Diagnostic::from_error(&e), color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Same verbosity mapping the builder uses for its own spans
    let filter = ProjectConfiguration::new("pyproject.toml")
        .with_verbosity(cli.verbose)
        .with_debug(cli.debug)
        .log_filter();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbosity(cli.verbose);
    ctx.set_debug(cli.debug);
    ctx.set_color(!cli.no_color);

    let opts = cli.resolve_options();

    match cli.command {
        Commands::Plugins(args) => commands::plugins::execute(&ctx, args),
        Commands::Resolve(args) => commands::resolve::execute(&ctx, &opts, args),
        Commands::Install => commands::install::execute(&ctx, &opts),
        Commands::Update => commands::update::execute(&ctx, &opts),
        Commands::Build => commands::build::execute(&ctx, &opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
