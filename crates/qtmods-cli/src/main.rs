//! qtmods - submodule selection for Qt builds

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qtmods_cli::cmd;
use qtmods_cli::{Cli, Commands, Context};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; -v only changes the fallback level
    let fallback = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Completions { shell } = cli.command {
        cmd::completions::completions(shell);
        return Ok(());
    }

    let ctx = Context::load(&cli).await?;

    match cli.command {
        Commands::List { json } => cmd::list::list(&ctx, json),
        Commands::Info { module } => cmd::info::info(&ctx, &module),
        Commands::Resolve { modules, json } => cmd::resolve::resolve(&ctx, &modules, json),
        Commands::Args {
            modules,
            source_root,
            prefix,
            lines,
            json,
        } => {
            let format = if json {
                cmd::args::Format::Json
            } else if lines {
                cmd::args::Format::Lines
            } else {
                cmd::args::Format::Shell
            };
            cmd::args::args(&ctx, &modules, source_root.as_deref(), prefix.as_deref(), format)
        }
        Commands::Check => cmd::check::check(&ctx),
        Commands::Completions { .. } => Ok(()),
    }
}
