//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{default_os, default_sdk_dir, Config};
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flag or environment first, then the config file, then host defaults
    let sdk_dir = cli
        .dir
        .or_else(|| config.sdk_dir.clone())
        .or_else(default_sdk_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine the SDK directory; pass --dir"))?;
    let os = cli
        .os
        .or_else(|| config.os.clone())
        .unwrap_or_else(default_os);

    let ctx = commands::Context {
        sdk_dir,
        os,
        python: config
            .python
            .clone()
            .unwrap_or_else(|| tsm::DEFAULT_PYTHON.to_string()),
        catalog_url: config.catalog_url.clone(),
        output_format: cli
            .output
            .or(config.output_format)
            .unwrap_or(OutputFormat::Pretty),
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::List(args) => commands::list::execute(ctx, args).await,
        Commands::Install(args) => commands::install::execute(ctx, args).await,
        Commands::Remove(args) => commands::remove::execute(ctx, args).await,
        Commands::Builder(args) => commands::helper::builder(ctx, args).await,
        Commands::Titanium(args) => commands::helper::titanium(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}
