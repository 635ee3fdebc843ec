//! `tsm config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    if ctx.output_format.is_structured() {
        return ctx.output_format.print(&config);
    }

    let unset = || "(not set)".dimmed().to_string();

    println!("{}", "Current Configuration:".bold());
    println!();
    println!(
        "  {} {}",
        "sdk_dir:".bold(),
        config
            .sdk_dir
            .as_ref()
            .map_or_else(unset, |d| d.display().to_string())
    );
    println!("  {} {}", "os:".bold(), config.os.clone().unwrap_or_else(unset));
    println!(
        "  {} {}",
        "python:".bold(),
        config.python.clone().unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        "output_format:".bold(),
        config
            .output_format
            .map_or_else(unset, |f| f.to_string())
    );
    println!(
        "  {} {}",
        "catalog_url:".bold(),
        config.catalog_url.clone().unwrap_or_else(unset)
    );

    println!();
    println!("{} {}", "Effective sdk_dir:".dimmed(), ctx.sdk_dir.display());
    println!("{} {}", "Effective os:".dimmed(), ctx.os);

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!(
        "{} {} set to {}.",
        "Success:".green().bold(),
        key,
        value.cyan()
    );
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
