//! `tsm list` - Show published and installed builds.

use anyhow::Result;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;
use tsm::{InventoryEntry, ListOptions, Origin, Query};

use super::Context;
use crate::cli::args::ListArgs;

#[derive(Tabled)]
struct BuildRow {
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Hash")]
    hash: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Branch")]
    branch: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub async fn execute(ctx: Context, args: ListArgs) -> Result<()> {
    // Neither flag means both
    let (want_installed, want_available) = match (args.installed, args.available) {
        (false, false) => (true, true),
        flags => flags,
    };

    let mut options = ListOptions::new()
        .query(Query::new(args.query.as_deref()))
        .platform(&ctx.os)
        .available(want_available);

    let installed_dir = ctx.installed_dir();
    if want_installed {
        if installed_dir.is_dir() {
            options = options.installed(&installed_dir);
        } else {
            debug!(dir = %installed_dir.display(), "no installed builds");
        }
    }

    let manager = ctx.manager()?;
    let observer = ctx.observer();
    let inventory = manager.list(&options, &observer).await?;

    if ctx.output_format.is_structured() {
        return ctx.output_format.print(&inventory);
    }

    print_inventory_pretty(&inventory, &ctx);
    Ok(())
}

fn print_inventory_pretty(inventory: &[InventoryEntry], ctx: &Context) {
    if inventory.is_empty() {
        println!("{}", "No matching SDK builds.".dimmed());
        return;
    }

    let rows: Vec<BuildRow> = inventory
        .iter()
        .map(|entry| BuildRow {
            version: entry.version().to_string(),
            hash: entry.short_hash().to_string(),
            date: entry.timestamp().format("%Y-%m-%d %H:%M").to_string(),
            branch: match &entry.origin {
                Origin::Remote(build) => build.branch.clone(),
                Origin::Local(_) => "-".to_string(),
            },
            status: if entry.installed {
                "installed".green().to_string()
            } else {
                "available".dimmed().to_string()
            },
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");

    if ctx.verbose {
        println!();
        println!(
            "{} {}",
            "Installed builds:".bold(),
            ctx.installed_dir().display()
        );
    }
}
