//! `tsm remove` - Delete installed builds.

use anyhow::Result;
use colored::Colorize;
use tsm::Query;

use super::Context;
use crate::cli::args::RemoveArgs;

pub async fn execute(ctx: Context, args: RemoveArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let observer = ctx.observer();

    let removed = manager
        .remove(&ctx.installed_dir(), &Query::from(args.query.as_str()), &observer)
        .await?;

    if ctx.output_format.is_structured() {
        return ctx.output_format.print(&removed);
    }

    for build in &removed {
        println!(
            "{} Removed {} ({}).",
            "Success:".green().bold(),
            build.version.cyan(),
            build.short_hash
        );
    }
    Ok(())
}
