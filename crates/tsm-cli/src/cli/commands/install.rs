//! `tsm install` - Download and unpack a build.

use anyhow::Result;
use colored::Colorize;
use tsm::Query;

use super::Context;
use crate::cli::args::InstallArgs;

pub async fn execute(ctx: Context, args: InstallArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let observer = ctx.observer();
    let query = Query::new(args.query.as_deref());

    let build = manager
        .install(&query, Some(&ctx.os), &ctx.sdk_dir, &observer)
        .await?;

    if ctx.output_format.is_structured() {
        return ctx.output_format.print(&build);
    }

    println!(
        "{} Installed {} ({}) from {}.",
        "Success:".green().bold(),
        build.version.cyan(),
        build.short_hash,
        build.branch
    );
    Ok(())
}
