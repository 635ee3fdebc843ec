//! `tsm builder` and `tsm titanium` - Run an installed build's helper scripts.

use anyhow::Result;
use tracing::info;
use tsm::Query;

use super::Context;
use crate::cli::args::{BuilderArgs, TitaniumArgs};

pub async fn builder(ctx: Context, args: BuilderArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let build = manager
        .builder(
            &ctx.installed_dir(),
            &Query::from(args.query.as_str()),
            &args.target,
            &args.args,
            &ctx.observer(),
        )
        .await?;

    info!(version = %build.version, sdk_target = %args.target, "builder.py finished");
    Ok(())
}

pub async fn titanium(ctx: Context, args: TitaniumArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let build = manager
        .titanium(
            &ctx.installed_dir(),
            &Query::from(args.query.as_str()),
            &args.args,
            &ctx.observer(),
        )
        .await?;

    info!(version = %build.version, "titanium.py finished");
    Ok(())
}
