//! tsm - Titanium SDK manager
//!
//! Install, list, remove and run Titanium mobile SDK builds.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tsm_cli::run().await
}
