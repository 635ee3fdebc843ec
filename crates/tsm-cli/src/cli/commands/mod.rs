//! Command implementations.

pub mod config;
pub mod helper;
pub mod install;
pub mod list;
pub mod remove;

use crate::output::OutputFormat;
use crate::progress::ProgressObserver;
use std::path::PathBuf;
use tsm::{CatalogClient, SdkManager};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Titanium SDK root directory
    pub sdk_dir: PathBuf,

    /// Platform builds are selected for
    pub os: String,

    /// Interpreter for helper scripts
    pub python: String,

    /// Build server root, if not the default
    pub catalog_url: Option<String>,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Directory holding the installed builds for the selected platform.
    pub fn installed_dir(&self) -> PathBuf {
        self.sdk_dir.join("mobilesdk").join(&self.os)
    }

    /// Create an SDK manager from the resolved settings.
    pub fn manager(&self) -> anyhow::Result<SdkManager> {
        let mut builder = CatalogClient::builder();
        if let Some(url) = &self.catalog_url {
            builder = builder.base_url(url);
        }

        Ok(SdkManager::new(builder.build()?).with_python(&self.python))
    }

    /// Observer matching the output format.
    pub fn observer(&self) -> ProgressObserver {
        if self.output_format.is_structured() {
            ProgressObserver::hidden()
        } else {
            ProgressObserver::new()
        }
    }
}
