//! # tsm-cli
//!
//! Command-line interface for the Titanium SDK manager.
//!
//! ## Features
//!
//! - **Install**: download and unpack the newest build matching a version range or git hash
//! - **List**: published and installed builds side by side
//! - **Remove**: delete installed builds
//! - **Helpers**: run `titanium.py` or a target's `builder.py` from an installed build
//! - **Multiple output formats**: Pretty tables, JSON, YAML

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

pub use cli::run;
