//! Core types and logic for the Titanium SDK manager.
//!
//! This crate provides the pieces shared by every other `tsm` crate:
//!
//! - **Types**: published [`Build`]s, local [`InstalledBuild`]s and the merged [`InventoryEntry`]
//! - **Matching**: [`Query`] accepts either a semver range or a git hash prefix
//! - **Parsing**: build file names and `version.txt` records
//! - **Reconciliation**: [`merge`] joins the remote and local views
//! - **Errors**: [`TsmError`] and its [`ErrorKind`] classification
//!
//! # Example
//!
//! ```rust,ignore
//! use tsm_core::{merge, Query};
//!
//! let query = Query::from("2.1");
//! let available: Vec<_> = builds
//!     .into_iter()
//!     .filter(|b| query.matches(&b.version, &b.git_revision))
//!     .collect();
//! let inventory = merge(available, installed);
//! ```

#![doc(html_root_url = "https://docs.rs/tsm-core/0.3.0")]

mod error;
pub mod events;
mod merge;
pub mod parse;
pub mod query;
pub mod types;

pub use error::{ErrorKind, Result, TsmError};
pub use events::{Event, NoopObserver, Observer, Progress, TracingObserver};
pub use merge::merge;
pub use query::{revision_matches, Query, VersionRange};
pub use types::*;
