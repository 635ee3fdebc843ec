//! Local SDK installations for the Titanium SDK manager.
//!
//! This crate works on the filesystem side: finding installed builds,
//! unpacking downloaded archives, deleting installations and running an
//! installation's helper scripts.

#![doc(html_root_url = "https://docs.rs/tsm-local/0.3.0")]

mod error;
pub mod extract;
pub mod remove;
pub mod runner;
pub mod scanner;

pub use error::{LocalError, LocalResult};
pub use extract::{Extractor, ZipExtractor};
pub use remove::{DirRemover, Remover};
pub use runner::{run_script, CommandRunner, ExitOutcome, SystemRunner};
pub use scanner::{examine_dir, scan_installed};
