//! Titanium SDK manager.
//!
//! Resolves published Titanium mobile SDK builds, reconciles them with the
//! builds installed locally, and installs, removes or runs them.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tsm::{CatalogClient, ListOptions, Query, SdkManager, TracingObserver};
//!
//! #[tokio::main]
//! async fn main() -> tsm::Result<()> {
//!     let manager = SdkManager::new(CatalogClient::new()?);
//!
//!     // Install the newest 2.1.x build for macOS
//!     let build = manager
//!         .install(&Query::from("2.1"), Some("osx"), "/opt/titanium".as_ref(), &TracingObserver)
//!         .await?;
//!     println!("installed {} ({})", build.version, build.short_hash);
//!
//!     // Everything published or installed
//!     let options = ListOptions::new()
//!         .available(true)
//!         .installed("/opt/titanium/mobilesdk/osx");
//!     for entry in manager.list(&options, &TracingObserver).await? {
//!         println!("{} {}", entry.version(), entry.short_hash());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/tsm/0.3.0")]

mod manager;

pub use manager::{ListOptions, SdkManager, DEFAULT_PYTHON};

// Re-export core types
pub use tsm_core::*;

// Re-export client
pub use tsm_client::{select_candidates, CatalogClient, CatalogClientBuilder, CatalogConfig};

// Re-export local installation handling
pub use tsm_local as local;
pub use tsm_local::{CommandRunner, DirRemover, Extractor, Remover, SystemRunner, ZipExtractor};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
