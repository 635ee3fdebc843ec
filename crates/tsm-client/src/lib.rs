//! HTTP client for the Titanium build server.
//!
//! This crate provides [`CatalogClient`], which lists branches, reads branch
//! indices, resolves matching builds and downloads build archives.

#![doc(html_root_url = "https://docs.rs/tsm-client/0.3.0")]

mod catalog;
mod client;
mod config;
mod download;
pub mod api;

pub use catalog::select_candidates;
pub use client::{CatalogClient, CatalogClientBuilder};
pub use config::*;
pub use tsm_core::{Result, TsmError};
