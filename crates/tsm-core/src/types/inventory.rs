use super::{Build, InstalledBuild};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Where an inventory entry's data came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Origin {
    /// Published by the build server
    Remote(Build),
    /// Only known from a local installation
    Local(InstalledBuild),
}

/// A single row of the merged remote/local view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Whether the build is present on disk
    pub installed: bool,

    /// Build data
    #[serde(flatten)]
    pub origin: Origin,
}

impl InventoryEntry {
    /// Entry for a published build
    #[must_use]
    pub const fn remote(build: Build, installed: bool) -> Self {
        Self {
            installed,
            origin: Origin::Remote(build),
        }
    }

    /// Entry for an installation with no published counterpart
    #[must_use]
    pub const fn local(build: InstalledBuild) -> Self {
        Self {
            installed: true,
            origin: Origin::Local(build),
        }
    }

    /// Short git hash
    #[must_use]
    pub fn short_hash(&self) -> &str {
        match &self.origin {
            Origin::Remote(b) => &b.short_hash,
            Origin::Local(b) => &b.short_hash,
        }
    }

    /// Version string
    #[must_use]
    pub fn version(&self) -> &str {
        match &self.origin {
            Origin::Remote(b) => &b.version,
            Origin::Local(b) => &b.version,
        }
    }

    /// Build time for remote entries, install metadata time for local-only ones
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        match &self.origin {
            Origin::Remote(b) => b.build_timestamp,
            Origin::Local(b) => b.install_timestamp,
        }
    }

    /// The published build, if any
    #[must_use]
    pub const fn as_remote(&self) -> Option<&Build> {
        match &self.origin {
            Origin::Remote(b) => Some(b),
            Origin::Local(_) => None,
        }
    }

    /// The local-only installation, if any
    #[must_use]
    pub const fn as_local(&self) -> Option<&InstalledBuild> {
        match &self.origin {
            Origin::Local(b) => Some(b),
            Origin::Remote(_) => None,
        }
    }
}
