use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An SDK found on disk, described by its `version.txt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledBuild {
    /// Short git hash (`githash` key)
    pub short_hash: String,

    /// Version string (`version` key)
    pub version: String,

    /// Build time recorded in the installation (`timestamp` key)
    pub install_timestamp: DateTime<Local>,

    /// Root directory of the installation
    pub install_path: PathBuf,
}
