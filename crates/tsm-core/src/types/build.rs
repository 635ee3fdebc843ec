use crate::parse::parse_remote_filename;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Number of revision characters used as a build's identity
pub const SHORT_HASH_LEN: usize = 7;

/// Branch list from `branches.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchList {
    /// Branch names, in server order
    pub branches: Vec<String>,
}

/// One entry of a branch's `index.json`, exactly as the build server publishes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    /// SHA-1 of the archive
    pub sha1: String,

    /// CI job that produced the build
    pub build_url: String,

    /// Full git revision hash
    pub git_revision: String,

    /// Archive file name, e.g. `mobilesdk-2.2.0.v20120827143312-osx.zip`
    pub filename: String,

    /// Branch the build was cut from
    pub git_branch: String,

    /// Build flavour, `mobile` or `desktop`
    pub build_type: String,

    /// Archive size in bytes
    pub size: u64,
}

/// A published SDK build with its version and build time resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Archive file name
    pub filename: String,

    /// Full git revision hash
    pub git_revision: String,

    /// First seven characters of the revision
    pub short_hash: String,

    /// Branch the build was cut from
    pub branch: String,

    /// Build flavour
    pub build_type: String,

    /// Archive size in bytes
    pub size: u64,

    /// SHA-1 of the archive
    pub sha1: String,

    /// CI job that produced the build
    pub build_url: String,

    /// Semantic version parsed from the file name
    pub version: String,

    /// Build time parsed from the file name (local wall-clock time)
    pub build_timestamp: DateTime<Local>,

    /// Where the archive can be downloaded from
    pub download_url: String,
}

impl Build {
    /// Build from a wire record.
    ///
    /// Returns `None` if the version or the build time can't be parsed out of
    /// the file name. `zip_base_url` is the archive root that `branch/filename`
    /// is appended to.
    #[must_use]
    pub fn from_record(record: &BuildRecord, zip_base_url: &str) -> Option<Self> {
        let (version, build_timestamp) = parse_remote_filename(&record.filename).complete()?;

        Some(Self {
            filename: record.filename.clone(),
            git_revision: record.git_revision.clone(),
            short_hash: short_hash(&record.git_revision),
            branch: record.git_branch.clone(),
            build_type: record.build_type.clone(),
            size: record.size,
            sha1: record.sha1.clone(),
            build_url: record.build_url.clone(),
            version,
            build_timestamp,
            download_url: format!("{zip_base_url}{}/{}", record.git_branch, record.filename),
        })
    }
}

/// Truncate a revision hash to its short form
#[must_use]
pub fn short_hash(revision: &str) -> String {
    revision.chars().take(SHORT_HASH_LEN).collect()
}
