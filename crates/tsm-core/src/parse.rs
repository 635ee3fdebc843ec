//! Parsers for remote build file names and local `version.txt` records.

use crate::types::InstalledBuild;
use crate::{Result, TsmError};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Name of the metadata file inside every installation
pub const METADATA_FILE: &str = "version.txt";

/// `version.txt` key holding the short git hash
pub const KEY_GITHASH: &str = "githash";
/// `version.txt` key holding the version string
pub const KEY_VERSION: &str = "version";
/// `version.txt` key holding the build date
pub const KEY_TIMESTAMP: &str = "timestamp";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+").expect("valid version pattern"));

static TIMESTAMP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{14}").expect("valid timestamp pattern"));

/// Date-time layouts seen in `version.txt` files
const INSTALL_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Date-only layouts seen in `version.txt` files
const INSTALL_DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// Version and build time extracted from an archive file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameMetadata {
    /// First `D.D.D` pattern in the name
    pub version: Option<String>,
    /// Decoded 14-digit timestamp token
    pub timestamp: Option<DateTime<Local>>,
}

impl FilenameMetadata {
    /// Both fields, or `None` if either is missing
    #[must_use]
    pub fn complete(self) -> Option<(String, DateTime<Local>)> {
        Some((self.version?, self.timestamp?))
    }

    /// Returns true if both version and timestamp were found
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.version.is_some() && self.timestamp.is_some()
    }
}

/// Pull the version and build time out of a file name such as
/// `mobilesdk-2.2.0.v20120827143312-osx.zip`.
#[must_use]
pub fn parse_remote_filename(filename: &str) -> FilenameMetadata {
    let version = VERSION_PATTERN
        .find(filename)
        .map(|m| m.as_str().to_string());

    let timestamp = TIMESTAMP_PATTERN
        .find(filename)
        .and_then(|m| decode_timestamp_token(m.as_str()));

    FilenameMetadata { version, timestamp }
}

/// Decode a `YYYYMMDDhhmmss` token as local wall-clock time.
///
/// Returns `None` if the token isn't 14 ASCII digits or names an impossible
/// date.
#[must_use]
pub fn decode_timestamp_token(token: &str) -> Option<DateTime<Local>> {
    if token.len() != 14 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let field = |range: std::ops::Range<usize>| token[range].parse::<u32>().ok();

    let year = i32::try_from(field(0..4)?).ok()?;
    let naive = NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?
        .and_hms_opt(field(8..10)?, field(10..12)?, field(12..14)?)?;

    localize(naive)
}

/// Parse the `timestamp` value of a `version.txt` file, e.g. `05/02/12 14:18`.
#[must_use]
pub fn parse_install_timestamp(text: &str) -> Option<DateTime<Local>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(dt) = decode_timestamp_token(text) {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Local));
    }

    INSTALL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            INSTALL_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .and_then(localize)
}

// Wall-clock times that fall into a DST gap are shifted forward an hour.
fn localize(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

/// Parsed `key=value` lines of a `version.txt` file.
///
/// Parsing never fails: a line without `=` records its key with no value,
/// and later keys overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    entries: HashMap<String, Option<String>>,
}

impl MetadataRecord {
    /// Parse the text of a `version.txt` file
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => entries.insert(key.to_string(), Some(value.to_string())),
                None => entries.insert(line.to_string(), None),
            };
        }

        Self { entries }
    }

    /// Value for `key`, if present and non-blank
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(Option::as_deref)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Returns true if the record contains `key`, with or without a value
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys were parsed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Turn a complete record into an [`InstalledBuild`] rooted at `install_path`.
    ///
    /// Fails with [`TsmError::InvalidMetadata`] if the hash, version or a
    /// parseable timestamp is missing.
    pub fn to_installed(&self, install_path: impl Into<PathBuf>) -> Result<InstalledBuild> {
        let install_path = install_path.into();
        let invalid = |reason: String| TsmError::InvalidMetadata {
            path: install_path.clone(),
            reason,
        };

        let short_hash = self
            .get(KEY_GITHASH)
            .ok_or_else(|| invalid(format!("missing `{KEY_GITHASH}`")))?;
        let version = self
            .get(KEY_VERSION)
            .ok_or_else(|| invalid(format!("missing `{KEY_VERSION}`")))?;
        let raw_timestamp = self
            .get(KEY_TIMESTAMP)
            .ok_or_else(|| invalid(format!("missing `{KEY_TIMESTAMP}`")))?;
        let install_timestamp = parse_install_timestamp(raw_timestamp)
            .ok_or_else(|| invalid(format!("unreadable timestamp `{raw_timestamp}`")))?;

        Ok(InstalledBuild {
            short_hash: short_hash.to_string(),
            version: version.to_string(),
            install_timestamp,
            install_path,
        })
    }
}
