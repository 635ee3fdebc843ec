//! Matching builds against a user query.
//!
//! A query is either a semantic-version range (`2.1`, `>=1.8.2 <2`, `2.1.x ||
//! 3.0.x`) or a prefix of a git revision hash (`79e9c73`). A build matches
//! when either interpretation accepts it. An empty query matches everything.

use semver::{Version, VersionReq};
use std::fmt;

/// A version range or revision prefix supplied by the user
#[derive(Debug, Clone, Default)]
pub struct Query {
    raw: Option<String>,
    range: Option<VersionRange>,
}

impl Query {
    /// Create a query; `None` and blank strings match every build
    #[must_use]
    pub fn new<S: AsRef<str>>(query: Option<S>) -> Self {
        let raw = query
            .as_ref()
            .map(|q| q.as_ref().trim())
            .filter(|q| !q.is_empty())
            .map(String::from);
        let range = raw.as_deref().and_then(VersionRange::parse);

        Self { raw, range }
    }

    /// A query that matches every build
    #[must_use]
    pub const fn any() -> Self {
        Self {
            raw: None,
            range: None,
        }
    }

    /// The query text, if any
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Returns true if this query matches every build
    #[must_use]
    pub const fn is_any(&self) -> bool {
        self.raw.is_none()
    }

    /// Returns true if the query could be read as a version range
    #[must_use]
    pub const fn is_version_range(&self) -> bool {
        self.range.is_some()
    }

    /// Check a build's version and revision hash against this query
    #[must_use]
    pub fn matches(&self, version: &str, revision: &str) -> bool {
        let Some(raw) = self.raw.as_deref() else {
            return true;
        };

        self.range.as_ref().is_some_and(|r| r.satisfied_by(version))
            || revision_matches(raw, revision)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self::new(Some(s))
    }
}

impl From<Option<String>> for Query {
    fn from(s: Option<String>) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw.as_deref().unwrap_or("*"))
    }
}

/// Returns true if `query` is a prefix of `revision` and longer than one character
#[must_use]
pub fn revision_matches(query: &str, revision: &str) -> bool {
    query.chars().count() > 1 && revision.starts_with(query)
}

/// A disjunction of semver requirements in the npm range dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parse a range expression, returning `None` if it isn't one.
    ///
    /// Bare partial versions are X-ranges: `2.1` accepts any `2.1.*`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let alternatives = text
            .split("||")
            .map(|alt| normalize_alternative(alt).and_then(|req| VersionReq::parse(&req).ok()))
            .collect::<Option<Vec<_>>>()?;

        Some(Self { alternatives })
    }

    /// Returns true if `version` is valid semver and inside the range
    #[must_use]
    pub fn satisfied_by(&self, version: &str) -> bool {
        let Ok(version) = Version::parse(version.trim().trim_start_matches('v')) else {
            return false;
        };
        self.alternatives.iter().any(|req| req.matches(&version))
    }
}

// Rewrite one `||` branch into the comma-separated syntax the semver crate reads.
// An operator with no version after it makes the branch invalid.
fn normalize_alternative(alt: &str) -> Option<String> {
    let alt = alt.trim();
    if alt.is_empty() {
        return Some("*".to_string());
    }

    if let Some((low, high)) = alt.split_once(" - ") {
        return Some(format!(">={}, <={}", strip_v(low.trim()), strip_v(high.trim())));
    }

    let mut comparators: Vec<String> = Vec::new();
    let mut pending_op = String::new();

    for token in alt.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        if token.chars().all(is_operator_char) {
            pending_op.push_str(token);
            continue;
        }

        let comparator = if pending_op.is_empty() {
            bare_to_exact(token)
        } else {
            format!("{}{}", std::mem::take(&mut pending_op), strip_v(token))
        };
        comparators.push(comparator);
    }

    pending_op.is_empty().then(|| comparators.join(", "))
}

const fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '~' | '^')
}

// `2.1` means `2.1.x` in npm ranges, whereas the semver crate would read it
// as `^2.1`. An explicit `=` gives the X-range behavior.
fn bare_to_exact(token: &str) -> String {
    let token = strip_v(token);
    let starts_with_digit = token.chars().next().is_some_and(|c| c.is_ascii_digit());
    let has_wildcard = token.split('.').any(|part| matches!(part, "x" | "X" | "*"));

    if starts_with_digit && !has_wildcard {
        format!("={token}")
    } else {
        token.to_string()
    }
}

fn strip_v(token: &str) -> &str {
    token
        .strip_prefix('v')
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(token)
}
