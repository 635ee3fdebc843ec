//! Build server endpoint configuration.

/// Placeholder substituted with a branch name in [`CatalogConfig::index_url_template`]
pub const BRANCH_PLACEHOLDER: &str = "$BRANCH";

/// Root of Appcelerator's published mobile SDK builds
pub const DEFAULT_BASE_URL: &str = "http://builds.appcelerator.com.s3.amazonaws.com/mobile/";

/// Where branch lists, branch indices and archives live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// URL of the branch list (`branches.json`)
    pub branches_url: String,

    /// URL of a branch index, with `$BRANCH` in place of the branch name
    pub index_url_template: String,

    /// Archive root; `branch/filename` is appended to it
    pub zip_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl CatalogConfig {
    /// Derive all endpoints from one root using the standard layout:
    /// `branches.json`, `$BRANCH/index.json` and `branch/filename`.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Self {
            branches_url: format!("{base}branches.json"),
            index_url_template: format!("{base}{BRANCH_PLACEHOLDER}/index.json"),
            zip_base_url: base,
        }
    }

    /// URL of the index for `branch`
    #[must_use]
    pub fn index_url(&self, branch: &str) -> String {
        self.index_url_template.replace(BRANCH_PLACEHOLDER, branch)
    }
}
