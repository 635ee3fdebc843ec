//! Resolving published builds that match a query.

use crate::CatalogClient;
use futures_util::future::try_join_all;
use tracing::instrument;
use tsm_core::{Build, BuildRecord, Event, Observer, Query, Result};

/// Turn raw index records into matching builds, oldest first.
///
/// Records whose file name doesn't contain `platform` are dropped. Records
/// whose file name has no version or build time are dropped with a warning.
/// The sort is stable, so builds with equal timestamps keep index order.
pub fn select_candidates(
    records: &[BuildRecord],
    query: &Query,
    platform: Option<&str>,
    zip_base_url: &str,
    observer: &dyn Observer,
) -> Vec<Build> {
    let platform = platform.filter(|p| !p.is_empty());

    let mut builds: Vec<Build> = records
        .iter()
        .filter(|record| platform.map_or(true, |p| record.filename.contains(p)))
        .filter_map(|record| {
            let build = Build::from_record(record, zip_base_url);
            if build.is_none() {
                observer.notify(&Event::Warn(format!(
                    "couldn't parse version or date from filename: {}",
                    record.filename
                )));
            }
            build
        })
        .filter(|build| query.matches(&build.version, &build.git_revision))
        .collect();

    builds.sort_by_key(|build| build.build_timestamp);
    builds
}

impl CatalogClient {
    /// Fetch every branch index and return the builds matching `query`.
    ///
    /// Indices are fetched concurrently. The first failing request fails the
    /// whole call.
    #[instrument(skip(self, query, observer), fields(query = %query))]
    pub async fn fetch_candidates(
        &self,
        query: &Query,
        platform: Option<&str>,
        observer: &dyn Observer,
    ) -> Result<Vec<Build>> {
        let branches = self.branches().list().await?;
        for branch in &branches {
            observer.notify(&Event::Debug(format!("fetching builds for branch {branch}")));
        }

        let builds = self.builds();
        let indices = try_join_all(branches.iter().map(|b| builds.for_branch(b))).await?;
        let records: Vec<BuildRecord> = indices.into_iter().flatten().collect();

        Ok(select_candidates(
            &records,
            query,
            platform,
            &self.config().zip_base_url,
            observer,
        ))
    }
}
