//! Finding installed SDK builds.
//!
//! Every immediate subdirectory of the SDK root is a candidate installation.
//! A candidate counts only if its `version.txt` names a hash, a version and a
//! readable timestamp.

use crate::error::{LocalError, LocalResult};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use tsm_core::parse::{MetadataRecord, METADATA_FILE};
use tsm_core::{Event, InstalledBuild, Observer, Query};

/// Scan `root` for installations matching `query`, oldest first.
///
/// Fails only if `root` itself can't be listed. Entries without a readable
/// or complete metadata file are skipped with a debug event.
#[instrument(skip(root, query, observer), fields(root = %root.display()))]
pub async fn scan_installed(
    root: &Path,
    query: &Query,
    observer: &dyn Observer,
) -> LocalResult<Vec<InstalledBuild>> {
    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(root)
        .await
        .map_err(|e| LocalError::io(root, e))?;
    while let Some(entry) = dir
        .next_entry()
        .await
        .map_err(|e| LocalError::io(root, e))?
    {
        entries.push(entry.path());
    }
    entries.sort();

    let mut builds = Vec::new();
    for path in entries {
        match examine_dir(&path).await {
            Ok(build) if query.matches(&build.version, &build.short_hash) => builds.push(build),
            Ok(build) => debug!(path = %path.display(), version = %build.version, "not matched"),
            Err(err) => observer.notify(&Event::Debug(format!(
                "skipping {}: {err}",
                path.display()
            ))),
        }
    }

    builds.sort_by_key(|build| build.install_timestamp);
    Ok(builds)
}

/// Read a single installation directory.
///
/// A missing or unreadable metadata file is an I/O error; an incomplete one
/// is a metadata error.
pub async fn examine_dir(dir: &Path) -> LocalResult<InstalledBuild> {
    let file: PathBuf = dir.join(METADATA_FILE);
    let text = tokio::fs::read_to_string(&file)
        .await
        .map_err(|e| LocalError::io(&file, e))?;

    Ok(MetadataRecord::parse(&text).to_installed(dir)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::fs;
    use tsm_core::{ErrorKind, NoopObserver, TsmError};

    fn install(root: &Path, name: &str, metadata: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(METADATA_FILE), metadata).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_scan_skips_missing_metadata() {
        let root = tempfile::tempdir().unwrap();
        install(
            root.path(),
            "2.1.1.v20120717024611",
            "version=2.1.1\nmodule_apiversion=2\ntimestamp=07/17/12 02:46\ngithash=0a43607\n",
        );
        fs::create_dir_all(root.path().join("2.1.0.GA")).unwrap();

        let builds = scan_installed(root.path(), &Query::any(), &NoopObserver)
            .await
            .unwrap();

        assert_eq!(builds.len(), 1);
        let build = &builds[0];
        assert_eq!(build.short_hash, "0a43607");
        assert_eq!(build.version, "2.1.1");
        assert_eq!(build.install_path, root.path().join("2.1.1.v20120717024611"));
        assert_eq!(build.install_timestamp.day(), 17);
        assert_eq!(build.install_timestamp.hour(), 2);
    }

    #[tokio::test]
    async fn test_scan_sorts_and_filters() {
        let root = tempfile::tempdir().unwrap();
        install(
            root.path(),
            "2.1.1",
            "version=2.1.1\ntimestamp=07/17/12 02:46\ngithash=0a43607\n",
        );
        install(
            root.path(),
            "2.1.0",
            "version=2.1.0\ntimestamp=05/02/12 14:18\ngithash=cde5b27\n",
        );
        install(
            root.path(),
            "2.2.0",
            "version=2.2.0\ntimestamp=08/10/12 23:41\ngithash=61078b0\n",
        );

        let all = scan_installed(root.path(), &Query::any(), &NoopObserver)
            .await
            .unwrap();
        let versions: Vec<&str> = all.iter().map(|b| b.version.as_str()).collect();
        assert_eq!(versions, ["2.1.0", "2.1.1", "2.2.0"]);

        let by_range = scan_installed(root.path(), &Query::from("2.1"), &NoopObserver)
            .await
            .unwrap();
        assert_eq!(by_range.len(), 2);

        let by_hash = scan_installed(root.path(), &Query::from("6107"), &NoopObserver)
            .await
            .unwrap();
        assert_eq!(by_hash.len(), 1);
        assert_eq!(by_hash[0].version, "2.2.0");
    }

    #[tokio::test]
    async fn test_scan_reports_skipped_entries() {
        let root = tempfile::tempdir().unwrap();
        install(root.path(), "broken", "version=2.0.0\n");
        fs::write(root.path().join("stray.txt"), "not an sdk").unwrap();

        let skipped = std::sync::Mutex::new(0);
        let observer = |event: &Event| {
            if matches!(event, Event::Debug(_)) {
                *skipped.lock().unwrap() += 1;
            }
        };

        let builds = scan_installed(root.path(), &Query::any(), &observer)
            .await
            .unwrap();
        assert!(builds.is_empty());
        assert_eq!(*skipped.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_scan_missing_root() {
        let root = tempfile::tempdir().unwrap();
        let err = scan_installed(&root.path().join("nope"), &Query::any(), &NoopObserver)
            .await
            .unwrap_err();
        assert_eq!(TsmError::from(err).kind(), ErrorKind::Io);
    }

    #[tokio::test]
    async fn test_examine_dir_errors() {
        let root = tempfile::tempdir().unwrap();

        let missing = examine_dir(root.path()).await.unwrap_err();
        assert!(matches!(missing, LocalError::Io { .. }));

        let dir = install(root.path(), "partial", "githash=0a43607\ntimestamp=07/17/12 02:46\n");
        let partial = TsmError::from(examine_dir(&dir).await.unwrap_err());
        assert_eq!(partial.kind(), ErrorKind::Parse);
    }
}
