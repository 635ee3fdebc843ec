//! Reconciling published builds with local installations.

use crate::types::{Build, InstalledBuild, InventoryEntry};
use std::collections::{HashMap, HashSet};

/// Merge available builds with installed ones into a single inventory.
///
/// Every published build whose short hash is installed is flagged as
/// installed. Installations with no published counterpart (a retired branch,
/// an unreachable server) are appended as local-only entries. The result has
/// one entry per short hash and is sorted oldest first.
#[must_use]
pub fn merge(available: Vec<Build>, installed: Vec<InstalledBuild>) -> Vec<InventoryEntry> {
    let mut installed_by_hash: HashMap<String, InstalledBuild> = installed
        .into_iter()
        .map(|build| (build.short_hash.clone(), build))
        .collect();

    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(available.len() + installed_by_hash.len());

    for build in available {
        if !seen.insert(build.short_hash.clone()) {
            continue;
        }
        let is_installed = installed_by_hash.remove(&build.short_hash).is_some();
        merged.push(InventoryEntry::remote(build, is_installed));
    }

    // installed builds that aren't published any more
    let mut local_only: Vec<InstalledBuild> = installed_by_hash.into_values().collect();
    local_only.sort_by(|a, b| a.install_path.cmp(&b.install_path));
    merged.extend(local_only.into_iter().map(InventoryEntry::local));

    merged.sort_by_key(InventoryEntry::timestamp);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{short_hash, Origin};
    use chrono::{DateTime, Local, TimeZone};
    use std::path::PathBuf;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn available(revision: &str, version: &str, date: DateTime<Local>) -> Build {
        let filename = format!("mobilesdk-{version}.v{}-osx.zip", date.format("%Y%m%d%H%M%S"));
        Build {
            download_url: format!("http://builds.example.com/mobile/master/{filename}"),
            filename,
            git_revision: revision.to_string(),
            short_hash: short_hash(revision),
            branch: "master".into(),
            build_type: "mobile".into(),
            size: 26_961_576,
            sha1: "2a60ec1e0b693047e6fa9112fe93944c5432a3c3".into(),
            build_url: "http://jenkins.appcelerator.org/job/titanium_mobile_master/1277/".into(),
            version: version.to_string(),
            build_timestamp: date,
        }
    }

    fn installed(hash: &str, version: &str, date: DateTime<Local>) -> InstalledBuild {
        InstalledBuild {
            short_hash: hash.to_string(),
            version: version.to_string(),
            install_timestamp: date,
            install_path: PathBuf::from("/sdks").join(version),
        }
    }

    #[test]
    fn test_merge_shared_remote_and_local_only() {
        let remote = vec![
            available("c63b0d947da94e2cdfb3fb06e95106cb803c3f22", "2.1.0", at(2012, 8, 27, 13, 24)),
            available("79e9c73d5070fc4306d37bc1cf8cbabb2ad67ae8", "2.2.0", at(2012, 8, 27, 14, 33)),
        ];
        let local = vec![
            installed("c63b0d9", "2.1.0", at(2012, 7, 27, 18, 1)),
            installed("61078b0", "2.2.0", at(2012, 8, 10, 23, 41)),
        ];

        let merged = merge(remote, local);
        assert_eq!(merged.len(), 3);

        let shared: Vec<_> = merged.iter().filter(|e| e.short_hash() == "c63b0d9").collect();
        assert_eq!(shared.len(), 1);
        assert!(shared[0].installed);
        assert!(shared[0].as_remote().is_some(), "remote fields win");

        let remote_only = merged.iter().find(|e| e.short_hash() == "79e9c73").unwrap();
        assert!(!remote_only.installed);

        let local_only = merged.iter().find(|e| e.short_hash() == "61078b0").unwrap();
        assert!(local_only.installed);
        assert_eq!(
            local_only.as_local().map(|b| b.install_path.clone()),
            Some(PathBuf::from("/sdks/2.2.0"))
        );

        let order: Vec<&str> = merged.iter().map(InventoryEntry::short_hash).collect();
        assert_eq!(order, ["61078b0", "c63b0d9", "79e9c73"]);
    }

    #[test]
    fn test_merge_keeps_all_installed_when_remote_is_empty() {
        let local = vec![
            installed("0a43607", "2.1.1", at(2012, 7, 17, 2, 46)),
            installed("cde5b27", "2.1.0", at(2012, 5, 2, 14, 18)),
        ];

        let merged = merge(Vec::new(), local);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|e| e.installed));
        assert!(matches!(merged[0].origin, Origin::Local(_)));
        assert_eq!(merged[0].version(), "2.1.0");
    }

    #[test]
    fn test_merge_one_entry_per_hash() {
        let revision = "79e9c73d5070fc4306d37bc1cf8cbabb2ad67ae8";
        let mut linux = available(revision, "2.2.0", at(2012, 8, 27, 14, 33));
        linux.filename = linux.filename.replace("osx", "linux");
        let remote = vec![available(revision, "2.2.0", at(2012, 8, 27, 14, 33)), linux];
        let local = vec![installed("79e9c73", "2.2.0", at(2012, 8, 27, 14, 33))];

        let merged = merge(remote, local);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].installed);
        assert!(merged[0].as_remote().unwrap().filename.contains("osx"));
    }
}
