//! Unpacking downloaded build archives.

use crate::error::{LocalError, LocalResult};
use async_trait::async_trait;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Unpacks an archive into a directory
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract `archive` into `dest`, keeping the archive's own paths
    async fn extract(&self, archive: &Path, dest: &Path) -> LocalResult<()>;
}

/// [`Extractor`] for zip archives
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

#[async_trait]
impl Extractor for ZipExtractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> LocalResult<()> {
        let archive_path = archive.to_path_buf();
        let dest = dest.to_path_buf();

        tokio::task::spawn_blocking(move || unpack_zip(&archive_path, &dest))
            .await
            .map_err(|e| LocalError::Extract {
                path: archive.to_path_buf(),
                reason: e.to_string(),
            })?
    }
}

fn unpack_zip(archive_path: &Path, dest: &Path) -> LocalResult<()> {
    let extract_error = |reason: String| LocalError::Extract {
        path: archive_path.to_path_buf(),
        reason,
    };

    let file = File::open(archive_path).map_err(|e| LocalError::io(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| extract_error(format!("failed to open zip: {e}")))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| extract_error(format!("failed to read zip entry: {e}")))?;

        let relative: PathBuf = entry
            .enclosed_name()
            .ok_or_else(|| extract_error(format!("unsafe entry name `{}`", entry.name())))?;
        let target = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| LocalError::io(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| LocalError::io(parent, e))?;
        }
        let mut out = File::create(&target).map_err(|e| LocalError::io(&target, e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| LocalError::io(&target, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&target, fs::Permissions::from_mode(mode))
                    .map_err(|e| LocalError::io(&target, e))?;
            }
        }
    }

    debug!(
        archive = %archive_path.display(),
        entries = archive.len(),
        "archive extracted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_sdk_zip(path: &Path) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        zip.add_directory("mobilesdk/osx/2.2.0/", options).unwrap();
        zip.start_file("mobilesdk/osx/2.2.0/version.txt", options)
            .unwrap();
        zip.write_all(b"version=2.2.0\ntimestamp=08/27/12 14:33\ngithash=79e9c73\n")
            .unwrap();
        zip.start_file(
            "mobilesdk/osx/2.2.0/titanium.py",
            options.unix_permissions(0o755),
        )
        .unwrap();
        zip.write_all(b"print('titanium')\n").unwrap();
        zip.finish().unwrap();
    }

    #[tokio::test]
    async fn test_extract_keeps_layout() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("mobilesdk-2.2.0.v20120827143312-osx.zip");
        write_sdk_zip(&archive);

        let dest = dir.path().join("out");
        ZipExtractor.extract(&archive, &dest).await.unwrap();

        let sdk = dest.join("mobilesdk/osx/2.2.0");
        assert!(sdk.join("version.txt").is_file());
        assert_eq!(
            fs::read_to_string(sdk.join("titanium.py")).unwrap(),
            "print('titanium')\n"
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(sdk.join("titanium.py")).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[tokio::test]
    async fn test_extract_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();

        let err = ZipExtractor.extract(&archive, dir.path()).await.unwrap_err();
        assert!(matches!(err, LocalError::Extract { .. }));
    }

    #[tokio::test]
    async fn test_extract_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let err = ZipExtractor
            .extract(&dir.path().join("missing.zip"), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, LocalError::Io { .. }));
    }
}
