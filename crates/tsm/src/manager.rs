//! High-level SDK operations.

use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};
use tsm_client::CatalogClient;
use tsm_core::{
    merge, Build, Event, InstalledBuild, InventoryEntry, Observer, Query, Result, TsmError,
};
use tsm_local::{
    run_script, scan_installed, CommandRunner, DirRemover, Extractor, Remover, SystemRunner,
    ZipExtractor,
};

/// Interpreter used for helper scripts unless configured otherwise
pub const DEFAULT_PYTHON: &str = "python";

/// What [`SdkManager::list`] should look at
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only published builds for this platform (`osx`, `linux`, `win32`)
    pub platform: Option<String>,
    /// Version range or revision prefix
    pub query: Query,
    /// Scan this directory for installed builds
    pub installed: Option<PathBuf>,
    /// Fetch published builds
    pub available: bool,
}

impl ListOptions {
    /// Options that look at nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict published builds to a platform
    #[must_use]
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Filter by version range or revision prefix
    #[must_use]
    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = query.into();
        self
    }

    /// Scan `dir` for installed builds
    #[must_use]
    pub fn installed(mut self, dir: impl Into<PathBuf>) -> Self {
        self.installed = Some(dir.into());
        self
    }

    /// Whether to fetch published builds
    #[must_use]
    pub const fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

/// Installs, removes, lists and runs SDK builds
#[derive(Clone)]
pub struct SdkManager {
    client: CatalogClient,
    extractor: Arc<dyn Extractor>,
    runner: Arc<dyn CommandRunner>,
    remover: Arc<dyn Remover>,
    python: String,
}

impl SdkManager {
    /// Create a manager that unpacks zip archives, deletes real directories
    /// and runs real processes
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            extractor: Arc::new(ZipExtractor),
            runner: Arc::new(SystemRunner),
            remover: Arc::new(DirRemover),
            python: DEFAULT_PYTHON.to_string(),
        }
    }

    /// Replace the archive extractor
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Replace the process runner
    #[must_use]
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    /// Replace how installation directories are deleted
    #[must_use]
    pub fn with_remover(mut self, remover: impl Remover + 'static) -> Self {
        self.remover = Arc::new(remover);
        self
    }

    /// Set the interpreter for helper scripts
    #[must_use]
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// The build server client
    #[must_use]
    pub const fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Interpreter used for helper scripts
    #[must_use]
    pub fn python(&self) -> &str {
        &self.python
    }

    /// Download and unpack the newest published build matching `query`.
    ///
    /// The archive is saved as `output_dir/<filename>`, extracted into
    /// `output_dir` and deleted afterwards. A failure at any step aborts the
    /// install; nothing is rolled back.
    #[instrument(skip_all, fields(query = %query, dir = %output_dir.display()))]
    pub async fn install(
        &self,
        query: &Query,
        platform: Option<&str>,
        output_dir: &Path,
        observer: &dyn Observer,
    ) -> Result<Build> {
        let candidates = self.client.fetch_candidates(query, platform, observer).await?;
        let build = candidates.into_iter().last().ok_or_else(|| no_match(query))?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| TsmError::io(output_dir, e))?;
        let archive = output_dir.join(&build.filename);

        observer.notify(&Event::Debug(format!("downloading {}", build.download_url)));
        self.client.download(&build, &archive, observer).await?;
        observer.notify(&Event::Downloaded);

        observer.notify(&Event::Debug(format!("extracting {}", archive.display())));
        self.extractor.extract(&archive, output_dir).await?;

        tokio::fs::remove_file(&archive)
            .await
            .map_err(|e| TsmError::io(&archive, e))?;

        info!(version = %build.version, hash = %build.short_hash, "installed");
        observer.notify(&Event::Done);
        Ok(build)
    }

    /// Delete every installed build under `dir` matching `query`.
    ///
    /// All deletions are attempted even if some fail; the first failure in
    /// scan order is returned.
    #[instrument(skip_all, fields(query = %query, dir = %dir.display()))]
    pub async fn remove(
        &self,
        dir: &Path,
        query: &Query,
        observer: &dyn Observer,
    ) -> Result<Vec<InstalledBuild>> {
        let builds = scan_installed(dir, query, observer).await?;
        if builds.is_empty() {
            return Err(no_match(query));
        }

        let deletions = builds.iter().map(|build| async move {
            observer.notify(&Event::Debug(format!(
                "removing {}",
                build.install_path.display()
            )));
            self.remover
                .remove_tree(&build.install_path)
                .await
                .map_err(TsmError::from)
        });

        join_all(deletions)
            .await
            .into_iter()
            .collect::<Result<Vec<()>>>()?;

        info!(count = builds.len(), "removed");
        observer.notify(&Event::Done);
        Ok(builds)
    }

    /// List published and installed builds as one inventory.
    ///
    /// The remote fetch and the local scan run concurrently. A side that
    /// isn't requested contributes nothing.
    #[instrument(skip_all, fields(query = %options.query))]
    pub async fn list(
        &self,
        options: &ListOptions,
        observer: &dyn Observer,
    ) -> Result<Vec<InventoryEntry>> {
        let remote = async {
            if options.available {
                self.client
                    .fetch_candidates(&options.query, options.platform.as_deref(), observer)
                    .await
            } else {
                Ok(Vec::new())
            }
        };

        let local = async {
            match &options.installed {
                Some(dir) => scan_installed(dir, &options.query, observer)
                    .await
                    .map_err(TsmError::from),
                None => Ok(Vec::new()),
            }
        };

        let (available, installed) = tokio::try_join!(remote, local)?;
        Ok(merge(available, installed))
    }

    /// Run `<target>/builder.py` of the newest installed build matching `query`
    #[instrument(skip_all, fields(query = %query, sdk_target = %target))]
    pub async fn builder(
        &self,
        dir: &Path,
        query: &Query,
        target: &str,
        args: &[String],
        observer: &dyn Observer,
    ) -> Result<InstalledBuild> {
        let build = self.resolve_installed(dir, query, observer).await?;
        let script = build.install_path.join(target).join("builder.py");
        self.run_helper(&script, args, observer).await?;
        Ok(build)
    }

    /// Run `titanium.py` of the newest installed build matching `query`
    #[instrument(skip_all, fields(query = %query))]
    pub async fn titanium(
        &self,
        dir: &Path,
        query: &Query,
        args: &[String],
        observer: &dyn Observer,
    ) -> Result<InstalledBuild> {
        let build = self.resolve_installed(dir, query, observer).await?;
        let script = build.install_path.join("titanium.py");
        self.run_helper(&script, args, observer).await?;
        Ok(build)
    }

    async fn resolve_installed(
        &self,
        dir: &Path,
        query: &Query,
        observer: &dyn Observer,
    ) -> Result<InstalledBuild> {
        scan_installed(dir, query, observer)
            .await?
            .pop()
            .ok_or_else(|| no_match(query))
    }

    async fn run_helper(&self, script: &Path, args: &[String], observer: &dyn Observer) -> Result<()> {
        observer.notify(&Event::Debug(format!(
            "running {} {}",
            self.python,
            script.display()
        )));
        run_script(self.runner.as_ref(), &self.python, script, args).await?;
        observer.notify(&Event::Done);
        Ok(())
    }
}

fn no_match(query: &Query) -> TsmError {
    TsmError::NoMatch {
        query: query.as_str().map(String::from),
    }
}
