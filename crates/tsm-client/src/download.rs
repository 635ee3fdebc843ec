//! Streaming build archives to disk.

use crate::client::http_error;
use crate::CatalogClient;
use futures_util::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};
use tsm_core::{Build, Event, Observer, Progress, Result, TsmError};

impl CatalogClient {
    /// Download `build`'s archive to `dest`, reporting progress per chunk.
    ///
    /// The expected size comes from the response's `Content-Length`, or from
    /// the build record when the server doesn't send one. Returns the number
    /// of bytes written.
    #[instrument(skip(self, build, observer), fields(url = %build.download_url))]
    pub async fn download(&self, build: &Build, dest: &Path, observer: &dyn Observer) -> Result<u64> {
        let url = build.download_url.as_str();
        let response = self.get_stream(url).await?;
        let total = response
            .content_length()
            .filter(|len| *len > 0)
            .unwrap_or(build.size);

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| TsmError::io(dest, e))?;
        let mut stream = response.bytes_stream();
        let mut received: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| http_error(url, &e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| TsmError::io(dest, e))?;
            received += chunk.len() as u64;
            observer.notify(&Event::Progress(Progress::new(received, total)));
        }

        file.flush().await.map_err(|e| TsmError::io(dest, e))?;
        observer.notify(&Event::Progress(Progress::complete(received)));
        debug!(bytes = received, path = %dest.display(), "archive saved");

        Ok(received)
    }
}
