//! Persistence sink for downloaded images
//!
//! The sink is the only writer to the output directory. Files are created
//! once and never overwritten, which makes a crawl safe to repeat: an image
//! already on disk is skipped before any network request is made.

use crate::crawler::fetcher::fetch_bytes;
use crate::url::{file_name_for, AbsoluteImageUrl};
use reqwest::Client;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Result of persisting one image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveOutcome {
    /// The destination already existed; nothing was fetched or written
    Skipped,

    /// The image was downloaded and written
    Saved,

    /// Download or write failed; nothing is left on disk
    Failed,
}

/// Writes downloaded images into a flat output directory
#[derive(Debug, Clone)]
pub struct PersistenceSink {
    client: Client,
    output_dir: PathBuf,
}

impl PersistenceSink {
    /// Creates a sink writing into `output_dir`
    ///
    /// The directory must already exist; the coordinator creates it at
    /// startup.
    pub fn new(client: Client, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }

    /// Saves an image under the file name derived from its URL
    ///
    /// A URL without a usable file name is reported as `Failed`.
    pub async fn save(&self, url: &AbsoluteImageUrl) -> SaveOutcome {
        match file_name_for(url) {
            Ok(file_name) => {
                let destination = self.output_dir.join(file_name);
                self.save_if_absent(url, &destination).await
            }
            Err(e) => {
                tracing::warn!("Failed to download {}: {}", url, e);
                SaveOutcome::Failed
            }
        }
    }

    /// Downloads `url` into `destination` unless the destination exists
    ///
    /// # Outcomes
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | Destination exists | `Skipped`, no request sent |
    /// | Destination created by someone else mid-download | `Skipped` |
    /// | Fetch fails (transport, timeout, non-2xx) | `Failed`, logged as warning |
    /// | Write fails | `Failed`, partial file removed |
    /// | Otherwise | `Saved` |
    ///
    /// This never returns an error; every failure is logged and folded into
    /// the outcome.
    pub async fn save_if_absent(&self, url: &AbsoluteImageUrl, destination: &Path) -> SaveOutcome {
        match tokio::fs::try_exists(destination).await {
            Ok(true) => {
                tracing::debug!("Skipping {}: already exists", destination.display());
                return SaveOutcome::Skipped;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("Failed to check {}: {}", destination.display(), e);
                return SaveOutcome::Failed;
            }
        }

        let bytes = match fetch_bytes(&self.client, url.as_str()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to download {}: {}", url, e);
                return SaveOutcome::Failed;
            }
        };

        // create_new closes the gap between the existence check and the write
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("Skipping {}: created concurrently", destination.display());
                return SaveOutcome::Skipped;
            }
            Err(e) => {
                tracing::warn!("Failed to create {}: {}", destination.display(), e);
                return SaveOutcome::Failed;
            }
        };

        if let Err(e) = write_fully(&mut file, &bytes).await {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                tracing::warn!(
                    "Failed to remove partial file {}: {}",
                    destination.display(),
                    remove_err
                );
            }
            tracing::warn!("Failed to write {}: {}", destination.display(), e);
            return SaveOutcome::Failed;
        }

        tracing::info!("Saved {}", display_name(destination));
        SaveOutcome::Saved
    }
}

async fn write_fully(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
