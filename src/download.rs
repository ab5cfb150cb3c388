//! Document downloader.
//!
//! Streams `GET {download_url}?file_id=<id>` into the download directory.
//! The body goes to a uniquely named `.<uuid>.part` file first and is renamed onto
//! the destination only once fully written, so a failed or concurrent
//! download never exposes a truncated document.

use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::catalog::{CatalogError, CatalogFetcher};
use crate::config::{RemoteConfig, StorageConfig};
use crate::models::BulkDownload;

/// Write buffer size; the body reaches disk in blocks of this many bytes.
pub const DOWNLOAD_CHUNK_BYTES: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid filename '{0}'")]
    InvalidFilename(String),

    #[error("download request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("download endpoint returned HTTP {0}")]
    Status(StatusCode),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Checks that `name` is a single plain path component.
pub fn validate_filename(name: &str) -> Result<(), DownloadError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
        || Path::new(name).is_absolute();
    if bad {
        Err(DownloadError::InvalidFilename(name.to_string()))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
    url: String,
    dir: PathBuf,
}

impl Downloader {
    pub fn new(client: reqwest::Client, remote: &RemoteConfig, storage: &StorageConfig) -> Self {
        Self {
            client,
            url: remote.download_url.clone(),
            dir: storage.download_dir.clone(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.dir
    }

    /// Downloads one document and returns the local path it was written to.
    ///
    /// Nothing is written unless the endpoint answers `200`.
    pub async fn download(&self, file_id: &str, filename: &str) -> Result<PathBuf, DownloadError> {
        validate_filename(filename)?;

        tracing::debug!(file_id, filename, "requesting document");
        let mut response = self
            .client
            .get(&self.url)
            .query(&[("file_id", file_id)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::Status(status));
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DownloadError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let dest = self.dir.join(filename);
        // Fixed-length name so long destination filenames still fit the OS limit.
        let part = self.dir.join(format!(".{}.part", uuid::Uuid::new_v4()));

        let result = match stream_to_file(&mut response, &part).await {
            Ok(bytes) => tokio::fs::rename(&part, &dest)
                .await
                .map(|()| bytes)
                .map_err(|source| DownloadError::Io {
                    path: dest.clone(),
                    source,
                }),
            Err(e) => Err(e),
        };

        match result {
            Ok(bytes) => {
                tracing::info!(file_id, path = %dest.display(), bytes, "document downloaded");
                Ok(dest)
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&part).await;
                Err(e)
            }
        }
    }

    /// Downloads every well-formed catalog entry, one after another.
    ///
    /// Only a catalog failure is an error. Malformed entries and failed
    /// downloads are counted in the returned [`BulkDownload`].
    pub async fn download_all(
        &self,
        catalog: &CatalogFetcher,
    ) -> Result<BulkDownload, CatalogError> {
        let entries = catalog.fetch().await?;
        let mut outcome = BulkDownload {
            catalog_len: entries.len(),
            ..BulkDownload::default()
        };

        for entry in &entries {
            let (Some(file_id), Some(filename)) = (entry.file_id(), entry.filename()) else {
                tracing::warn!(?entry, "skipping malformed catalog entry");
                outcome.skipped += 1;
                continue;
            };

            match self.download(&file_id, filename).await {
                Ok(path) => outcome.files.push(path),
                Err(e) => {
                    tracing::warn!(file_id = %file_id, filename, error = %e, "download failed");
                    outcome.failed += 1;
                }
            }
        }

        tracing::info!(
            downloaded = outcome.files.len(),
            skipped = outcome.skipped,
            failed = outcome.failed,
            "bulk download finished"
        );
        Ok(outcome)
    }
}

async fn stream_to_file(
    response: &mut reqwest::Response,
    path: &Path,
) -> Result<u64, DownloadError> {
    let io_err = |source| DownloadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::create(path).await.map_err(io_err)?;
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_BYTES, file);
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await? {
        writer.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }

    writer.flush().await.map_err(io_err)?;
    writer.into_inner().sync_all().await.map_err(io_err)?;
    Ok(written)
}
