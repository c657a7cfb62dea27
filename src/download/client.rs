//! HTTP download primitive for exported assets.
//!
//! This module provides the [`AssetDownloader`] seam and its reqwest-backed
//! implementation, [`HttpAssetDownloader`], which streams an asset URL to a
//! named file inside a destination directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::error::DownloadError;
use super::filename::resolve_target_path;

/// Writes a remote asset to `destination/file_name`.
///
/// Implementations must create or overwrite the target file and return its
/// path, or fail with a [`DownloadError`].
#[async_trait]
pub trait AssetDownloader: Send + Sync {
    /// Downloads `url` into `destination` under `file_name`.
    async fn download(
        &self,
        file_name: &str,
        destination: &Path,
        url: &str,
    ) -> Result<PathBuf, DownloadError>;
}

/// Streams assets to disk with a shared reqwest client.
///
/// The client is expected to be the same one used for API calls so that asset
/// downloads follow the same proxy and TLS policy.
#[derive(Debug, Clone)]
pub struct HttpAssetDownloader {
    client: Client,
}

impl HttpAssetDownloader {
    /// Creates a downloader over an existing client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetDownloader for HttpAssetDownloader {
    #[instrument(skip(self), fields(url = %url))]
    async fn download(
        &self,
        file_name: &str,
        destination: &Path,
        url: &str,
    ) -> Result<PathBuf, DownloadError> {
        let file_path = resolve_target_path(destination, file_name)?;
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::io(parent.to_path_buf(), e))?;
        }

        debug!(path = %file_path.display(), "starting asset download");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        if !response.status().is_success() {
            return Err(DownloadError::http_status(url, response.status().as_u16()));
        }

        let mut file = File::create(&file_path)
            .await
            .map_err(|e| DownloadError::io(file_path.clone(), e))?;

        let stream_result = stream_to_file(&mut file, response, url, &file_path).await;
        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
        }
        let bytes = stream_result?;

        info!(path = %file_path.display(), bytes, "asset downloaded");
        Ok(file_path)
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
