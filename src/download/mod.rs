//! Asset download primitive.
//!
//! This module writes exported assets from their CDN URLs to a local
//! destination directory.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large renders)
//! - Creates the destination directory on demand
//! - Overwrites existing files with the same name
//! - Rejects file names that would escape the destination
//!
//! # Example
//!
//! ```no_run
//! use figma_fetch::download::{AssetDownloader, HttpAssetDownloader};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = HttpAssetDownloader::new(reqwest::Client::new());
//! let path = downloader
//!     .download("logo.png", Path::new("./assets"), "https://cdn.example.com/logo")
//!     .await?;
//! println!("Downloaded: {}", path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod filename;

pub use client::{AssetDownloader, HttpAssetDownloader};
pub use error::DownloadError;
