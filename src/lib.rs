//! Figma Fetch Core Library
//!
//! This library retrieves design files and exported assets from the Figma
//! REST API, optionally through a corporate forward proxy, and hands raw
//! documents to a pluggable simplification transform.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Explicit service configuration (token, proxy, dev mode)
//! - [`transport`] - Authenticated, proxy-tunnelled request layer and error mapping
//! - [`document`] - File/node retrieval and the simplifier contract
//! - [`assets`] - Batched node export and fill-image resolution
//! - [`download`] - Streaming download primitive for asset URLs
//! - [`diagnostics`] - Development-mode JSON snapshots
//! - [`logger`] - Injected operator log capability

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assets;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod download;
mod error;
pub mod logger;
mod service;
pub mod transport;
mod user_agent;

// Re-export commonly used types
pub use assets::{EXPORT_SCALE, ExportFormat, ExportRequest, FillRequest};
pub use config::{FigmaConfig, ProxyRoute};
pub use document::{DesignSimplifier, PassthroughSimplifier, RawDesign};
pub use download::{AssetDownloader, DownloadError, HttpAssetDownloader};
pub use error::FigmaError;
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use service::FigmaService;
pub use transport::Transport;
