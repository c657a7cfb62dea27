//! The Figma service: one value owning the transport, downloader, simplifier
//! and diagnostics sink.
//!
//! Operations live next to their concerns:
//! - [`get_file`](FigmaService::get_file) / [`get_node`](FigmaService::get_node) in [`crate::document`]
//! - [`get_images`](FigmaService::get_images) in [`crate::assets`]
//! - [`get_image_fills`](FigmaService::get_image_fills) in [`crate::assets`]

use std::fmt;
use std::sync::Arc;

use crate::FigmaError;
use crate::config::FigmaConfig;
use crate::diagnostics::DiagnosticsSink;
use crate::document::PassthroughSimplifier;
use crate::download::{AssetDownloader, HttpAssetDownloader};
use crate::logger::{Logger, TracingLogger};
use crate::transport::Transport;

/// Retrieves design documents and exports assets from the Figma API.
///
/// # Example
///
/// ```no_run
/// use figma_fetch::{FigmaConfig, FigmaService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FigmaConfig::from_env("figd_token")?;
/// let service = FigmaService::new(config)?;
/// let design = service.get_file("ABC123", Some(2)).await?;
/// println!("{design}");
/// # Ok(())
/// # }
/// ```
pub struct FigmaService<S = PassthroughSimplifier> {
    pub(crate) transport: Transport,
    pub(crate) downloader: Arc<dyn AssetDownloader>,
    pub(crate) simplifier: S,
    pub(crate) diagnostics: DiagnosticsSink,
    pub(crate) logger: Arc<dyn Logger>,
}

impl FigmaService<PassthroughSimplifier> {
    /// Creates a service that logs through `tracing` and returns raw documents.
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError`] when the HTTP client cannot be built.
    pub fn new(config: FigmaConfig) -> Result<Self, FigmaError> {
        Self::with_parts(config, Arc::new(TracingLogger), PassthroughSimplifier)
    }
}

impl<S> FigmaService<S> {
    /// Creates a service with an explicit logger and simplification transform.
    ///
    /// Asset downloads share the transport's client, so they follow the same
    /// proxy and TLS policy as API calls.
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError`] when the HTTP client cannot be built.
    pub fn with_parts(
        config: FigmaConfig,
        logger: Arc<dyn Logger>,
        simplifier: S,
    ) -> Result<Self, FigmaError> {
        let transport = Transport::new(&config, Arc::clone(&logger))?;
        let downloader = Arc::new(HttpAssetDownloader::new(transport.client().clone()));

        match &config.proxy {
            Some(proxy) => logger.log(&format!("FigmaService initialized with proxy: {proxy}")),
            None => logger.log("FigmaService initialized without proxy"),
        }

        Ok(Self {
            transport,
            downloader,
            simplifier,
            diagnostics: DiagnosticsSink::new(config.dev_mode, config.logs_dir),
            logger,
        })
    }

    /// Replaces the download primitive.
    #[must_use]
    pub fn with_downloader(mut self, downloader: Arc<dyn AssetDownloader>) -> Self {
        self.downloader = downloader;
        self
    }

    /// Returns the request layer.
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

impl<S> fmt::Debug for FigmaService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigmaService")
            .field("transport", &self.transport)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}
