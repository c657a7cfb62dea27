//! HTTP client construction policy for Figma traffic.
//!
//! Proxy auto-detection from the environment and the OS is always disabled.
//! When a [`ProxyRoute`] is configured, HTTPS requests are tunnelled through it
//! with `CONNECT`; no proxy credentials are sent. Relaxed certificate
//! validation only ever applies to tunnelled traffic.

use reqwest::{Client, Proxy};
use tracing::{debug, warn};

use crate::FigmaError;
use crate::config::{FigmaConfig, ProxyRoute};

/// Builds the client shared by API calls and asset downloads.
///
/// # Errors
///
/// Returns [`FigmaError::Capability`] when the HTTP stack cannot be initialized,
/// and [`FigmaError::Unknown`] when the proxy route is not a usable URL.
pub(crate) fn build_http_client(config: &FigmaConfig) -> Result<Client, FigmaError> {
    let mut builder = Client::builder().no_proxy().gzip(true);

    if let Some(route) = &config.proxy {
        builder = builder.proxy(tunnel_proxy(route)?);
        debug!(proxy = %route, "tunnelling HTTPS traffic through proxy");
    }

    if relaxes_tls(config) {
        warn!("TLS certificate validation is disabled for tunnelled Figma traffic");
        builder = builder.danger_accept_invalid_certs(true);
    } else if config.accept_invalid_certs {
        warn!("ignoring accept_invalid_certs: no proxy is configured, so TLS stays strict");
    }

    builder.build().map_err(|error| {
        FigmaError::capability(format!("HTTP client could not be initialized: {error}"))
    })
}

/// Whether the client skips certificate validation.
///
/// Only true when a proxy route is set; direct connections always validate.
fn relaxes_tls(config: &FigmaConfig) -> bool {
    config.accept_invalid_certs && config.proxy.is_some()
}

fn tunnel_proxy(route: &ProxyRoute) -> Result<Proxy, FigmaError> {
    Proxy::https(route.proxy_url()).map_err(|error| {
        FigmaError::unknown(
            "configure proxy",
            format!("{} is not a usable proxy: {error}", route.proxy_url()),
        )
    })
}
