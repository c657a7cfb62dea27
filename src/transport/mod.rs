//! Authenticated request layer for the Figma REST API.
//!
//! [`Transport`] issues one GET per call, with the access token, a fixed
//! User-Agent and `Accept: */*`, optionally tunnelled through a forward proxy.
//! Every failure is mapped onto [`FigmaError`]:
//!
//! - no Tokio runtime driving the call → [`FigmaError::Capability`], before any I/O
//! - non-success status → [`FigmaError::Service`]
//! - no response at all (DNS, connect, TLS, proxy, timeout) → [`FigmaError::Transport`]
//! - anything else, such as an undecodable body → [`FigmaError::Unknown`]
//!
//! There are no retries.

mod http_client;

pub(crate) use http_client::build_http_client;

use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::FigmaError;
use crate::config::{FigmaConfig, ProxyRoute};
use crate::logger::Logger;

/// Header carrying the personal access token.
pub const TOKEN_HEADER: &str = "X-Figma-Token";

const REDACTED: &str = "***";

/// Issues authenticated GET requests against the API base URL.
pub struct Transport {
    client: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
    proxy: Option<ProxyRoute>,
    logger: Arc<dyn Logger>,
}

impl Transport {
    /// Creates a transport from `config`, building its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError::Capability`] when the HTTP client cannot be built.
    pub fn new(config: &FigmaConfig, logger: Arc<dyn Logger>) -> Result<Self, FigmaError> {
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            user_agent: config.user_agent.clone(),
            proxy: config.proxy.clone(),
            logger,
        })
    }

    /// Returns the underlying client, shared with asset downloads.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches `endpoint` (path and query appended to the base URL) and
    /// decodes the JSON body as `T`.
    ///
    /// The body is not validated beyond deserialization.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error mapping.
    #[instrument(level = "debug", skip(self))]
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FigmaError> {
        ensure_network_capability()?;

        let url = format!("{}{endpoint}", self.base_url);
        match &self.proxy {
            Some(proxy) => self
                .logger
                .log(&format!("Calling {url} through proxy {proxy}")),
            None => self.logger.log(&format!("Calling {url}")),
        }
        self.logger.log(&format!(
            "Sending request with headers: {}",
            self.redacted_headers()
        ));

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.api_key)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "*/*")
            .send()
            .await
            .map_err(|error| {
                self.logger.log(&format!("Error making request: {error}"));
                classify_send_error(&error)
            })?;

        let status = response.status();
        self.logger
            .log(&format!("Received response with status: {}", status.as_u16()));

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            self.logger.log(&format!("Error status: {}", status.as_u16()));
            self.logger.log(&format!("Error data: {body}"));
            return Err(FigmaError::service(
                status.as_u16(),
                status.canonical_reason(),
            ));
        }

        let body = response.bytes().await.map_err(|error| {
            self.logger
                .log(&format!("Error reading response body: {error}"));
            FigmaError::transport(error.to_string())
        })?;

        serde_json::from_slice(&body).map_err(|error| {
            FigmaError::unknown(format!("decode response from {url}"), error.to_string())
        })
    }

    fn redacted_headers(&self) -> serde_json::Value {
        serde_json::json!({
            TOKEN_HEADER: REDACTED,
            "User-Agent": self.user_agent,
            "Accept": "*/*",
        })
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .finish_non_exhaustive()
    }
}

/// Fails fast when no Tokio runtime is available to drive network I/O.
///
/// # Errors
///
/// Returns [`FigmaError::Capability`] outside a Tokio runtime.
pub fn ensure_network_capability() -> Result<(), FigmaError> {
    tokio::runtime::Handle::try_current()
        .map(|_| ())
        .map_err(|_| {
            FigmaError::capability(
                "no Tokio runtime is driving this call, so the HTTP stack cannot reach the \
                 Figma API. Run the service inside a Tokio runtime (for example under \
                 #[tokio::main]); no other executor will work.",
            )
        })
}

fn classify_send_error(error: &reqwest::Error) -> FigmaError {
    if error.is_builder() {
        FigmaError::unknown("build request", error.to_string())
    } else {
        FigmaError::transport(error.to_string())
    }
}
