//! Document retrieval and the simplification contract.
//!
//! The service fetches a whole file or a node subtree, wraps the raw JSON in
//! [`RawDesign`] and hands it to a [`DesignSimplifier`]. The simplifier's
//! output is returned unchanged; the core never looks inside it.

use serde::Serialize;
use tracing::{instrument, warn};

use crate::FigmaError;
use crate::diagnostics::{RAW_SNAPSHOT, SIMPLIFIED_SNAPSHOT};
use crate::service::FigmaService;

/// Raw payload as returned by one of the two document endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawDesign {
    /// Body of `GET /files/{key}`.
    File(serde_json::Value),
    /// Body of `GET /files/{key}/nodes`.
    Nodes(serde_json::Value),
}

impl RawDesign {
    /// Returns the JSON body regardless of which endpoint produced it.
    #[must_use]
    pub fn as_json(&self) -> &serde_json::Value {
        match self {
            Self::File(value) | Self::Nodes(value) => value,
        }
    }

    /// Consumes the payload, returning the JSON body.
    #[must_use]
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Self::File(value) | Self::Nodes(value) => value,
        }
    }
}

/// Converts a raw Figma document into a consumer-friendly design model.
///
/// Implementations must accept both [`RawDesign`] shapes and produce the same
/// output type from either.
pub trait DesignSimplifier: Send + Sync {
    /// The simplified design model.
    type Output: Serialize + Send;

    /// Simplifies one raw payload.
    fn simplify(&self, raw: &RawDesign) -> Self::Output;
}

/// Returns the raw JSON unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSimplifier;

impl DesignSimplifier for PassthroughSimplifier {
    type Output = serde_json::Value;

    fn simplify(&self, raw: &RawDesign) -> Self::Output {
        raw.as_json().clone()
    }
}

impl<S: DesignSimplifier> FigmaService<S> {
    /// Fetches a whole file, optionally capped at `depth` levels of nesting.
    ///
    /// `None` or `0` leaves the depth to the API default.
    ///
    /// # Errors
    ///
    /// Propagates any [`FigmaError`] from the request layer.
    #[instrument(skip(self))]
    pub async fn get_file(
        &self,
        file_key: &str,
        depth: Option<u32>,
    ) -> Result<S::Output, FigmaError> {
        let endpoint = file_endpoint(file_key, depth);
        self.logger.log(&format!(
            "Retrieving Figma file: {file_key} (depth: {})",
            depth_label(depth)
        ));
        let response: serde_json::Value = self
            .transport
            .request(&endpoint)
            .await
            .inspect_err(|error| warn!(file_key, error = %error, "Failed to get file"))?;
        self.logger.log("Got response");
        Ok(self.simplify_and_record(RawDesign::File(response)).await)
    }

    /// Fetches the subtree rooted at `node_id`, optionally capped at `depth`.
    ///
    /// # Errors
    ///
    /// Propagates any [`FigmaError`] from the request layer.
    #[instrument(skip(self))]
    pub async fn get_node(
        &self,
        file_key: &str,
        node_id: &str,
        depth: Option<u32>,
    ) -> Result<S::Output, FigmaError> {
        let endpoint = nodes_endpoint(file_key, node_id, depth);
        let response: serde_json::Value = self.transport.request(&endpoint).await?;
        self.logger.log("Got response from getNode, now parsing.");
        Ok(self.simplify_and_record(RawDesign::Nodes(response)).await)
    }

    async fn simplify_and_record(&self, raw: RawDesign) -> S::Output {
        self.diagnostics.write(RAW_SNAPSHOT, &raw).await;
        let simplified = self.simplifier.simplify(&raw);
        self.diagnostics.write(SIMPLIFIED_SNAPSHOT, &simplified).await;
        simplified
    }
}

fn file_endpoint(file_key: &str, depth: Option<u32>) -> String {
    let key = urlencoding::encode(file_key);
    match positive(depth) {
        Some(depth) => format!("/files/{key}?depth={depth}"),
        None => format!("/files/{key}"),
    }
}

fn nodes_endpoint(file_key: &str, node_id: &str, depth: Option<u32>) -> String {
    let key = urlencoding::encode(file_key);
    let ids = urlencoding::encode(node_id);
    match positive(depth) {
        Some(depth) => format!("/files/{key}/nodes?ids={ids}&depth={depth}"),
        None => format!("/files/{key}/nodes?ids={ids}"),
    }
}

fn positive(depth: Option<u32>) -> Option<u32> {
    depth.filter(|d| *d > 0)
}

fn depth_label(depth: Option<u32>) -> String {
    positive(depth).map_or_else(|| "default".to_string(), |d| d.to_string())
}
