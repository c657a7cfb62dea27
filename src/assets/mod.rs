//! Asset export and fill-image resolution.
//!
//! Two entry points turn node-level requests into files on disk:
//!
//! - [`FigmaService::get_images`](crate::FigmaService::get_images) renders nodes
//!   through the export endpoint, one batched call per format.
//! - [`FigmaService::get_image_fills`](crate::FigmaService::get_image_fills)
//!   resolves fill images by reference through the file's image table.
//!
//! A request whose URL cannot be resolved is not an error; it simply produces
//! no download.
//!
//! Downloads for one call run concurrently and are joined all-or-nothing: if
//! one fails the call fails, but files already written by its siblings stay on
//! disk and are not reported.

mod export;
mod fills;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scale factor requested for every export.
pub const EXPORT_SCALE: u32 = 2;

/// Output format of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raster export.
    Png,
    /// Vector export.
    Svg,
}

impl ExportFormat {
    /// Returns the `format` query value for the export endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node to render and save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Node to render.
    pub node_id: String,
    /// File name inside the destination directory.
    pub file_name: String,
    /// Export format.
    pub file_type: ExportFormat,
}

impl ExportRequest {
    /// Creates an export request.
    #[must_use]
    pub fn new(
        node_id: impl Into<String>,
        file_name: impl Into<String>,
        file_type: ExportFormat,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            file_name: file_name.into(),
            file_type,
        }
    }
}

/// One fill image to resolve by reference and save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillRequest {
    /// Node carrying the fill.
    pub node_id: String,
    /// File name inside the destination directory.
    pub file_name: String,
    /// Key into the file's image table.
    pub image_ref: String,
}

impl FillRequest {
    /// Creates a fill request.
    #[must_use]
    pub fn new(
        node_id: impl Into<String>,
        file_name: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            file_name: file_name.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// Body of `GET /images/{key}`. A node that could not be rendered maps to `null`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ImagesResponse {
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

impl ImagesResponse {
    /// Drops unrendered (`null` or empty) entries.
    pub(crate) fn into_urls(self) -> HashMap<String, String> {
        self.images
            .into_iter()
            .filter_map(|(id, url)| url.filter(|u| !u.is_empty()).map(|u| (id, u)))
            .collect()
    }
}

/// Body of `GET /files/{key}/images`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ImageFillsResponse {
    #[serde(default)]
    pub meta: ImageFillsMeta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ImageFillsMeta {
    #[serde(default)]
    pub images: HashMap<String, String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_export_request_uses_camel_case_wire_names() {
        let request: ExportRequest = serde_json::from_value(json!({
            "nodeId": "1:1",
            "fileName": "a.png",
            "fileType": "png"
        }))
        .unwrap();
        assert_eq!(request, ExportRequest::new("1:1", "a.png", ExportFormat::Png));
    }

    #[test]
    fn test_fill_request_uses_camel_case_wire_names() {
        let request: FillRequest = serde_json::from_value(json!({
            "nodeId": "2:5",
            "fileName": "hero.jpg",
            "imageRef": "abc123"
        }))
        .unwrap();
        assert_eq!(request.image_ref, "abc123");
        assert_eq!(request.file_name, "hero.jpg");
    }

    #[test]
    fn test_unknown_export_format_is_rejected() {
        let result: Result<ExportRequest, _> = serde_json::from_value(json!({
            "nodeId": "1:1",
            "fileName": "a.gif",
            "fileType": "gif"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_images_response_drops_null_urls() {
        let response: ImagesResponse = serde_json::from_value(json!({
            "err": null,
            "images": {"1:1": "https://cdn/a", "1:2": null, "1:3": ""}
        }))
        .unwrap();
        let urls = response.into_urls();
        assert_eq!(urls.len(), 1);
        assert_eq!(urls["1:1"], "https://cdn/a");
    }

    #[test]
    fn test_image_fills_response_defaults_to_empty() {
        let response: ImageFillsResponse =
            serde_json::from_value(json!({"error": false, "status": 200})).unwrap();
        assert!(response.meta.images.is_empty());

        let response: ImageFillsResponse =
            serde_json::from_value(json!({"meta": {}})).unwrap();
        assert!(response.meta.images.is_empty());
    }
}
