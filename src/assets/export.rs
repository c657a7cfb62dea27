//! Batched node export and concurrent download.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use tracing::{debug, info, instrument};

use super::{EXPORT_SCALE, ExportFormat, ExportRequest, ImagesResponse};
use crate::FigmaError;
use crate::service::FigmaService;

impl<S> FigmaService<S> {
    /// Renders each requested node and saves it as `destination/file_name`.
    ///
    /// Node ids are grouped by format so there is at most one export call per
    /// format, and the two calls run concurrently. Each request is matched
    /// against the URLs of its own format, so one node may be exported as both
    /// PNG and SVG. Nodes the API could not render are skipped. Returns the
    /// paths of the files written, in request order.
    ///
    /// # Errors
    ///
    /// Fails with the first error from either export call or any download.
    /// Files written by downloads that succeeded before the failure remain.
    #[instrument(skip(self, requests), fields(requests = requests.len()))]
    pub async fn get_images(
        &self,
        file_key: &str,
        requests: &[ExportRequest],
        destination: &Path,
    ) -> Result<Vec<PathBuf>, FigmaError> {
        let png_ids = ids_for(requests, ExportFormat::Png);
        let svg_ids = ids_for(requests, ExportFormat::Svg);

        let (png_urls, svg_urls) = tokio::try_join!(
            self.export_urls(file_key, &png_ids, ExportFormat::Png),
            self.export_urls(file_key, &svg_ids, ExportFormat::Svg),
        )?;

        let downloads = requests.iter().filter_map(|request| {
            let urls = match request.file_type {
                ExportFormat::Png => &png_urls,
                ExportFormat::Svg => &svg_urls,
            };
            let Some(url) = urls.get(&request.node_id) else {
                debug!(node_id = %request.node_id, "no export URL for node; skipping");
                return None;
            };
            Some(async move {
                self.downloader
                    .download(&request.file_name, destination, url)
                    .await
                    .map_err(FigmaError::from)
            })
        });

        let paths = try_join_all(downloads).await?;
        info!(downloaded = paths.len(), "exported images saved");
        Ok(paths)
    }

    /// Resolves export URLs for `ids` in one call; an empty id list makes no call.
    async fn export_urls(
        &self,
        file_key: &str,
        ids: &[&str],
        format: ExportFormat,
    ) -> Result<HashMap<String, String>, FigmaError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let endpoint = export_endpoint(file_key, ids, format);
        let response: ImagesResponse = self.transport.request(&endpoint).await?;
        Ok(response.into_urls())
    }
}

fn ids_for(requests: &[ExportRequest], format: ExportFormat) -> Vec<&str> {
    requests
        .iter()
        .filter(|request| request.file_type == format)
        .map(|request| request.node_id.as_str())
        .collect()
}

fn export_endpoint(file_key: &str, ids: &[&str], format: ExportFormat) -> String {
    format!(
        "/images/{}?ids={}&scale={EXPORT_SCALE}&format={format}",
        urlencoding::encode(file_key),
        urlencoding::encode(&ids.join(",")),
    )
}
