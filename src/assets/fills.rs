//! Fill-image resolution by image reference.

use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use tracing::{debug, instrument};

use super::{FillRequest, ImageFillsResponse};
use crate::FigmaError;
use crate::service::FigmaService;

impl<S> FigmaService<S> {
    /// Resolves each request's `image_ref` through the file's image table and
    /// saves the image as `destination/file_name`.
    ///
    /// The result has one entry per request, in order: the written path, or
    /// `None` when the reference is not in the table. An empty request list
    /// returns immediately without calling the API.
    ///
    /// # Errors
    ///
    /// Fails with the lookup error or the first download error. Files written
    /// by downloads that succeeded before the failure remain.
    #[instrument(skip(self, requests), fields(requests = requests.len()))]
    pub async fn get_image_fills(
        &self,
        file_key: &str,
        requests: &[FillRequest],
        destination: &Path,
    ) -> Result<Vec<Option<PathBuf>>, FigmaError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = format!("/files/{}/images", urlencoding::encode(file_key));
        let response: ImageFillsResponse = self.transport.request(&endpoint).await?;
        let images = response.meta.images;

        let downloads = requests.iter().map(|request| {
            let url = images.get(&request.image_ref).filter(|url| !url.is_empty());
            async move {
                let Some(url) = url else {
                    debug!(image_ref = %request.image_ref, "image reference not found; skipping");
                    return Ok(None);
                };
                self.downloader
                    .download(&request.file_name, destination, url)
                    .await
                    .map(Some)
                    .map_err(FigmaError::from)
            }
        });

        try_join_all(downloads).await
    }
}
