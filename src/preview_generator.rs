use crate::renderer::{render_with_options, RenderOptions};
use crate::utils::parse_input_url;
use crate::{Fetcher, LinkMetadata, MetadataExtractor, PreviewError, PreviewGenerator};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Fetches a page and extracts its Open Graph card data.
///
/// Holds no per-request state; every call performs exactly one GET.
#[derive(Clone)]
pub struct LinkPreviewGenerator {
    pub fetcher: Fetcher,
    extractor: MetadataExtractor,
}

impl LinkPreviewGenerator {
    pub fn new() -> Result<Self, PreviewError> {
        Ok(Self::new_with_fetcher(Fetcher::new()?))
    }

    pub fn new_with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            extractor: MetadataExtractor::new(),
        }
    }

    /// Fetches `url` and renders its card in one step.
    pub async fn generate_card(
        &self,
        url: &str,
        options: &RenderOptions,
    ) -> Result<String, PreviewError> {
        let data = self.generate_preview(url).await?;
        Ok(render_with_options(&data, options))
    }
}

#[async_trait]
impl PreviewGenerator for LinkPreviewGenerator {
    #[instrument(level = "debug", skip(self), err)]
    async fn generate_preview(&self, url: &str) -> Result<LinkMetadata, PreviewError> {
        // Validation happens before any request goes out.
        let parsed = parse_input_url(url)?;
        let html = self.fetcher.fetch(&parsed).await?;
        let data = self.extractor.extract(&html, &parsed, url)?;

        debug!(site_name = %data.site_name, "Extracted link metadata");
        Ok(data)
    }
}
