use async_trait::async_trait;

mod error;
mod extractor;
mod fetcher;
#[cfg(feature = "logging")]
mod logging;
mod preview_generator;
mod renderer;
mod utils;

pub use error::PreviewError;
pub use extractor::MetadataExtractor;
pub use fetcher::{Fetcher, FetcherConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
#[cfg(feature = "logging")]
pub use logging::{log_error_card, log_preview_card, setup_logging, LogConfig};
pub use preview_generator::LinkPreviewGenerator;
pub use renderer::{render, render_with_options, EscapeMode, RenderOptions};
pub use utils::{network_location, parse_input_url, truncate_str};

/// Open Graph data for one link card.
///
/// Every field is always present; unavailable values are empty strings, while
/// `url` and `site_name` fall back to the requested URL and its host.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LinkMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub site_name: String,
}

#[async_trait]
pub trait PreviewGenerator {
    async fn generate_preview(&self, url: &str) -> Result<LinkMetadata, PreviewError>;
}

/// Fetches `url` with the default client and extracts its card data.
pub async fn extract(url: &str) -> Result<LinkMetadata, PreviewError> {
    // Reject bad input before building a client.
    parse_input_url(url)?;
    LinkPreviewGenerator::new()?.generate_preview(url).await
}

/// Fetches `url` and renders the card fragment without escaping.
pub async fn generate_card(url: &str) -> Result<String, PreviewError> {
    let data = extract(url).await?;
    Ok(render(&data))
}
