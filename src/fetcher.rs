use crate::PreviewError;
use reqwest::{header::HeaderMap, Client};
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Browser-like identity so that trivial bot filters serve the normal page.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client settings for [`Fetcher`].
///
/// # Examples
/// ```ignore
/// let fetcher = Fetcher::new_with_config(FetcherConfig {
///     timeout: Duration::from_secs(5),
///     ..FetcherConfig::default()
/// })?;
/// ```
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub headers: Option<HeaderMap>,
    pub redirect_policy: Option<reqwest::redirect::Policy>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: None,
            redirect_policy: None,
        }
    }
}

/// Performs the single GET request behind every preview.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, PreviewError> {
        debug!("Fetcher initialized with default configuration");
        Self::new_with_config(FetcherConfig::default())
    }

    pub fn new_with_config(config: FetcherConfig) -> Result<Self, PreviewError> {
        let mut client_builder = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout);

        if let Some(headers) = config.headers {
            client_builder = client_builder.default_headers(headers);
        }

        if let Some(redirect_policy) = config.redirect_policy {
            client_builder = client_builder.redirect(redirect_policy);
        }

        let client = client_builder.build().map_err(|e| {
            error!(error = %e, "Failed to create HTTP client");
            PreviewError::NetworkError(format!("failed to initialize HTTP client: {e}"))
        })?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` and returns the body as text, whatever its declared content type.
    ///
    /// Exactly one request is sent. Any transport failure or non-2xx status is
    /// returned as [`PreviewError::NetworkError`].
    #[instrument(level = "debug", skip(self, url), fields(url = %url), err)]
    pub async fn fetch(&self, url: &Url) -> Result<String, PreviewError> {
        debug!("Fetching webpage");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request");
                PreviewError::from_reqwest(e)
            })?;

        // reqwest leaves unfollowed 3xx responses alone; those are failures too.
        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Server returned a non-success status");
            return Err(PreviewError::NetworkError(format!("server returned {status}")));
        }

        let content = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            PreviewError::from_reqwest(e)
        })?;

        debug!(content_length = content.len(), "Successfully fetched webpage");
        Ok(content)
    }
}
