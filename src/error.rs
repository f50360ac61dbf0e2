use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Failed to parse page: {0}")]
    ParseError(String),
}

impl From<url::ParseError> for PreviewError {
    fn from(e: url::ParseError) -> Self {
        PreviewError::InvalidUrl(e.to_string())
    }
}

impl PreviewError {
    /// Maps a transport failure to a `NetworkError`, keeping the cause text.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("request timed out: {e}")
        } else if let Some(status) = e.status() {
            format!("server returned {status}")
        } else if e.is_connect() {
            format!("connection failed: {e}")
        } else {
            e.to_string()
        };
        PreviewError::NetworkError(message)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, PreviewError::NetworkError(_))
    }
}
