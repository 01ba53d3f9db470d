//! Errors raised while talking to an upstream source.

/// Failure of a single upstream request.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("API key for {0} is not configured")]
    MissingApiKey(&'static str),

    #[error("Request to {0} timed out")]
    Timeout(String),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "upstream".to_string());

        if err.is_timeout() {
            SourceError::Timeout(url)
        } else if let Some(status) = err.status() {
            SourceError::Status {
                url,
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Request(err.to_string())
        }
    }
}
