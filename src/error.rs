use thiserror::Error;

/// Errors raised while talking to the Spotify accounts service or Web API.
///
/// Only [`ApiError::RateLimited`] and [`ApiError::Timeout`] are recoverable;
/// [`SpotifyClient`](crate::spotify::client::SpotifyClient) retries those and
/// reports everything else to the user straight away.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// HTTP 429. `retry_after` carries the `Retry-After` header in seconds.
    #[error("rate limited by Spotify (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    /// The request or response read timed out.
    #[error("request timed out")]
    Timeout,

    /// Any non-success status other than 429.
    #[error("Spotify API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Connection level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Authorization or token exchange failure.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// All attempts ended in a recoverable error.
    #[error("gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

impl ApiError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. } | ApiError::Timeout)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
