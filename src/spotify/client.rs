use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    error::ApiError,
    spotify::transport::{ApiRequest, Transport},
    warning,
};

/// Bounds for [`SpotifyClient::call`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Wait after a 429 without `Retry-After`
    pub default_retry_after: Duration,
    /// Wait after a timed out request
    pub timeout_delay: Duration,
    /// A `Retry-After` above this is not waited for
    pub max_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            default_retry_after: Duration::from_secs(1),
            timeout_delay: Duration::from_secs(1),
            max_retry_after: Duration::from_secs(120),
        }
    }
}

/// Web API client that wraps every call in the retry policy.
///
/// The client owns the [`Transport`] so tests can swap the network for a
/// scripted fake. It holds no credentials; the caller passes the access token
/// per call.
pub struct SpotifyClient<T: Transport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> SpotifyClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, RetryPolicy::default())
    }

    pub fn with_policy(transport: T, policy: RetryPolicy) -> Self {
        SpotifyClient { transport, policy }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs a Web API GET and deserializes the response.
    ///
    /// Recovers from rate limits and timeouts by sleeping and trying again,
    /// bounded by [`RetryPolicy::max_attempts`] total attempts.
    ///
    /// # Retry Logic
    ///
    /// - `429 Too Many Requests`: waits for the `Retry-After` header in seconds,
    ///   or one second when the header is absent. A wait longer than
    ///   [`RetryPolicy::max_retry_after`] is reported and not attempted.
    /// - Read timeout: waits one second.
    /// - Any other error is reported to the user right away and returned
    ///   without a retry.
    ///
    /// Once every attempt ended in a recoverable error the call returns
    /// [`ApiError::RetriesExhausted`] without printing anything.
    ///
    /// # Example
    ///
    /// ```
    /// let request = ApiRequest::new("/me/top/artists").param("limit", 50);
    /// let page: Page<Artist> = client.call(&request, &token).await?;
    /// ```
    pub async fn call<R: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        access_token: &str,
    ) -> Result<R, ApiError> {
        let mut attempt = 0;

        while attempt < self.policy.max_attempts {
            attempt += 1;

            let err = match self.transport.get(request, access_token).await {
                Ok(json) => {
                    return serde_json::from_value::<R>(json).map_err(|e| {
                        let err = ApiError::from(e);
                        warning!("Unexpected response from {}: {}", request.path, err);
                        err
                    });
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                warning!("Request to {} failed: {}", request.path, err);
                return Err(err);
            }

            let delay = match err {
                ApiError::RateLimited { retry_after } => retry_after
                    .map(Duration::from_secs)
                    .unwrap_or(self.policy.default_retry_after),
                _ => self.policy.timeout_delay,
            };

            if delay > self.policy.max_retry_after {
                warning!(
                    "Spotify asked to wait {} seconds before retrying {}, request not retried. \
                     Try again later.",
                    delay.as_secs(),
                    request.path
                );
                return Err(err);
            }

            if attempt < self.policy.max_attempts {
                sleep(delay).await;
            }
        }

        Err(ApiError::RetriesExhausted { attempts: attempt })
    }
}
