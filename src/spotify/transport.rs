use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use serde_json::Value;

use crate::error::ApiError;

/// A single GET against the Web API.
///
/// `path` is relative to the API base url, e.g. `/me/tracks`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        ApiRequest {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The remote call capability used by the client and the authenticator.
///
/// Implementations translate transport failures into [`ApiError`]: HTTP 429
/// becomes [`ApiError::RateLimited`] carrying `Retry-After`, read timeouts
/// become [`ApiError::Timeout`]. Retrying is left to the caller.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Performs an authenticated GET against the Web API.
    async fn get(&self, request: &ApiRequest, access_token: &str) -> Result<Value, ApiError>;

    /// Posts a form to the accounts service token endpoint.
    async fn post_form(
        &self,
        url: &str,
        authorization: &str,
        form: &[(&str, &str)],
    ) -> Result<Value, ApiError>;
}

/// [`Transport`] backed by `reqwest`.
pub struct HttpTransport {
    client: Client,
    api_url: String,
}

impl HttpTransport {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpTransport {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn into_json(response: Response) -> Result<Value, ApiError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            return Err(ApiError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        response.json::<Value>().await.map_err(map_reqwest_error)
    }
}

impl Transport for HttpTransport {
    async fn get(&self, request: &ApiRequest, access_token: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.api_url, request.path);
        let response = self
            .client
            .get(&url)
            .query(&request.query)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Self::into_json(response).await
    }

    async fn post_form(
        &self,
        url: &str,
        authorization: &str,
        form: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .form(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Self::into_json(response).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}

// Web API errors look like {"error":{"status":401,"message":"..."}}, the
// accounts service uses {"error":"invalid_grant","error_description":"..."}.
fn error_message(body: &str, status: StatusCode) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    };

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    if let Some(message) = json["error"]["message"].as_str() {
        return message.to_string();
    }
    if let Some(description) = json["error_description"].as_str() {
        return description.to_string();
    }
    json["error"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(fallback)
}
