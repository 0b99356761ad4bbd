#![allow(dead_code)]

use std::{collections::VecDeque, sync::Mutex};

use chrono::{Duration, Utc};
use serde_json::{Value, json};
use spotlens::{
    config::Config,
    error::ApiError,
    management::Session,
    spotify::{
        auth::Authenticator,
        client::SpotifyClient,
        transport::{ApiRequest, Transport},
    },
    types::Token,
};

type Handler = Box<dyn Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync>;

/// Scripted stand-in for the network.
///
/// GET calls pop from `responses` first and fall back to `handler`; token
/// endpoint posts pop from `token_responses`. Every call is recorded.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    token_responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    handler: Option<Handler>,
    requests: Mutex<Vec<ApiRequest>>,
    posts: Mutex<Vec<RecordedPost>>,
    call_times: Mutex<Vec<tokio::time::Instant>>,
}

#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub url: String,
    pub authorization: String,
    pub form: Vec<(String, String)>,
}

impl RecordedPost {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(responses: Vec<Result<Value, ApiError>>) -> Self {
        FakeTransport {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync + 'static,
    {
        FakeTransport {
            handler: Some(Box::new(handler)),
            ..Self::default()
        }
    }

    pub fn push_token_response(&self, response: Result<Value, ApiError>) {
        self.token_responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub fn call_times(&self) -> Vec<tokio::time::Instant> {
        self.call_times.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, request: &ApiRequest, _access_token: &str) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.call_times
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());

        if let Some(response) = self.responses.lock().unwrap().pop_front() {
            return response;
        }

        match &self.handler {
            Some(handler) => handler(request),
            None => Err(ApiError::Status {
                status: 404,
                message: format!("unscripted request to {}", request.path),
            }),
        }
    }

    async fn post_form(
        &self,
        url: &str,
        authorization: &str,
        form: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            authorization: authorization.to_string(),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        self.token_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    status: 400,
                    message: "unscripted token request".into(),
                })
            })
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client-id".into()),
        "SPOTIFY_API_AUTH_CLIENT_SECRET" => Some("client-secret".into()),
        "SPOTIFY_API_REDIRECT_URI" => Some("http://127.0.0.1:8888/callback".into()),
        _ => None,
    })
    .unwrap()
}

pub fn valid_token() -> Token {
    Token {
        access_token: "access-1".into(),
        refresh_token: "refresh-1".into(),
        scope: "user-library-read".into(),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

pub fn expired_token() -> Token {
    Token {
        expires_at: Utc::now() - Duration::minutes(5),
        ..valid_token()
    }
}

pub fn session(transport: FakeTransport) -> Session<FakeTransport> {
    Session::new(
        SpotifyClient::new(transport),
        Authenticator::from_config(&test_config()),
    )
}

pub fn authorized_session(transport: FakeTransport) -> Session<FakeTransport> {
    let mut session = session(transport);
    session.tokens_mut().set(valid_token());
    session
}

pub fn track_json(id: &str, name: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [{ "id": format!("{}-artist", id), "name": artist }],
        "album": {
            "name": format!("{} album", name),
            "images": [{
                "url": format!("https://i.scdn.co/image/{}", id),
                "height": 640,
                "width": 640
            }]
        }
    })
}

pub fn artist_json(id: &str, name: &str, genres: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "genres": genres,
        "images": [{ "url": format!("https://i.scdn.co/image/{}", id) }]
    })
}

/// Handler serving a saved tracks library of `total` tracks named
/// `Track 0`, `Track 1`, ...
pub fn library(total: usize) -> impl Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync {
    move |request: &ApiRequest| {
        let limit: usize = request.get_param("limit").unwrap_or("20").parse().unwrap();
        let offset: usize = request.get_param("offset").unwrap_or("0").parse().unwrap();
        let end = (offset + limit).min(total);
        let items: Vec<Value> = (offset.min(end)..end)
            .map(|i| {
                json!({
                    "added_at": "2024-05-01T12:00:00Z",
                    "track": track_json(&format!("t{}", i), &format!("Track {}", i), "Artist")
                })
            })
            .collect();
        let next = if end < total {
            Value::String(format!(
                "https://api.spotify.com/v1/me/tracks?offset={}&limit={}",
                end, limit
            ))
        } else {
            Value::Null
        };

        Ok(json!({
            "items": items,
            "next": next,
            "total": total,
            "limit": limit,
            "offset": offset
        }))
    }
}
