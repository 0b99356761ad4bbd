use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Url;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::ApiError,
    info,
    management::Session,
    server,
    spotify::transport::Transport,
    types::{AuthState, Token, TokenResponse},
    utils, warning,
};

/// How long [`auth`] waits for the browser to hit the callback.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Client side of the OAuth 2.0 authorization code grant.
///
/// Holds the application credentials and the accounts service endpoints. The
/// token endpoint is called through a [`Transport`] so the exchange can be
/// exercised without a network.
#[derive(Debug, Clone)]
pub struct Authenticator {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
    scope: String,
}

impl Authenticator {
    pub fn from_config(config: &Config) -> Self {
        Authenticator {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
            scope: config.scope(),
        }
    }

    /// Builds the authorize url the user opens in the browser.
    ///
    /// `state` is echoed back by Spotify on the callback and checked there.
    ///
    /// # Example
    ///
    /// ```
    /// let url = authenticator.authorize_url("a1b2c3")?;
    /// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
    /// ```
    pub fn authorize_url(&self, state: &str) -> Result<String, ApiError> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", self.scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| ApiError::Auth(format!("invalid authorize url: {}", e)))?;

        Ok(url.to_string())
    }

    /// `Authorization` header value for the token endpoint.
    pub fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Exchanges an authorization code for a token.
    ///
    /// # Errors
    ///
    /// Rejections from the accounts service (expired or reused code, wrong
    /// redirect uri, bad credentials) come back as [`ApiError::Auth`].
    pub async fn exchange_code<T: Transport>(
        &self,
        transport: &T,
        code: &str,
    ) -> Result<Token, ApiError> {
        let json = transport
            .post_form(
                &self.token_url,
                &self.basic_auth(),
                &[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", &self.redirect_uri),
                ],
            )
            .await
            .map_err(as_auth_error)?;

        let res: TokenResponse = serde_json::from_value(json)?;
        Token::from_response(res, Utc::now(), None)
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// Spotify does not always rotate the refresh token; when the response
    /// carries none the given one is kept.
    pub async fn refresh<T: Transport>(
        &self,
        transport: &T,
        refresh_token: &str,
    ) -> Result<Token, ApiError> {
        let json = transport
            .post_form(
                &self.token_url,
                &self.basic_auth(),
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh_token),
                ],
            )
            .await
            .map_err(as_auth_error)?;

        let res: TokenResponse = serde_json::from_value(json)?;
        Token::from_response(res, Utc::now(), Some(refresh_token))
    }
}

fn as_auth_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Status { status, message } => {
            ApiError::Auth(format!("token endpoint returned {}: {}", status, message))
        }
        other => other,
    }
}

/// Runs the interactive authorization code flow and stores the token in the
/// session.
///
/// # Authentication Flow
///
/// 1. **State**: generates a random `state` value to tie the callback to this run
/// 2. **Server Start**: binds `SERVER_ADDRESS` and serves the callback in the
///    background until the flow ends
/// 3. **Browser Launch**: opens the Spotify authorize url in the default browser
/// 4. **Callback**: waits up to [`CALLBACK_TIMEOUT`] for the authorization code
/// 5. **Token Exchange**: trades the code for a token and hands it to the session
///
/// If the browser cannot be opened the url is printed for manual navigation.
///
/// # Errors
///
/// An occupied callback address, denied consent, a mismatched `state`, a
/// timeout or a failed exchange are returned as [`ApiError::Auth`]. Nothing is
/// retried.
pub async fn auth<T: Transport>(session: &mut Session<T>, config: &Config) -> Result<(), ApiError> {
    let state = utils::generate_state();
    let shared_state: Arc<Mutex<Option<AuthState>>> = Arc::new(Mutex::new(Some(AuthState {
        state: state.clone(),
        outcome: None,
    })));

    let auth_url = session.authenticator().authorize_url(&state)?;

    let listener = server::bind(&config.server_addr)
        .await
        .map_err(|e| ApiError::Auth(format!("cannot start callback server: {}", e)))?;

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = server::start_api_server(listener, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    info!("Opening Spotify login in your browser...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let outcome = wait_for_code(shared_state, CALLBACK_TIMEOUT).await;
    server.abort();

    let code = match outcome {
        Some(Ok(code)) => code,
        Some(Err(reason)) => return Err(ApiError::Auth(reason)),
        None => return Err(ApiError::Auth("timed out waiting for the callback".into())),
    };

    session.authorize_with_code(&code).await
}

/// Polls the shared state until the callback handler recorded an outcome.
///
/// Returns `None` when `max_wait` passes without a callback.
pub async fn wait_for_code(
    shared_state: Arc<Mutex<Option<AuthState>>>,
    max_wait: Duration,
) -> Option<Result<String, String>> {
    let start = tokio::time::Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(outcome) = lock.as_ref().and_then(|s| s.outcome.clone()) {
            return Some(outcome);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}
