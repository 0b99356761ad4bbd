use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    management::TokenStore,
    spotify::{
        auth::Authenticator,
        client::SpotifyClient,
        transport::{ApiRequest, Transport},
    },
    warning,
};

/// Everything one user's run needs to talk to Spotify.
///
/// Passed explicitly to every fetcher instead of living in global state, so
/// several sessions (or a test harness with a fake transport) can exist side
/// by side.
pub struct Session<T: Transport> {
    client: SpotifyClient<T>,
    authenticator: Authenticator,
    tokens: TokenStore,
}

impl<T: Transport> Session<T> {
    pub fn new(client: SpotifyClient<T>, authenticator: Authenticator) -> Self {
        Session {
            client,
            authenticator,
            tokens: TokenStore::new(),
        }
    }

    pub fn client(&self) -> &SpotifyClient<T> {
        &self.client
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenStore {
        &mut self.tokens
    }

    pub fn is_authorized(&self) -> bool {
        self.tokens.has_token()
    }

    /// Completes authorization with a code from the callback.
    pub async fn authorize_with_code(&mut self, code: &str) -> Result<(), ApiError> {
        let token = self
            .authenticator
            .exchange_code(self.client.transport(), code)
            .await?;
        self.tokens.set(token);
        Ok(())
    }

    /// Refreshes the token when it has expired. Call before rendering a view.
    ///
    /// Returns `true` when a new token was stored. A failed refresh is
    /// reported and the stale token stays in place; the API calls that follow
    /// fail and surface as ordinary API errors.
    pub async fn refresh_if_expired(&mut self) -> bool {
        self.refresh_if_expired_at(Utc::now()).await
    }

    pub async fn refresh_if_expired_at(&mut self, now: DateTime<Utc>) -> bool {
        if !self.tokens.is_expired_at(now) {
            return false;
        }

        let Some(refresh_token) = self.tokens.current().map(|t| t.refresh_token.clone()) else {
            return false;
        };

        match self
            .authenticator
            .refresh(self.client.transport(), &refresh_token)
            .await
        {
            Ok(token) => {
                self.tokens.set(token);
                true
            }
            Err(e) => {
                warning!("Failed to refresh access token: {}", e);
                false
            }
        }
    }

    /// Calls the Web API with the session's access token.
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] when no token has been obtained yet, otherwise
    /// whatever [`SpotifyClient::call`] returns.
    pub async fn call<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        let Some(token) = self.tokens.current() else {
            warning!("No access token in session, authorize first.");
            return Err(ApiError::Auth("no access token in session".into()));
        };

        self.client.call(request, &token.access_token).await
    }
}
