use chrono::{DateTime, Utc};

use crate::types::Token;

/// In-memory holder of the session's OAuth token.
///
/// Nothing is written to disk; the token lives as long as the owning
/// [`Session`](super::Session).
#[derive(Debug, Default)]
pub struct TokenStore {
    token: Option<Token>,
}

impl TokenStore {
    pub fn new() -> Self {
        TokenStore { token: None }
    }

    pub fn set(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub fn current(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// True when a token is present and due for refresh at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.token.as_ref().is_some_and(|t| t.is_expired_at(now))
    }
}
