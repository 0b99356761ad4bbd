mod common;

use chrono::{Duration, Utc};
use common::{FakeTransport, expired_token, session, test_config, valid_token};
use serde_json::json;
use spotlens::{
    error::ApiError,
    spotify::auth::Authenticator,
    types::{Token, TokenResponse},
};

#[tokio::test]
async fn test_refresh_replaces_expired_token() {
    let mut session = session(FakeTransport::new());
    session.tokens_mut().set(expired_token());
    session.client().transport().push_token_response(Ok(json!({
        "access_token": "access-2",
        "token_type": "Bearer",
        "scope": "user-library-read user-top-read",
        "expires_in": 3600
    })));

    assert!(session.refresh_if_expired().await);

    let token = session.tokens().current().unwrap();
    assert_eq!(token.access_token, "access-2");
    // no refresh_token in the response, the previous one stays
    assert_eq!(token.refresh_token, "refresh-1");
    assert!(token.expires_at > Utc::now() + Duration::minutes(50));

    let posts = session.client().transport().posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].url, "https://accounts.spotify.com/api/token");
    assert_eq!(posts[0].field("grant_type"), Some("refresh_token"));
    assert_eq!(posts[0].field("refresh_token"), Some("refresh-1"));
}

#[tokio::test]
async fn test_refresh_uses_rotated_refresh_token() {
    let mut session = session(FakeTransport::new());
    session.tokens_mut().set(expired_token());
    session.client().transport().push_token_response(Ok(json!({
        "access_token": "access-2",
        "refresh_token": "refresh-2",
        "expires_in": 3600
    })));

    assert!(session.refresh_if_expired().await);
    assert_eq!(
        session.tokens().current().unwrap().refresh_token,
        "refresh-2"
    );
}

#[tokio::test]
async fn test_fresh_token_is_not_refreshed() {
    let mut session = session(FakeTransport::new());
    session.tokens_mut().set(valid_token());

    assert!(!session.refresh_if_expired().await);
    assert!(session.client().transport().posts().is_empty());
    assert_eq!(session.tokens().current().unwrap().access_token, "access-1");
}

#[tokio::test]
async fn test_no_token_is_not_refreshed() {
    let mut session = session(FakeTransport::new());

    assert!(!session.refresh_if_expired().await);
    assert!(!session.is_authorized());
    assert!(session.client().transport().posts().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_keeps_stale_token() {
    let stale = expired_token();
    let mut session = session(FakeTransport::new());
    session.tokens_mut().set(stale.clone());
    session
        .client()
        .transport()
        .push_token_response(Err(ApiError::Status {
            status: 400,
            message: "Refresh token revoked".into(),
        }));

    assert!(!session.refresh_if_expired().await);
    assert_eq!(session.tokens().current(), Some(&stale));
}

#[tokio::test]
async fn test_refresh_at_margin() {
    let mut session = session(FakeTransport::new());
    let now = Utc::now();
    session.tokens_mut().set(Token {
        expires_at: now + Duration::seconds(30),
        ..valid_token()
    });
    session.client().transport().push_token_response(Ok(json!({
        "access_token": "access-2",
        "expires_in": 3600
    })));

    // within the 60 second margin counts as expired
    assert!(session.refresh_if_expired_at(now).await);
}

#[tokio::test]
async fn test_authorize_with_code_stores_token() {
    let mut session = session(FakeTransport::new());
    session.client().transport().push_token_response(Ok(json!({
        "access_token": "access-new",
        "token_type": "Bearer",
        "scope": "user-library-read user-top-read playlist-read-private user-read-recently-played",
        "expires_in": 3600,
        "refresh_token": "refresh-new"
    })));

    session.authorize_with_code("the-code").await.unwrap();

    let token = session.tokens().current().unwrap();
    assert_eq!(token.access_token, "access-new");
    assert_eq!(token.refresh_token, "refresh-new");
    assert!(token.scope.contains("user-read-recently-played"));

    let posts = session.client().transport().posts();
    assert_eq!(posts[0].field("grant_type"), Some("authorization_code"));
    assert_eq!(posts[0].field("code"), Some("the-code"));
    assert_eq!(
        posts[0].field("redirect_uri"),
        Some("http://127.0.0.1:8888/callback")
    );
    // base64("client-id:client-secret")
    assert_eq!(
        posts[0].authorization,
        "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ="
    );
}

#[tokio::test]
async fn test_rejected_code_is_an_auth_error() {
    let mut session = session(FakeTransport::new());
    session
        .client()
        .transport()
        .push_token_response(Err(ApiError::Status {
            status: 400,
            message: "Invalid authorization code".into(),
        }));

    let result = session.authorize_with_code("stale").await;

    assert!(matches!(
        result,
        Err(ApiError::Auth(ref m)) if m.contains("Invalid authorization code")
    ));
    assert!(!session.is_authorized());
}

#[test]
fn test_authorize_url_contains_scopes_and_state() {
    let authenticator = Authenticator::from_config(&test_config());

    let url = authenticator.authorize_url("xyz123").unwrap();

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=client-id"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("state=xyz123"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    for scope in [
        "user-library-read",
        "user-top-read",
        "playlist-read-private",
        "user-read-recently-played",
    ] {
        assert!(url.contains(scope), "missing scope {}", scope);
    }
    assert!(!url.contains("client-secret"));
}

#[test]
fn test_token_from_response_requires_refresh_token_on_first_grant() {
    let res = TokenResponse {
        access_token: "a".into(),
        token_type: None,
        scope: None,
        expires_in: 3600,
        refresh_token: None,
    };

    assert!(matches!(
        Token::from_response(res, Utc::now(), None),
        Err(ApiError::Auth(_))
    ));
}

#[test]
fn test_token_expiry() {
    let now = Utc::now();
    let token = Token {
        expires_at: now + Duration::minutes(10),
        ..valid_token()
    };

    assert!(!token.is_expired_at(now));
    assert!(token.is_expired_at(now + Duration::minutes(9) + Duration::seconds(30)));
    assert!(token.is_expired_at(now + Duration::minutes(11)));
}

#[test]
fn test_token_from_response_rejects_out_of_range_lifetime() {
    let res = TokenResponse {
        access_token: "a".into(),
        token_type: None,
        scope: None,
        expires_in: i64::MAX,
        refresh_token: Some("r".into()),
    };

    assert!(matches!(
        Token::from_response(res, Utc::now(), None),
        Err(ApiError::Auth(ref m)) if m.contains("expires_in")
    ));
}
