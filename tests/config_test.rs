use std::{collections::HashMap, env, fs, time::Duration};

use spotlens::config::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

const SECRETS: [(&str, &str); 3] = [
    (ENV_CLIENT_ID, "id"),
    (ENV_CLIENT_SECRET, "secret"),
    (ENV_REDIRECT_URI, "http://127.0.0.1:8888/callback"),
];

#[test]
fn test_defaults_with_only_secrets() {
    let config = Config::from_lookup(lookup_from(&SECRETS)).unwrap();

    assert_eq!(config.client_id, "id");
    assert_eq!(config.client_secret, "secret");
    assert_eq!(config.redirect_uri, "http://127.0.0.1:8888/callback");
    assert_eq!(config.server_addr, DEFAULT_SERVER_ADDRESS);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    assert_eq!(
        config.request_timeout,
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    );
}

#[test]
fn test_each_missing_secret_is_named() {
    for missing in [ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_REDIRECT_URI] {
        let pairs: Vec<(&str, &str)> = SECRETS
            .iter()
            .copied()
            .filter(|(k, _)| *k != missing)
            .collect();

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.contains(missing), "{} not in '{}'", missing, err);
    }
}

#[test]
fn test_blank_secret_counts_as_missing() {
    let mut pairs = SECRETS.to_vec();
    pairs[1] = (ENV_CLIENT_SECRET, "   ");

    let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert!(err.contains(ENV_CLIENT_SECRET));
}

#[test]
fn test_overrides() {
    let mut pairs = SECRETS.to_vec();
    pairs.push((ENV_API_URL, "http://localhost:9000/v1/"));
    pairs.push((ENV_SERVER_ADDRESS, "0.0.0.0:9999"));
    pairs.push((ENV_REQUEST_TIMEOUT, "12"));

    let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

    assert_eq!(config.api_url, "http://localhost:9000/v1");
    assert_eq!(config.server_addr, "0.0.0.0:9999");
    assert_eq!(config.request_timeout, Duration::from_secs(12));
}

#[test]
fn test_invalid_timeout() {
    let mut pairs = SECRETS.to_vec();
    pairs.push((ENV_REQUEST_TIMEOUT, "soon"));

    let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert!(err.contains(ENV_REQUEST_TIMEOUT));
}

#[test]
fn test_scope_string() {
    let config = Config::from_lookup(lookup_from(&SECRETS)).unwrap();

    assert_eq!(
        config.scope(),
        "user-library-read user-top-read playlist-read-private user-read-recently-played"
    );
}

#[tokio::test]
async fn test_load_env_from_file() {
    let dir = env::temp_dir().join(format!("spotlens-env-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(".env");
    fs::write(&path, "SPOTLENS_TEST_FROM_FILE=loaded\n").unwrap();

    load_env_from(&path).await.unwrap();

    assert_eq!(env::var("SPOTLENS_TEST_FROM_FILE").unwrap(), "loaded");
    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_load_env_missing_file_is_ok() {
    let path = env::temp_dir().join("spotlens-does-not-exist/.env");

    assert!(load_env_from(&path).await.is_ok());
}
