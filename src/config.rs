//! Configuration management for spotlens.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. The three Spotify application secrets are required;
//! everything else falls back to the public Spotify endpoints and local defaults.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

pub const ENV_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "SPOTLENS_REQUEST_TIMEOUT";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Scopes requested during authorization.
///
/// Covers saved tracks, top items, private playlists and the recently played
/// history.
pub const SPOTIFY_SCOPES: [&str; 4] = [
    "user-library-read",
    "user-top-read",
    "playlist-read-private",
    "user-read-recently-played",
];

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives in the platform-specific local data directory under
/// `spotlens/.env`. Values already present in the
/// process environment win over the file.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotlens/.env`
/// - macOS: `~/Library/Application Support/spotlens/.env`
/// - Windows: `%LOCALAPPDATA%/spotlens/.env`
///
/// A missing file is not an error; the values may come from the process
/// environment alone.
///
/// # Errors
///
/// This function will return an error if the `.env` file cannot be read or
/// parsed.
///
/// # Example
///
/// ```
/// use spotlens::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    load_env_from(&env_path()).await
}

/// Loads a specific `.env` file, see [`load_env`].
pub async fn load_env_from(path: &Path) -> Result<(), String> {
    if !async_fs::metadata(path).await.is_ok_and(|m| m.is_file()) {
        return Ok(());
    }

    dotenv::from_path(path).map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    Ok(())
}

/// Returns the location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotlens/.env");
    path
}

/// Resolved runtime configuration.
///
/// Built once at startup and handed to every component that needs endpoints or
/// credentials. The client secret never leaves this struct except inside the
/// token endpoint's `Authorization` header.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub server_addr: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first missing secret
    /// (`SPOTIFY_API_AUTH_CLIENT_ID`, `SPOTIFY_API_AUTH_CLIENT_SECRET` or
    /// `SPOTIFY_API_REDIRECT_URI`) or an unparsable timeout. The caller treats
    /// this as fatal.
    ///
    /// # Example
    ///
    /// ```
    /// let config = match Config::from_env() {
    ///     Ok(c) => c,
    ///     Err(e) => error!("{}", e),
    /// };
    /// ```
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as missing so a half-filled `.env` template fails
    /// the same way as an absent variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| get(key).ok_or_else(|| format!("{} must be set", key));

        let request_timeout = match get(ENV_REQUEST_TIMEOUT) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                format!("{} must be a number of seconds: {}", ENV_REQUEST_TIMEOUT, e)
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
            redirect_uri: required(ENV_REDIRECT_URI)?,
            server_addr: get(ENV_SERVER_ADDRESS).unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.into()),
            api_url: get(ENV_API_URL)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.into()),
            auth_url: get(ENV_AUTH_URL).unwrap_or_else(|| DEFAULT_AUTH_URL.into()),
            token_url: get(ENV_TOKEN_URL).unwrap_or_else(|| DEFAULT_TOKEN_URL.into()),
            request_timeout: Duration::from_secs(request_timeout),
        })
    }

    /// Space separated scope string as expected by the authorize endpoint.
    pub fn scope(&self) -> String {
        SPOTIFY_SCOPES.join(" ")
    }
}
