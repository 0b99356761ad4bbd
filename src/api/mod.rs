//! # API Module
//!
//! HTTP endpoints served by the local callback server while the user logs in.
//!
//! ## Endpoints
//!
//! - [`callback`] - receives the redirect from Spotify's authorize page. It
//!   checks the `state` value and records either the authorization code or the
//!   reason the login failed. The waiting flow in
//!   [`crate::spotify::auth`] picks that up and performs the token exchange.
//! - [`health`] - reports status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotlens::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
