//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify accounts service and Web API
//! used by spotlens: authorization, the resilient request client and the data
//! fetchers behind every panel.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (panels)
//!          ↓
//! Data Fetchers (tracks, artists, history, recommendations)
//!          ↓
//! Session (token store + authenticator)
//!          ↓
//! SpotifyClient (retry policy)
//!          ↓
//! Transport (reqwest, or a fake in tests)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 authorization code grant with client secret, local
//!   callback server and browser launch, token exchange and refresh
//! - [`client`] - [`client::SpotifyClient`] wrapping every call in a bounded
//!   retry policy for rate limits and timeouts
//! - [`transport`] - the [`transport::Transport`] capability and its `reqwest`
//!   implementation
//! - [`tracks`] - liked songs (paginated) and top tracks
//! - [`artists`] - top artists
//! - [`history`] - recently played tracks
//! - [`recommendations`] - mood based recommendations seeded with top tracks
//!
//! ## Error Handling Philosophy
//!
//! Fetchers never return `Err`. Each one produces a
//! [`Fetched`](crate::types::Fetched): data, empty, or failed. Recoverable
//! errors (429 and timeouts) are absorbed inside the client. Other errors are
//! shown to the user once, at the point they happen.
//!
//! ## API Coverage
//!
//! - `GET /me/tracks` - saved tracks, 50 per page
//! - `GET /me/top/tracks` - top tracks
//! - `GET /me/top/artists` - top artists
//! - `GET /me/player/recently-played` - recent plays with timestamps
//! - `GET /recommendations` - seed tracks plus target valence and energy
//! - `POST /api/token` - code exchange and refresh

pub mod artists;
pub mod auth;
pub mod client;
pub mod history;
pub mod recommendations;
pub mod tracks;
pub mod transport;
