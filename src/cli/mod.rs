//! # CLI Module
//!
//! This module provides the command-line interface layer for spotlens. Every
//! command is one session: it authorizes against Spotify, renders its panels and
//! exits. The token only ever lives in memory.
//!
//! ## Commands
//!
//! - [`auth`] - runs the authorization flow and reports the granted scopes
//! - [`liked`] - all liked songs
//! - [`top`] - top tracks or top artists
//! - [`recent`] - recently played tracks with the hourly listening pattern
//! - [`insights`] - genre summary, listening pattern and listener personality
//! - [`recommend`] - recommendations for a mood and intensity
//! - [`dashboard`] - every panel in one session
//!
//! ## Data Flow
//!
//! 1. **Authorization**: the session obtains a token through the browser login
//! 2. **Token Check**: each panel refreshes an expired token before fetching
//! 3. **API Interaction**: fetchers call Spotify through the retrying client
//! 4. **Derivation**: insights are computed from whatever came back
//! 5. **Output Generation**: tables and status lines
//!
//! ## Error Handling Philosophy
//!
//! - A failed login or broken configuration ends the program
//! - A failed panel prints a warning and the remaining panels still render
//! - Empty collections are reported as such, not as errors

mod auth;
mod dashboard;
mod insights;
mod liked;
mod recent;
mod recommend;
mod top;

pub use auth::auth;
pub use dashboard::dashboard;
pub use insights::{insights, show_insights};
pub use liked::{liked, show_liked};
pub use recent::{recent, show_recent};
pub use recommend::{recommend, show_recommendations};
pub use top::{TopKind, show_top_artists, show_top_tracks, top};

use crate::{
    config::Config,
    error, info,
    management::Session,
    spotify::{
        self,
        auth::Authenticator,
        client::SpotifyClient,
        transport::{HttpTransport, Transport},
    },
    types::Fetched,
};

/// Builds a session for `config` and runs the browser login.
///
/// Terminates the program when the transport cannot be built or the login
/// fails; authorization is never retried automatically.
pub async fn connect(config: &Config) -> Session<HttpTransport> {
    let transport = match HttpTransport::new(&config.api_url, config.request_timeout) {
        Ok(t) => t,
        Err(e) => error!("Failed to set up HTTP client: {}", e),
    };

    let client = SpotifyClient::new(transport);
    let mut session = Session::new(client, Authenticator::from_config(config));

    if let Err(e) = spotify::auth::auth(&mut session, config).await {
        error!("Authentication failed: {}", e);
    }

    session
}

/// Line shown in place of a panel that has nothing to render.
///
/// `None` for data and for failures; the client already reported the failure
/// when it happened, and running out of retries stays silent.
pub fn empty_notice<R>(fetched: &Fetched<R>, what: &str) -> Option<String> {
    match fetched {
        Fetched::Empty => Some(format!("No {} found.", what)),
        Fetched::Data(_) | Fetched::Failed(_) => None,
    }
}

/// Prints the empty notice if any. Returns `true` when there is data.
pub(crate) fn has_data<R>(fetched: &Fetched<R>, what: &str) -> bool {
    if let Some(notice) = empty_notice(fetched, what) {
        info!("{}", notice);
    }
    matches!(fetched, Fetched::Data(_))
}

pub(crate) async fn before_render<T: Transport>(session: &mut Session<T>) {
    if session.refresh_if_expired().await {
        info!("Access token refreshed.");
    }
}

pub(crate) fn heading(title: &str) {
    use colored::Colorize;
    println!("\n{}", title.bold().underline());
}
