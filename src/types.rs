use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::ApiError;

/// Seconds before `expires_at` at which a token already counts as expired.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Builds a token from a token endpoint response received at `now`.
    ///
    /// Refresh responses may omit `refresh_token`; `previous_refresh` is kept
    /// in that case.
    pub fn from_response(
        res: TokenResponse,
        now: DateTime<Utc>,
        previous_refresh: Option<&str>,
    ) -> Result<Self, ApiError> {
        if res.access_token.is_empty() {
            return Err(ApiError::Auth("token response without access_token".into()));
        }

        let refresh_token = match (res.refresh_token, previous_refresh) {
            (Some(fresh), _) if !fresh.is_empty() => fresh,
            (_, Some(previous)) => previous.to_string(),
            _ => return Err(ApiError::Auth("token response without refresh_token".into())),
        };

        let expires_at = TimeDelta::try_seconds(res.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ApiError::Auth(format!(
                    "token response with invalid expires_in {}",
                    res.expires_in
                ))
            })?;

        Ok(Token {
            access_token: res.access_token,
            refresh_token,
            scope: res.scope.unwrap_or_default(),
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(TOKEN_EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

/// State shared between the authorization flow and the callback handler.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub state: String,
    pub outcome: Option<Result<String, String>>,
}

// Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrack {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
    pub played_at: DateTime<Utc>,
}

/// Generic paging object used by all collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

// Display records

#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub id: Option<String>,
    pub name: String,
    pub artist: String,
    pub cover_url: Option<String>,
}

impl From<Track> for TrackRecord {
    fn from(t: Track) -> Self {
        TrackRecord {
            id: t.id,
            name: t.name,
            artist: t
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            cover_url: t
                .album
                .and_then(|a| a.images.into_iter().next())
                .map(|i| i.url),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRecord {
    pub id: String,
    pub name: String,
    pub cover_url: Option<String>,
    pub genres: Vec<String>,
}

impl From<Artist> for ArtistRecord {
    fn from(a: Artist) -> Self {
        ArtistRecord {
            id: a.id,
            name: a.name,
            cover_url: a.images.into_iter().next().map(|i| i.url),
            genres: a.genres,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayRecord {
    pub name: String,
    pub artist: String,
    pub played_at: DateTime<Utc>,
}

impl From<PlayHistory> for PlayRecord {
    fn from(p: PlayHistory) -> Self {
        let track = TrackRecord::from(p.track);
        PlayRecord {
            name: track.name,
            artist: track.artist,
            played_at: p.played_at,
        }
    }
}

/// Outcome of a data fetch.
///
/// Separates "nothing there" from "the call failed" so callers can tell the two
/// apart, while [`Fetched::into_items`] still lets derivations treat both as
/// empty input.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Data(Vec<T>),
    Empty,
    Failed(ApiError),
}

impl<T> Fetched<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Fetched::Empty
        } else {
            Fetched::Data(items)
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Fetched::Data(items) => items,
            Fetched::Empty | Fetched::Failed(_) => Vec::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Fetched::Data(items) => items,
            Fetched::Empty | Fetched::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fetched::Failed(_))
    }
}

// User controls

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mood {
    Happy,
    Calm,
    Energetic,
    Sad,
}

impl Mood {
    /// Base coefficient for both valence and energy at full intensity.
    pub fn base(&self) -> f64 {
        match self {
            Mood::Happy => 0.8,
            Mood::Calm => 0.4,
            Mood::Energetic => 0.9,
            Mood::Sad => 0.2,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mood::Happy => "Happy",
            Mood::Calm => "Calm",
            Mood::Energetic => "Energetic",
            Mood::Sad => "Sad",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Intensity(value))
        } else {
            Err(format!(
                "intensity must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodParameters {
    pub mood: Mood,
    pub intensity: Intensity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodTargets {
    pub valence: f64,
    pub energy: f64,
}

impl MoodParameters {
    pub fn new(mood: Mood, intensity: Intensity) -> Self {
        MoodParameters { mood, intensity }
    }

    pub fn targets(&self) -> MoodTargets {
        let intensity = f64::from(self.intensity.value());
        let target = self.mood.base() * intensity / f64::from(Intensity::MAX);
        MoodTargets {
            valence: target,
            energy: target,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TimeRange {
    /// Roughly the last four weeks
    ShortTerm,
    /// Roughly the last six months
    #[default]
    MediumTerm,
    /// Several years of data
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

// Insights

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    Explorer,
    LoyalListener,
}

impl Personality {
    pub fn label(&self) -> &'static str {
        match self {
            Personality::Explorer => "Explorer",
            Personality::LoyalListener => "Loyal Listener",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Personality::Explorer => "You love discovering new artists.",
            Personality::LoyalListener => "You keep coming back to your favourite artists.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourCount {
    pub hour: u32,
    pub plays: usize,
}

// Table rows

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artist: String,
}

#[derive(Tabled)]
pub struct TrackCoverTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub cover: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub genres: String,
}

#[derive(Tabled)]
pub struct ArtistCoverTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub genres: String,
    pub cover: String,
}

#[derive(Tabled)]
pub struct PlayTableRow {
    pub played_at: String,
    pub name: String,
    pub artist: String,
}

#[derive(Tabled)]
pub struct HourTableRow {
    pub hour: String,
    pub plays: usize,
    pub chart: String,
}
