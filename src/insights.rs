//! Small aggregates derived from fetched listening data.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::Timelike;

use crate::types::{ArtistRecord, HourCount, Personality, PlayRecord};

/// Distinct top artists above which a listener counts as an explorer.
pub const EXPLORER_THRESHOLD: usize = 30;

/// Collects the first listed genre of every artist, without duplicates.
///
/// Artists without genres are skipped.
pub fn genre_summary(artists: &[ArtistRecord]) -> BTreeSet<String> {
    artists
        .iter()
        .filter_map(|a| a.genres.first())
        .cloned()
        .collect()
}

pub fn format_genres(genres: &BTreeSet<String>) -> String {
    genres.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Counts plays per hour of day (UTC), ordered by hour.
///
/// Hours without plays are left out.
pub fn weekly_pattern(plays: &[PlayRecord]) -> Vec<HourCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for play in plays {
        *counts.entry(play.played_at.hour()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(hour, plays)| HourCount { hour, plays })
        .collect()
}

/// Classifies by the number of distinct top artists, told apart by id.
///
/// More than [`EXPLORER_THRESHOLD`] is an [`Personality::Explorer`]; exactly
/// the threshold is still a [`Personality::LoyalListener`].
pub fn classify_personality(artists: &[ArtistRecord]) -> Personality {
    let distinct: HashSet<&str> = artists.iter().map(|a| a.id.as_str()).collect();
    personality_for_count(distinct.len())
}

pub fn personality_for_count(distinct_artists: usize) -> Personality {
    if distinct_artists > EXPLORER_THRESHOLD {
        Personality::Explorer
    } else {
        Personality::LoyalListener
    }
}
