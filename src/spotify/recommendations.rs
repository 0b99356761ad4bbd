use crate::{
    management::Session,
    spotify::{
        tracks,
        transport::{ApiRequest, Transport},
    },
    types::{Fetched, MoodParameters, RecommendationsResponse, TimeRange, TrackRecord},
};

/// Number of top tracks used to seed a recommendation request.
pub const SEED_TRACK_COUNT: u32 = 5;

/// Number of recommendations requested.
pub const RECOMMENDATION_LIMIT: u32 = 10;

/// Builds the `/recommendations` request for the given seeds and mood.
pub fn recommendation_request(seed_ids: &[String], mood: &MoodParameters) -> ApiRequest {
    let targets = mood.targets();
    ApiRequest::new("/recommendations")
        .param("seed_tracks", seed_ids.join(","))
        .param("limit", RECOMMENDATION_LIMIT)
        .param("target_valence", targets.valence)
        .param("target_energy", targets.energy)
}

/// Fetches tracks matching a mood, anchored on the user's current top tracks.
///
/// # Process
///
/// 1. **Targets**: maps the mood and intensity to `target_valence` and
///    `target_energy`
/// 2. **Seeds**: fetches the top [`SEED_TRACK_COUNT`] tracks and keeps their ids
/// 3. **Request**: asks `GET /recommendations` for [`RECOMMENDATION_LIMIT`] tracks
///
/// When the user has no top tracks there is nothing to seed with and the call
/// is skipped with `Fetched::Empty`. A failed seed fetch is passed on as
/// `Fetched::Failed`.
///
/// # Example
///
/// ```
/// let mood = MoodParameters::new(Mood::Happy, Intensity::new(4)?);
/// let picks = recommendations::recommend(&session, &mood).await;
/// ```
pub async fn recommend<T: Transport>(
    session: &Session<T>,
    mood: &MoodParameters,
) -> Fetched<TrackRecord> {
    let seeds = match tracks::top_tracks(session, SEED_TRACK_COUNT, TimeRange::default()).await {
        Fetched::Failed(err) => return Fetched::Failed(err),
        other => other.into_items(),
    };

    let seed_ids: Vec<String> = seeds
        .into_iter()
        .filter_map(|t| t.id)
        .take(SEED_TRACK_COUNT as usize)
        .collect();

    if seed_ids.is_empty() {
        return Fetched::Empty;
    }

    let request = recommendation_request(&seed_ids, mood);
    match session.call::<RecommendationsResponse>(&request).await {
        Ok(res) => Fetched::from_items(res.tracks.into_iter().map(TrackRecord::from).collect()),
        Err(err) => Fetched::Failed(err),
    }
}
