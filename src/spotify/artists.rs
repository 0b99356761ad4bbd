use crate::{
    management::Session,
    spotify::transport::{ApiRequest, Transport},
    types::{Artist, ArtistRecord, Fetched, Page, TimeRange},
};

/// Retrieves the user's top artists in a single bounded call.
///
/// Uses `GET /me/top/artists`. The personality insight asks for 50, the
/// dashboard panel for 20.
///
/// # Example
///
/// ```
/// let artists = artists::top_artists(&session, 50, TimeRange::MediumTerm).await;
/// let personality = insights::classify_personality(artists.items());
/// ```
pub async fn top_artists<T: Transport>(
    session: &Session<T>,
    limit: u32,
    time_range: TimeRange,
) -> Fetched<ArtistRecord> {
    let request = ApiRequest::new("/me/top/artists")
        .param("limit", limit)
        .param("time_range", time_range.as_str());

    match session.call::<Page<Artist>>(&request).await {
        Ok(page) => Fetched::from_items(page.items.into_iter().map(ArtistRecord::from).collect()),
        Err(err) => Fetched::Failed(err),
    }
}
