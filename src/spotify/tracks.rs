use crate::{
    management::Session,
    spotify::transport::{ApiRequest, Transport},
    types::{Fetched, Page, SavedTrack, TimeRange, Track, TrackRecord},
};

/// Page size used when walking the saved tracks collection.
pub const SAVED_TRACKS_PAGE_SIZE: u32 = 50;

/// Retrieves every track in the user's "Liked Songs" collection.
///
/// Walks `GET /me/tracks` with offset pagination, [`SAVED_TRACKS_PAGE_SIZE`]
/// items at a time, and projects each item into a [`TrackRecord`] in page
/// order.
///
/// # Paging
///
/// Stops as soon as one of the following happens:
/// - a page comes back empty
/// - a page has no `next` link
/// - a call fails after the client's retries
///
/// There is no cap other than the size of the collection itself.
///
/// # Returns
///
/// - `Fetched::Data` with all collected tracks, also when a later page failed
///   after earlier pages succeeded
/// - `Fetched::Empty` when the collection is empty
/// - `Fetched::Failed` when the very first page failed
///
/// # Example
///
/// ```
/// let liked = tracks::saved_tracks(&session).await;
/// println!("{} liked songs", liked.items().len());
/// ```
pub async fn saved_tracks<T: Transport>(session: &Session<T>) -> Fetched<TrackRecord> {
    let mut records: Vec<TrackRecord> = Vec::new();
    let mut offset: u32 = 0;

    loop {
        let request = ApiRequest::new("/me/tracks")
            .param("limit", SAVED_TRACKS_PAGE_SIZE)
            .param("offset", offset);

        let page = match session.call::<Page<SavedTrack>>(&request).await {
            Ok(page) => page,
            Err(err) => {
                if records.is_empty() {
                    return Fetched::Failed(err);
                }
                break;
            }
        };

        if page.items.is_empty() {
            break;
        }

        offset += page.items.len() as u32;
        records.extend(
            page.items
                .into_iter()
                .filter_map(|saved| saved.track)
                .map(TrackRecord::from),
        );

        if page.next.is_none() {
            break;
        }
    }

    Fetched::from_items(records)
}

/// Retrieves the user's top tracks in a single bounded call.
///
/// `limit` is passed straight through (callers use 5, 20 or 50). No
/// pagination is done.
pub async fn top_tracks<T: Transport>(
    session: &Session<T>,
    limit: u32,
    time_range: TimeRange,
) -> Fetched<TrackRecord> {
    let request = ApiRequest::new("/me/top/tracks")
        .param("limit", limit)
        .param("time_range", time_range.as_str());

    match session.call::<Page<Track>>(&request).await {
        Ok(page) => Fetched::from_items(page.items.into_iter().map(TrackRecord::from).collect()),
        Err(err) => Fetched::Failed(err),
    }
}
