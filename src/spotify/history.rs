use crate::{
    management::Session,
    spotify::transport::{ApiRequest, Transport},
    types::{Fetched, Page, PlayHistory, PlayRecord},
};

/// Maximum number of plays the recently played endpoint hands out.
pub const RECENTLY_PLAYED_LIMIT: u32 = 50;

/// Retrieves up to 50 recently played tracks with their `played_at` time.
///
/// Single call to `GET /me/player/recently-played`; the cursor is not
/// followed.
pub async fn recently_played<T: Transport>(session: &Session<T>) -> Fetched<PlayRecord> {
    let request =
        ApiRequest::new("/me/player/recently-played").param("limit", RECENTLY_PLAYED_LIMIT);

    match session.call::<Page<PlayHistory>>(&request).await {
        Ok(page) => Fetched::from_items(page.items.into_iter().map(PlayRecord::from).collect()),
        Err(err) => Fetched::Failed(err),
    }
}
