use crate::{
    cli::{self, insights::INSIGHT_ARTIST_LIMIT},
    config::Config,
    types::{MoodParameters, TimeRange},
};

const DASHBOARD_TOP_LIMIT: u32 = 20;

/// Renders every panel within a single session.
///
/// The recommendation panel is only shown when a mood was given.
pub async fn dashboard(config: &Config, time_range: TimeRange, mood: Option<MoodParameters>) {
    let mut session = cli::connect(config).await;

    cli::show_liked(&mut session, false).await;
    cli::show_top_tracks(&mut session, DASHBOARD_TOP_LIMIT, time_range, false).await;
    cli::show_top_artists(&mut session, INSIGHT_ARTIST_LIMIT, time_range, false).await;
    cli::show_recent(&mut session).await;
    cli::show_insights(&mut session, time_range).await;

    if let Some(mood) = mood {
        cli::show_recommendations(&mut session, &mood, false).await;
    }
}
