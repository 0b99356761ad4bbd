use crate::{
    cli::{self, recent::print_pattern},
    config::Config,
    info, insights,
    management::Session,
    spotify::{artists, history, transport::Transport},
    success,
    types::TimeRange,
    utils,
};

/// Number of top artists inspected for the genre summary and personality.
pub const INSIGHT_ARTIST_LIMIT: u32 = 50;

pub async fn insights(config: &Config, time_range: TimeRange) {
    let mut session = cli::connect(config).await;
    show_insights(&mut session, time_range).await;
}

/// Renders genre summary, hourly pattern and personality.
///
/// Failed fetches count as empty input, so every insight still renders.
pub async fn show_insights<T: Transport>(session: &mut Session<T>, time_range: TimeRange) {
    cli::before_render(session).await;
    cli::heading("Insights");

    let pb = utils::spinner("Fetching listening data...");
    let top = artists::top_artists(session, INSIGHT_ARTIST_LIMIT, time_range).await;
    let plays = history::recently_played(session).await;
    pb.finish_and_clear();

    let genres = insights::genre_summary(top.items());
    if genres.is_empty() {
        info!("Top genres: none yet");
    } else {
        info!("Top genres: {}", insights::format_genres(&genres));
    }

    let personality = insights::classify_personality(top.items());
    success!(
        "Listening personality: {} - {}",
        personality.label(),
        personality.description()
    );

    print_pattern(plays.items());
}
