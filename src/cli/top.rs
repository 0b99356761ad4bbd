use clap::ValueEnum;
use tabled::Table;

use crate::{
    cli::{self, liked::print_tracks},
    config::Config,
    management::Session,
    spotify::{artists, tracks, transport::Transport},
    types::{ArtistCoverTableRow, ArtistRecord, ArtistTableRow, TimeRange},
    utils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopKind {
    Tracks,
    Artists,
}

pub async fn top(config: &Config, kind: TopKind, limit: u32, time_range: TimeRange, covers: bool) {
    let mut session = cli::connect(config).await;
    match kind {
        TopKind::Tracks => show_top_tracks(&mut session, limit, time_range, covers).await,
        TopKind::Artists => show_top_artists(&mut session, limit, time_range, covers).await,
    }
}

pub async fn show_top_tracks<T: Transport>(
    session: &mut Session<T>,
    limit: u32,
    time_range: TimeRange,
    covers: bool,
) {
    cli::before_render(session).await;
    cli::heading(&format!("Top {} Tracks", limit));

    let pb = utils::spinner("Fetching top tracks...");
    let top = tracks::top_tracks(session, limit, time_range).await;
    pb.finish_and_clear();

    if cli::has_data(&top, "top tracks") {
        print_tracks(top.items(), covers);
    }
}

pub async fn show_top_artists<T: Transport>(
    session: &mut Session<T>,
    limit: u32,
    time_range: TimeRange,
    covers: bool,
) {
    cli::before_render(session).await;
    cli::heading(&format!("Top {} Artists", limit));

    let pb = utils::spinner("Fetching top artists...");
    let top = artists::top_artists(session, limit, time_range).await;
    pb.finish_and_clear();

    if cli::has_data(&top, "top artists") {
        print_artists(top.items(), covers);
    }
}

fn print_artists(records: &[ArtistRecord], covers: bool) {
    // only the first three genres fit the table
    let genres = |a: &ArtistRecord| a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(",");

    let table = if covers {
        Table::new(records.iter().enumerate().map(|(i, a)| ArtistCoverTableRow {
            position: i + 1,
            name: a.name.clone(),
            genres: genres(a),
            cover: a.cover_url.clone().unwrap_or_default(),
        }))
    } else {
        Table::new(records.iter().enumerate().map(|(i, a)| ArtistTableRow {
            position: i + 1,
            name: a.name.clone(),
            genres: genres(a),
        }))
    };

    println!("{}", table);
}
