use tabled::Table;

use crate::{
    cli,
    config::Config,
    management::Session,
    spotify::{tracks, transport::Transport},
    success,
    types::{TrackCoverTableRow, TrackRecord, TrackTableRow},
    utils,
};

pub async fn liked(config: &Config, covers: bool) {
    let mut session = cli::connect(config).await;
    show_liked(&mut session, covers).await;
}

pub async fn show_liked<T: Transport>(session: &mut Session<T>, covers: bool) {
    cli::before_render(session).await;
    cli::heading("Liked Songs");

    let pb = utils::spinner("Fetching liked songs...");
    let liked = tracks::saved_tracks(session).await;
    pb.finish_and_clear();

    if !cli::has_data(&liked, "liked songs") {
        return;
    }

    print_tracks(liked.items(), covers);
    success!("{} liked songs", liked.items().len());
}

pub(crate) fn print_tracks(records: &[TrackRecord], covers: bool) {
    let table = if covers {
        Table::new(records.iter().enumerate().map(|(i, t)| TrackCoverTableRow {
            position: i + 1,
            name: t.name.clone(),
            artist: t.artist.clone(),
            cover: t.cover_url.clone().unwrap_or_default(),
        }))
    } else {
        Table::new(records.iter().enumerate().map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            artist: t.artist.clone(),
        }))
    };

    println!("{}", table);
}
