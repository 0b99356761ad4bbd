use tabled::Table;

use crate::{
    cli,
    config::Config,
    insights,
    management::Session,
    spotify::{history, transport::Transport},
    types::{HourTableRow, PlayRecord, PlayTableRow},
    utils,
};

pub async fn recent(config: &Config) {
    let mut session = cli::connect(config).await;
    show_recent(&mut session).await;
}

pub async fn show_recent<T: Transport>(session: &mut Session<T>) {
    cli::before_render(session).await;
    cli::heading("Recently Played");

    let pb = utils::spinner("Fetching recently played tracks...");
    let plays = history::recently_played(session).await;
    pb.finish_and_clear();

    if !cli::has_data(&plays, "recently played tracks") {
        return;
    }

    let rows = plays.items().iter().map(|p| PlayTableRow {
        played_at: p.played_at.format("%Y-%m-%d %H:%M").to_string(),
        name: p.name.clone(),
        artist: p.artist.clone(),
    });
    println!("{}", Table::new(rows));

    print_pattern(plays.items());
}

pub(crate) fn print_pattern(plays: &[PlayRecord]) {
    cli::heading("Listening Pattern (UTC)");

    let pattern = insights::weekly_pattern(plays);
    let max = utils::max_plays(&pattern);
    let rows = pattern.iter().map(|h| HourTableRow {
        hour: utils::format_hour(h.hour),
        plays: h.plays,
        chart: utils::histogram_bar(h.plays, max),
    });

    println!("{}", Table::new(rows));
}
