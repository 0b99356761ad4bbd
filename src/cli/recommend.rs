use crate::{
    cli::{self, liked::print_tracks},
    config::Config,
    info,
    management::Session,
    spotify::{recommendations, transport::Transport},
    types::MoodParameters,
    utils,
};

pub async fn recommend(config: &Config, mood: MoodParameters, covers: bool) {
    let mut session = cli::connect(config).await;
    show_recommendations(&mut session, &mood, covers).await;
}

pub async fn show_recommendations<T: Transport>(
    session: &mut Session<T>,
    mood: &MoodParameters,
    covers: bool,
) {
    cli::before_render(session).await;
    cli::heading(&format!(
        "Recommendations for a {} mood ({}/5)",
        mood.mood,
        mood.intensity.value()
    ));

    let targets = mood.targets();
    info!(
        "Target valence {:.2}, target energy {:.2}",
        targets.valence, targets.energy
    );

    let pb = utils::spinner("Fetching recommendations...");
    let picks = recommendations::recommend(session, mood).await;
    pb.finish_and_clear();

    if cli::has_data(&picks, "recommendations") {
        print_tracks(picks.items(), covers);
    }
}
