use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotlens::{
    cli, config, error,
    types::{Intensity, Mood, MoodParameters, TimeRange},
    utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show all liked songs
    Liked(LikedOptions),

    /// Show top tracks or artists
    Top(TopOptions),

    /// Show recently played tracks and the hourly listening pattern
    Recent,

    /// Genre summary, listening pattern and listener personality
    Insights(InsightsOptions),

    /// Recommendations for a mood
    Recommend(RecommendOptions),

    /// Show every panel at once
    Dashboard(DashboardOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LikedOptions {
    /// Include album cover urls
    #[clap(long)]
    pub covers: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// What to rank
    #[clap(value_enum)]
    pub kind: cli::TopKind,

    /// Number of items (Spotify allows up to 50)
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: u32,

    /// Period the ranking covers
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub time_range: TimeRange,

    /// Include cover urls
    #[clap(long)]
    pub covers: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InsightsOptions {
    /// Period the top artists cover
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub time_range: TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// How you feel
    #[clap(long, value_enum)]
    pub mood: Mood,

    /// How strongly, from 1 to 5
    #[clap(long, default_value = "3", value_parser = utils::parse_intensity)]
    pub intensity: Intensity,

    /// Include album cover urls
    #[clap(long)]
    pub covers: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DashboardOptions {
    /// Period the top lists cover
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub time_range: TimeRange,

    /// Add a recommendation panel for this mood
    #[clap(long, value_enum)]
    pub mood: Option<Mood>,

    /// Intensity of the mood, from 1 to 5
    #[clap(long, default_value = "3", value_parser = utils::parse_intensity)]
    pub intensity: Intensity,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    // A missing .env file is fine as long as the process environment has the values.
    if let Err(e) = config::load_env().await {
        warning!("{}", e);
    }

    let config = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => error!(
            "Invalid configuration: {}\nSet it in the environment or in {}",
            e,
            config::env_path().display()
        ),
    };

    match cli.command {
        Command::Auth => cli::auth(&config).await,
        Command::Liked(opt) => cli::liked(&config, opt.covers).await,
        Command::Top(opt) => {
            cli::top(&config, opt.kind, opt.limit, opt.time_range, opt.covers).await
        }
        Command::Recent => cli::recent(&config).await,
        Command::Insights(opt) => cli::insights(&config, opt.time_range).await,
        Command::Recommend(opt) => {
            let mood = MoodParameters::new(opt.mood, opt.intensity);
            cli::recommend(&config, mood, opt.covers).await
        }
        Command::Dashboard(opt) => {
            let mood = opt.mood.map(|m| MoodParameters::new(m, opt.intensity));
            cli::dashboard(&config, opt.time_range, mood).await
        }
        Command::Completions(_) => {}
    }
}
