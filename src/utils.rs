use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

use crate::types::{HourCount, Intensity};

pub const STATE_LENGTH: usize = 32;
const CHART_WIDTH: usize = 40;

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// clap value parser for `--intensity`.
pub fn parse_intensity(s: &str) -> Result<Intensity, String> {
    let value = s
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("'{}' is not a number between 1 and 5", s))?;
    Intensity::new(value)
}

/// Horizontal bar for the hourly histogram, scaled to the busiest hour.
pub fn histogram_bar(plays: usize, max_plays: usize) -> String {
    if max_plays == 0 {
        return String::new();
    }
    let width = (plays * CHART_WIDTH).div_ceil(max_plays);
    "█".repeat(width)
}

pub fn max_plays(pattern: &[HourCount]) -> usize {
    pattern.iter().map(|h| h.plays).max().unwrap_or(0)
}

pub fn format_hour(hour: u32) -> String {
    format!("{:02}:00", hour)
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
