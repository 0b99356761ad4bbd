//! spotlens CLI Library
//!
//! This library powers a terminal dashboard for a Spotify account: liked songs,
//! top artists and tracks, recent listening history, and a few derived insights
//! such as a genre summary, an hourly listening pattern, a listener "personality"
//! and mood based recommendations.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line panels
//! - `config` - Configuration management and environment variables
//! - `error` - Error types for Spotify communication
//! - `insights` - Aggregates derived from fetched data
//! - `management` - Session context and in-memory token store
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotlens::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spotlens::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     cli::liked(&config, false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod insights;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds for async
/// contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening Spotify login in your browser...");
/// info!("Found {} liked songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Used for unrecoverable errors such as missing configuration or a failed
/// login. Code after this macro does not run.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for API errors that end a single call but not the program.
///
/// # Example
///
/// ```
/// warning!("Request to {} failed: {}", path, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
