//! Spotify Library Explorer CLI Library
//!
//! This library fetches the saved tracks of a Spotify user, derives genre
//! information from the track artists and turns the result into monthly
//! statistics, charts and a hierarchical clustering of genres by the artists
//! they share.
//!
//! # Modules
//!
//! - `analysis` - Genre vectors, monthly aggregation and clustering
//! - `api` - HTTP API endpoints for the local callback server
//! - `chart` - SVG rendering of bar charts, heatmaps and dendrograms
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token, artist and library caches
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use splibcli::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> splibcli::Res<()> {
//!     config::load_env().await?;
//!     cli::info().await;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with `Send + Sync` bounds so it can
/// cross await points and carry errors from reqwest, csv, plotters and IO
/// alike.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Found {} saved tracks", count);
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
/// success!("Cached {} records", count);
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
/// Terminates with exit code 1. Only for fatal errors at the command
/// boundary, library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load library cache: {}", e);
/// // Program exits here
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
/// # Example
///
/// ```
/// warning!("Artist cache not found, fetching all artists");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
