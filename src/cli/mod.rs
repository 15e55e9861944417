//! # CLI Module
//!
//! User-facing implementations of every subcommand. Each function loads what
//! it needs from the caches or the Spotify API, reports progress with the
//! crate's output macros and terminates through `error!` on fatal failures.
//!
//! ## Commands
//!
//! - [`auth`] - OAuth authorization with PKCE
//! - [`update_library`] - fetch saved tracks and artist genres into the CSV cache
//! - [`list_tracks`] - print the cached library with optional filters
//! - [`stats`] - monthly and genre counts as tables
//! - [`chart`] - bar chart and heatmaps as SVG
//! - [`cluster`] - hierarchical clustering of genres, rendered as a dendrogram
//! - [`info`] - cache and token status
//!
//! ## Typical session
//!
//! ```bash
//! splibcli auth
//! splibcli library update
//! splibcli stats --by genre --top 20
//! splibcli chart monthly --open
//! splibcli cluster --linkage average --top 40 --clusters 6 --open
//! ```

mod auth;
mod chart;
mod cluster;
mod info;
mod library;
mod stats;

pub use auth::auth;
pub use chart::ChartKind;
pub use chart::chart;
pub use cluster::cluster;
pub use info::info;
pub use library::list_tracks;
pub use library::update_library;
pub use stats::StatsBy;
pub use stats::stats;
