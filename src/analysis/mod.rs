//! # Analysis Module
//!
//! In-memory transforms over the flattened library records:
//!
//! - [`genre`] - binary genre × artist incidence matrix ("genre vectors")
//! - [`aggregate`] - counts per month and per (month, genre)
//! - [`cluster`] - pairwise Euclidean distances and agglomerative linkage
//!
//! Nothing here performs IO, so every function is usable from tests with
//! hand-built records.

pub mod aggregate;
pub mod cluster;
pub mod genre;

pub use aggregate::{MonthlyGenreCounts, month_key, monthly_track_counts};
pub use cluster::{Dendrogram, DistanceMatrix, Linkage, Merge, euclidean, linkage, pairwise_distances};
pub use genre::{GenreVectors, UNKNOWN_GENRE};
