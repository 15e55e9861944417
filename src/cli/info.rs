use std::collections::HashSet;

use crate::{
    analysis::{GenreVectors, monthly_track_counts},
    config, info,
    management::{ArtistManager, LibraryManager, TokenManager},
    warning,
};

/// Shows where the caches live and what they currently hold.
///
/// Never fails: missing caches are reported as warnings with the command
/// that creates them.
///
/// ```text
/// [o] Data directory: /home/me/.local/share/splibcli
/// [o] Library cache: 2143 records, 1520 tracks, 610 artists, 402 genres
/// [o] Library range: 2016-03 - 2024-11
/// [o] Artist cache: 640 artists
/// [o] Token: valid
/// ```
pub async fn info() {
    info!("Data directory: {}", config::data_dir().display());
    info!("Chart directory: {}", config::chart_dir().display());

    match LibraryManager::load().await {
        Ok(mgr) => {
            let records = mgr.records();
            let tracks = monthly_track_counts(records).values().sum::<u64>();
            let vectors = GenreVectors::from_records(records);
            let genres: HashSet<&str> = records.iter().map(|r| r.genre.as_str()).collect();

            info!(
                "Library cache: {} records, {} tracks, {} artists, {} genres",
                mgr.count(),
                tracks,
                vectors.artist_count(),
                vectors.len()
            );
            if genres.len() > vectors.len() {
                info!("Some tracks have artists without genre tags.");
            }

            let first = records.iter().map(|r| r.date).min();
            let last = records.iter().map(|r| r.date).max();
            if let (Some(first), Some(last)) = (first, last) {
                info!(
                    "Library range: {} - {}",
                    first.format("%Y-%m"),
                    last.format("%Y-%m")
                );
            }
        }
        Err(e) => warning!(
            "No library cache ({}). Run splibcli library update.",
            e
        ),
    }

    match ArtistManager::load().await {
        Ok(mgr) => info!("Artist cache: {} artists", mgr.count()),
        Err(_) => warning!("No artist cache yet."),
    }

    match TokenManager::load().await {
        Ok(mgr) if mgr.is_expired() => info!("Token: expired, refreshed on next request"),
        Ok(_) => info!("Token: valid"),
        Err(_) => warning!("No token. Run splibcli auth."),
    }
}
