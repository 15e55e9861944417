use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;

use crate::{
    Res, error, info,
    management::{ArtistManager, LibraryManager, TokenManager},
    spotify::{self, PAGE_LIMIT},
    success,
    types::{SavedTrack, TrackRecord},
    utils, warning,
};

/// Fetches the saved-track library and the genres of its artists, then
/// replaces the CSV cache with the flattened records.
///
/// Artist metadata is read from the artist cache and only missing artists are
/// requested; `force` discards the artist cache first.
pub async fn update_library(force: bool) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run splibcli auth\n Error: {}",
                e
            );
        }
    };

    let client = Client::new();

    let saved_tracks = match fetch_saved_tracks(&client, &mut token_mgr).await {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to fetch saved tracks: {}", e),
    };
    success!("Fetched {} saved tracks!", saved_tracks.len());

    let mut artist_mgr = if force {
        ArtistManager::new(None)
    } else {
        ArtistManager::load()
            .await
            .unwrap_or_else(|_| ArtistManager::new(None))
    };

    let missing = artist_mgr.missing_ids(
        saved_tracks
            .iter()
            .filter_map(|s| s.track.as_ref())
            .filter_map(|t| t.artists.first())
            .filter_map(|a| a.id.as_deref()),
    );

    if missing.is_empty() {
        info!("All {} artists already cached.", artist_mgr.count());
    } else {
        match fetch_artists(&client, &mut token_mgr, &missing, &mut artist_mgr).await {
            Ok(fetched) => success!("Fetched genres for {} artists!", fetched),
            Err(e) => error!("Failed to fetch artists: {}", e),
        }

        if let Err(e) = artist_mgr.persist().await {
            warning!("Cannot cache artists. Err: {}", e);
        }
    }

    let records = utils::records_from_saved_tracks(&saved_tracks, artist_mgr.as_map());
    let library_mgr = LibraryManager::new(Some(records));
    if let Err(e) = library_mgr.persist().await {
        error!("Failed to cache library. Err: {}", e);
    }

    success!(
        "Cached {} records in {}",
        library_mgr.count(),
        LibraryManager::cache_path().display()
    );
}

async fn fetch_saved_tracks(client: &Client, token_mgr: &mut TokenManager) -> Res<Vec<SavedTrack>> {
    let token = token_mgr.get_valid_token().await?;
    let total = spotify::library::get_total_saved_tracks(client, &token).await?;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    pb.set_message("saved tracks");

    let mut saved_tracks: Vec<SavedTrack> = Vec::with_capacity(total as usize);
    for offset in spotify::library::page_offsets(total, PAGE_LIMIT) {
        let token = token_mgr.get_valid_token().await?;
        let (items, _) =
            match spotify::library::get_saved_tracks(client, &token, PAGE_LIMIT, offset).await {
                Ok(page) => page,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e.into());
                }
            };

        if items.is_empty() {
            break;
        }

        pb.inc(items.len() as u64);
        saved_tracks.extend(items);
    }

    pb.finish_and_clear();
    Ok(saved_tracks)
}

async fn fetch_artists(
    client: &Client,
    token_mgr: &mut TokenManager,
    ids: &[String],
    artist_mgr: &mut ArtistManager,
) -> Res<usize> {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(ProgressStyle::with_template("{spinner:.blue} {msg}")?.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));

    let mut fetched = 0;
    for chunk in ids.chunks(PAGE_LIMIT as usize) {
        pb.set_message(format!("Fetching artists... ({}/{})", fetched, ids.len()));

        let token = token_mgr.get_valid_token().await?;
        let artists = match spotify::artists::get_several_artists(client, &token, chunk).await {
            Ok(artists) => artists,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        };

        fetched += artists.len();
        artist_mgr.add_artists(artists);
    }

    pb.finish_and_clear();
    Ok(fetched)
}

/// Loads the cached library or exits with a hint to run the update.
pub(crate) async fn load_records() -> Vec<TrackRecord> {
    match LibraryManager::load().await {
        Ok(mgr) => mgr.into_records(),
        Err(e) => error!(
            "Failed to load library cache. Run splibcli library update.\n Error: {}",
            e
        ),
    }
}

/// Prints the cached library, one row per saved track.
///
/// `search` matches track or artist names case-insensitively; `genre` keeps
/// tracks carrying that exact genre.
pub async fn list_tracks(search: Option<String>, genre: Option<String>) {
    let records = load_records().await;

    let mut rows = utils::build_track_table_rows(&records);
    utils::sort_track_table_rows(&mut rows);

    if let Some(search) = search {
        let term = search.to_lowercase();
        rows.retain(|r| {
            r.name.to_lowercase().contains(&term) || r.artist.to_lowercase().contains(&term)
        });
    }

    if let Some(genre) = genre {
        rows.retain(|r| r.genres.split(',').any(|g| g.eq_ignore_ascii_case(&genre)));
    }

    if rows.is_empty() {
        warning!("No tracks match.");
        return;
    }

    let count = rows.len();
    println!("{}", Table::new(rows));
    info!("{} tracks", count);
}
