use std::{cmp::Ordering, collections::HashMap, path::PathBuf};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, NaiveDate, Utc};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    analysis::{UNKNOWN_GENRE, month_key},
    config,
    types::{Artist, SavedTrack, TrackRecord, TrackTableRow},
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Parses a `YYYY-MM` month argument and normalizes it to `YYYY-MM`.
pub fn parse_month(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("month cannot be empty".to_string());
    }

    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m").to_string())
        .map_err(|_| format!("invalid month '{}' (expected YYYY-MM)", trimmed))
}

/// Keeps records whose month lies within `since..=until`, both optional.
pub fn filter_records_by_month(
    records: Vec<TrackRecord>,
    since: Option<&str>,
    until: Option<&str>,
) -> Vec<TrackRecord> {
    records
        .into_iter()
        .filter(|r| {
            let month = month_key(&r.date);
            since.is_none_or(|s| month.as_str() >= s) && until.is_none_or(|u| month.as_str() <= u)
        })
        .collect()
}

/// Flattens saved tracks into one record per (track, genre) of the track's
/// first artist.
///
/// Artists missing from `artists` or without genre tags produce a single
/// record with [`UNKNOWN_GENRE`]. Items without a track or without artists
/// are skipped.
pub fn records_from_saved_tracks(
    saved_tracks: &[SavedTrack],
    artists: &HashMap<String, Artist>,
) -> Vec<TrackRecord> {
    let mut records = Vec::new();

    for saved in saved_tracks {
        let Some(track) = &saved.track else {
            continue;
        };
        let Some(artist) = track.artists.first() else {
            continue;
        };

        let genres: Vec<String> = artist
            .id
            .as_ref()
            .and_then(|id| artists.get(id))
            .map(|a| a.genres.clone())
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| vec![UNKNOWN_GENRE.to_string()]);

        for genre in genres {
            records.push(TrackRecord {
                date: saved.added_at,
                name: track.name.clone(),
                artist: artist.name.clone(),
                genre,
            });
        }
    }

    records
}

/// Collapses flattened records back to one table row per saved track with
/// the genres joined by `,`.
pub fn build_track_table_rows(records: &[TrackRecord]) -> Vec<TrackTableRow> {
    let mut rows: Vec<TrackTableRow> = Vec::new();
    let mut index: HashMap<(&DateTime<Utc>, &str, &str), usize> = HashMap::new();

    for record in records {
        let key = (&record.date, record.name.as_str(), record.artist.as_str());
        match index.get(&key) {
            Some(&i) => {
                rows[i].genres.push(',');
                rows[i].genres.push_str(&record.genre);
            }
            None => {
                index.insert(key, rows.len());
                rows.push(TrackTableRow {
                    date: record.date.format("%Y-%m-%d").to_string(),
                    name: record.name.clone(),
                    artist: record.artist.clone(),
                    genres: record.genre.clone(),
                });
            }
        }
    }

    rows
}

pub fn sort_track_table_rows(rows: &mut Vec<TrackTableRow>) {
    rows.sort_by(|a, b| {
        match b.date.cmp(&a.date) {
            Ordering::Equal => a.artist.cmp(&b.artist), // secondary sort: artist ascending
            other => other,
        }
    });
}

/// Resolves the output file of a chart: explicit path or `<chart_dir>/<name>.svg`.
pub fn chart_output_path(output: Option<PathBuf>, name: &str) -> PathBuf {
    output.unwrap_or_else(|| config::chart_dir().join(format!("{}.svg", name)))
}
