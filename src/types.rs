use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrack {
    pub added_at: DateTime<Utc>,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTracksResponse {
    pub items: Vec<SavedTrack>,
    pub total: u64,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

/// One row of the library cache: a saved track paired with one genre of its
/// artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub date: DateTime<Utc>,
    pub name: String,
    pub artist: String,
    pub genre: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub date: String,
    pub name: String,
    pub artist: String,
    pub genres: String,
}

#[derive(Tabled)]
pub struct MonthCountRow {
    pub month: String,
    pub tracks: u64,
}

#[derive(Tabled)]
pub struct GenreCountRow {
    pub genre: String,
    pub count: u64,
}

#[derive(Tabled)]
pub struct MonthGenreCountRow {
    pub month: String,
    pub genre: String,
    pub count: u64,
}

#[derive(Tabled)]
pub struct ClusterTableRow {
    pub cluster: usize,
    pub genres: String,
}
