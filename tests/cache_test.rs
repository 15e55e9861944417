use std::env;

use chrono::{DateTime, Utc};
use splibcli::{
    chart,
    management::{ArtistManager, LibraryManager, TokenManager},
    spotify::{auth::authorization_url, library::page_offsets},
    types::{Artist, Token, TrackRecord},
};

// Helper function to create a test record
fn create_test_record(added_at: &str, name: &str, artist: &str, genre: &str) -> TrackRecord {
    TrackRecord {
        date: added_at.parse::<DateTime<Utc>>().unwrap(),
        name: name.to_string(),
        artist: artist.to_string(),
        genre: genre.to_string(),
    }
}

fn create_artist(id: &str, name: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

fn create_token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "user-library-read".to_string(),
        expires_in,
        obtained_at,
    }
}

#[tokio::test]
async fn test_library_cache_round_trip() {
    let records = vec![
        create_test_record("2023-01-05T10:00:00Z", "Song A", "Artist 1", "rock"),
        create_test_record("2023-01-05T10:00:00Z", "Song A", "Artist 1", "indie"),
        create_test_record("2023-02-10T08:30:15Z", "Hello, \"World\"", "Artist, Two", "unknown"),
    ];
    let path = env::temp_dir().join(format!("splibcli_test_{}/library.csv", std::process::id()));

    LibraryManager::new(Some(records.clone()))
        .persist_to(&path)
        .await
        .unwrap();
    let loaded = LibraryManager::load_from(&path).await.unwrap();

    assert_eq!(loaded.count(), 3);
    assert_eq!(loaded.records(), records.as_slice());

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("date,name,artist,genre"));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_library_cache_missing_file() {
    let path = env::temp_dir().join("splibcli_test_missing/does-not-exist.csv");
    assert!(LibraryManager::load_from(&path).await.is_err());
}

#[test]
fn test_empty_library_keeps_header() {
    let csv = LibraryManager::new(None).to_csv().unwrap();
    assert_eq!(csv.trim_end(), "date,name,artist,genre");

    let parsed = LibraryManager::parse(&csv).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn test_library_parse_rejects_bad_dates() {
    let content = "date,name,artist,genre\nyesterday,Song,Artist,rock\n";
    assert!(LibraryManager::parse(content).is_err());
}

#[tokio::test]
async fn test_artist_cache_round_trip() {
    let manager = ArtistManager::new(Some(vec![
        create_artist("b", "Artist B", &["pop"]),
        create_artist("a", "Artist A", &[]),
    ]));
    let path = env::temp_dir().join(format!("splibcli_test_{}/artists.json", std::process::id()));

    manager.persist_to(&path).await.unwrap();
    let loaded = ArtistManager::load_from(&path).await.unwrap();

    assert_eq!(loaded.count(), 2);
    assert_eq!(loaded.get("b").unwrap().genres, vec!["pop".to_string()]);
    assert!(loaded.get("a").unwrap().genres.is_empty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_artist_missing_ids() {
    let mut manager = ArtistManager::new(Some(vec![create_artist("a", "Artist A", &["rock"])]));

    let missing = manager.missing_ids(["a", "b", "c", "b"]);
    assert_eq!(missing, vec!["b".to_string(), "c".to_string()]);

    // Adding replaces by id
    manager.add_artists(vec![
        create_artist("a", "Artist A", &["jazz"]),
        create_artist("b", "Artist B", &[]),
    ]);
    assert_eq!(manager.count(), 2);
    assert_eq!(manager.get("a").unwrap().genres, vec!["jazz".to_string()]);
    assert_eq!(manager.missing_ids(["a", "b", "c"]), vec!["c".to_string()]);
}

#[test]
fn test_token_expiry() {
    let now = Utc::now().timestamp() as u64;

    assert!(!TokenManager::new(create_token(now, 3600)).is_expired());
    // Within the refresh margin
    assert!(TokenManager::new(create_token(now, 120)).is_expired());
    assert!(TokenManager::new(create_token(0, 3600)).is_expired());
}

#[test]
fn test_page_offsets() {
    assert_eq!(page_offsets(120, 50), vec![0, 50, 100]);
    assert_eq!(page_offsets(50, 50), vec![0]);
    assert_eq!(page_offsets(51, 50), vec![0, 50]);
    assert!(page_offsets(0, 50).is_empty());
    assert!(page_offsets(10, 0).is_empty());
}

#[test]
fn test_authorization_url() {
    let url = authorization_url("my-client", "challenge123").unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let value = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    assert_eq!(value("client_id").as_deref(), Some("my-client"));
    assert_eq!(value("response_type").as_deref(), Some("code"));
    assert_eq!(value("code_challenge_method").as_deref(), Some("S256"));
    assert_eq!(value("code_challenge").as_deref(), Some("challenge123"));
    assert!(value("redirect_uri").is_some());
    assert!(value("scope").is_some());
}

#[test]
fn test_red_scale() {
    assert_eq!(chart::red_scale(0.0, 10.0), (255, 255, 255));
    assert_eq!(chart::red_scale(10.0, 10.0), (255, 0, 0));
    assert_eq!(chart::red_scale(20.0, 10.0), (255, 0, 0));
    assert_eq!(chart::red_scale(5.0, 0.0), (255, 255, 255));
}

#[test]
fn test_charts_reject_mismatched_input() {
    let path = env::temp_dir().join("splibcli_test_charts/never-written.svg");

    let labels = vec!["2023-01".to_string(), "2023-02".to_string()];
    assert!(chart::bar(&path, "t", "x", "y", &labels, &[1]).is_err());
    assert!(chart::bar(&path, "t", "x", "y", &[], &[]).is_err());

    let genres = vec!["rock".to_string()];
    assert!(chart::heatmap(&path, "t", "x", "y", &labels, &genres, &[vec![1.0]]).is_err());
    assert!(chart::heatmap(&path, "t", "x", "y", &[], &genres, &[]).is_err());

    assert!(!path.exists());
}
