use chrono::{DateTime, Utc};
use splibcli::analysis::UNKNOWN_GENRE;
use splibcli::types::{Artist, SavedTrack, SimplifiedArtist, Track, TrackRecord, TrackTableRow};
use splibcli::utils::*;
use std::collections::HashMap;
use std::path::PathBuf;

fn date(s: &str) -> DateTime<Utc> {
    s.parse::<DateTime<Utc>>().unwrap()
}

// Helper function to create a test record
fn create_test_record(added_at: &str, name: &str, artist: &str, genre: &str) -> TrackRecord {
    TrackRecord {
        date: date(added_at),
        name: name.to_string(),
        artist: artist.to_string(),
        genre: genre.to_string(),
    }
}

// Helper function to create a saved track with a single artist
fn create_saved_track(added_at: &str, name: &str, artist_id: Option<&str>, artist: &str) -> SavedTrack {
    SavedTrack {
        added_at: date(added_at),
        track: Some(Track {
            id: Some(format!("{}_id", name)),
            name: name.to_string(),
            artists: vec![SimplifiedArtist {
                id: artist_id.map(|s| s.to_string()),
                name: artist.to_string(),
            }],
        }),
    }
}

fn create_artist(id: &str, name: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // SHA256 digest is 32 bytes, 43 characters in unpadded base64
    assert_eq!(challenge.len(), 43);

    // Deterministic
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // URL-safe alphabet, no padding
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_parse_month_valid_inputs() {
    assert_eq!(parse_month("2023-04").unwrap(), "2023-04");
    assert_eq!(parse_month(" 2023-12 ").unwrap(), "2023-12");
    assert_eq!(parse_month("1999-01").unwrap(), "1999-01");
}

#[test]
fn test_parse_month_invalid_inputs() {
    let result = parse_month("");
    assert!(result.unwrap_err().contains("cannot be empty"));

    let result = parse_month("   ");
    assert!(result.unwrap_err().contains("cannot be empty"));

    let result = parse_month("2023-13");
    assert!(result.unwrap_err().contains("invalid month '2023-13'"));

    let result = parse_month("april");
    assert!(result.unwrap_err().contains("expected YYYY-MM"));

    assert!(parse_month("2023-04-01").is_err());
}

#[test]
fn test_filter_records_by_month() {
    let records = vec![
        create_test_record("2023-01-15T10:00:00Z", "A", "X", "rock"),
        create_test_record("2023-02-15T10:00:00Z", "B", "X", "rock"),
        create_test_record("2023-03-15T10:00:00Z", "C", "Y", "pop"),
        create_test_record("2023-04-15T10:00:00Z", "D", "Y", "pop"),
    ];

    let all = filter_records_by_month(records.clone(), None, None);
    assert_eq!(all.len(), 4);

    let since = filter_records_by_month(records.clone(), Some("2023-03"), None);
    let names: Vec<&str> = since.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["C", "D"]);

    let until = filter_records_by_month(records.clone(), None, Some("2023-02"));
    let names: Vec<&str> = until.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);

    // Both bounds are inclusive
    let range = filter_records_by_month(records.clone(), Some("2023-02"), Some("2023-03"));
    let names: Vec<&str> = range.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);

    let empty = filter_records_by_month(records, Some("2024-01"), None);
    assert!(empty.is_empty());
}

#[test]
fn test_records_from_saved_tracks_one_row_per_genre() {
    let saved = vec![
        create_saved_track("2023-01-05T10:00:00Z", "Song A", Some("a1"), "Artist 1"),
        create_saved_track("2023-02-05T10:00:00Z", "Song B", Some("a2"), "Artist 2"),
    ];
    let mut artists = HashMap::new();
    artists.insert("a1".to_string(), create_artist("a1", "Artist 1", &["rock", "indie"]));
    artists.insert("a2".to_string(), create_artist("a2", "Artist 2", &["pop"]));

    let records = records_from_saved_tracks(&saved, &artists);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "Song A");
    assert_eq!(records[0].genre, "rock");
    assert_eq!(records[1].name, "Song A");
    assert_eq!(records[1].genre, "indie");
    assert_eq!(records[2].artist, "Artist 2");
    assert_eq!(records[2].genre, "pop");
    assert_eq!(records[2].date, date("2023-02-05T10:00:00Z"));
}

#[test]
fn test_records_from_saved_tracks_without_genres() {
    let saved = vec![
        // Artist known but without genres
        create_saved_track("2023-01-05T10:00:00Z", "Song A", Some("a1"), "Artist 1"),
        // Artist not in the cache
        create_saved_track("2023-01-06T10:00:00Z", "Song B", Some("missing"), "Artist 2"),
        // Local file, artist without id
        create_saved_track("2023-01-07T10:00:00Z", "Song C", None, "Artist 3"),
        // Unavailable track
        SavedTrack {
            added_at: date("2023-01-08T10:00:00Z"),
            track: None,
        },
    ];
    let mut artists = HashMap::new();
    artists.insert("a1".to_string(), create_artist("a1", "Artist 1", &[]));

    let records = records_from_saved_tracks(&saved, &artists);

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.genre == UNKNOWN_GENRE));
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Song A", "Song B", "Song C"]);
}

#[test]
fn test_records_from_saved_tracks_uses_first_artist() {
    let mut saved = create_saved_track("2023-01-05T10:00:00Z", "Duet", Some("a1"), "Artist 1");
    if let Some(track) = saved.track.as_mut() {
        track.artists.push(SimplifiedArtist {
            id: Some("a2".to_string()),
            name: "Artist 2".to_string(),
        });
    }
    let mut artists = HashMap::new();
    artists.insert("a1".to_string(), create_artist("a1", "Artist 1", &["jazz"]));
    artists.insert("a2".to_string(), create_artist("a2", "Artist 2", &["pop"]));

    let records = records_from_saved_tracks(&[saved], &artists);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].artist, "Artist 1");
    assert_eq!(records[0].genre, "jazz");
}

#[test]
fn test_build_track_table_rows_joins_genres() {
    let records = vec![
        create_test_record("2023-01-05T10:00:00Z", "Song A", "Artist 1", "rock"),
        create_test_record("2023-01-05T10:00:00Z", "Song A", "Artist 1", "indie"),
        create_test_record("2023-01-06T10:00:00Z", "Song B", "Artist 2", "pop"),
    ];

    let rows = build_track_table_rows(&records);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2023-01-05");
    assert_eq!(rows[0].genres, "rock,indie");
    assert_eq!(rows[1].name, "Song B");
    assert_eq!(rows[1].genres, "pop");
}

#[test]
fn test_sort_track_table_rows() {
    let row = |date: &str, artist: &str| TrackTableRow {
        date: date.to_string(),
        name: "Song".to_string(),
        artist: artist.to_string(),
        genres: String::new(),
    };
    let mut rows = vec![
        row("2023-10-01", "Artist Z"),
        row("2023-10-03", "Artist A"),
        row("2023-10-01", "Artist A"),
        row("2023-10-02", "Artist B"),
    ];

    sort_track_table_rows(&mut rows);

    // Date descending, then artist ascending
    assert_eq!(rows[0].date, "2023-10-03");
    assert_eq!(rows[1].date, "2023-10-02");
    assert_eq!(rows[2].date, "2023-10-01");
    assert_eq!(rows[2].artist, "Artist A");
    assert_eq!(rows[3].artist, "Artist Z");
}

#[test]
fn test_chart_output_path() {
    let explicit = PathBuf::from("/tmp/custom.svg");
    assert_eq!(chart_output_path(Some(explicit.clone()), "monthly"), explicit);

    let default = chart_output_path(None, "monthly");
    assert_eq!(default.file_name().unwrap(), "monthly.svg");
}
