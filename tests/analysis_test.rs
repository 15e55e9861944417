use chrono::{DateTime, Utc};
use splibcli::analysis::*;
use splibcli::types::TrackRecord;
use std::collections::HashSet;

// Helper function to create a test record
fn create_test_record(added_at: &str, name: &str, artist: &str, genre: &str) -> TrackRecord {
    TrackRecord {
        date: added_at.parse::<DateTime<Utc>>().unwrap(),
        name: name.to_string(),
        artist: artist.to_string(),
        genre: genre.to_string(),
    }
}

fn sample_records() -> Vec<TrackRecord> {
    vec![
        create_test_record("2023-01-05T10:00:00Z", "Song A", "Artist 1", "rock"),
        create_test_record("2023-01-05T10:00:00Z", "Song A", "Artist 1", "indie"),
        create_test_record("2023-02-10T10:00:00Z", "Song B", "Artist 2", "indie"),
        create_test_record("2023-02-11T10:00:00Z", "Song C", "Artist 3", UNKNOWN_GENRE),
        create_test_record("2023-03-01T10:00:00Z", "Song D", "Artist 1", "rock"),
    ]
}

#[test]
fn test_genre_vectors_indexing() {
    let vectors = GenreVectors::from_records(&sample_records());

    // First-appearance order
    assert_eq!(vectors.genres(), &["rock".to_string(), "indie".to_string()]);
    assert_eq!(
        vectors.artists(),
        &[
            "Artist 1".to_string(),
            "Artist 2".to_string(),
            "Artist 3".to_string()
        ]
    );
    assert_eq!(vectors.len(), 2);
    assert_eq!(vectors.artist_count(), 3);

    assert_eq!(vectors.vector("rock").unwrap(), &[1, 0, 0]);
    assert_eq!(vectors.vector("indie").unwrap(), &[1, 1, 0]);

    // Placeholder genre has no vector, unknown genres neither
    assert!(vectors.vector(UNKNOWN_GENRE).is_none());
    assert!(vectors.vector("jazz").is_none());
    assert_eq!(vectors.get("rock", "Artist 3"), Some(0));
    assert_eq!(vectors.get("rock", "Nobody"), None);
}

#[test]
fn test_genre_vectors_ones_exactly_at_observed_pairs() {
    let records = sample_records();
    let vectors = GenreVectors::from_records(&records);

    let observed: HashSet<(&str, &str)> = records
        .iter()
        .filter(|r| r.genre != UNKNOWN_GENRE)
        .map(|r| (r.genre.as_str(), r.artist.as_str()))
        .collect();

    for genre in vectors.genres() {
        for artist in vectors.artists() {
            let expected = if observed.contains(&(genre.as_str(), artist.as_str())) {
                1
            } else {
                0
            };
            assert_eq!(vectors.get(genre, artist), Some(expected), "{genre}/{artist}");
        }
    }

    let ones: usize = vectors
        .matrix()
        .iter()
        .map(|row| row.iter().filter(|&&v| v == 1.0).count())
        .sum();
    assert_eq!(ones, observed.len());
}

#[test]
fn test_genre_vectors_empty_input() {
    let vectors = GenreVectors::from_records(&[]);
    assert!(vectors.is_empty());
    assert_eq!(vectors.artist_count(), 0);
    assert!(vectors.matrix().is_empty());
}

#[test]
fn test_genre_vectors_select_and_ranking() {
    let vectors = GenreVectors::from_records(&sample_records());

    let ranked = vectors.genres_by_artist_count();
    assert_eq!(
        ranked,
        vec![("indie".to_string(), 2), ("rock".to_string(), 1)]
    );

    let selected = vectors.select(&["indie", "jazz", "rock", "indie"]);
    assert_eq!(selected.genres(), &["indie".to_string(), "rock".to_string()]);
    assert_eq!(selected.artist_count(), 3);
    assert_eq!(selected.vector("indie").unwrap(), &[1, 1, 0]);
    assert_eq!(selected.matrix(), vec![vec![1.0, 1.0, 0.0], vec![1.0, 0.0, 0.0]]);
}

#[test]
fn test_month_key() {
    let date = "2023-01-31T23:30:00Z".parse::<DateTime<Utc>>().unwrap();
    assert_eq!(month_key(&date), "2023-01");
}

#[test]
fn test_monthly_genre_counts_sum_to_row_count() {
    let records = sample_records();
    let counts = MonthlyGenreCounts::from_records(&records);

    assert_eq!(counts.total(), records.len() as u64);

    let cell_sum: u64 = counts.cells().iter().map(|(_, _, c)| c).sum();
    assert_eq!(cell_sum, records.len() as u64);

    let month_sum: u64 = counts.months().iter().map(|m| counts.month_total(m)).sum();
    assert_eq!(month_sum, records.len() as u64);
}

#[test]
fn test_monthly_genre_counts_values() {
    let counts = MonthlyGenreCounts::from_records(&sample_records());

    assert_eq!(counts.months(), vec!["2023-01", "2023-02", "2023-03"]);
    assert_eq!(counts.get("2023-01", "rock"), 1);
    assert_eq!(counts.get("2023-01", "indie"), 1);
    assert_eq!(counts.get("2023-02", UNKNOWN_GENRE), 1);
    assert_eq!(counts.get("2023-03", "indie"), 0);
    assert_eq!(counts.get("2030-01", "rock"), 0);
    assert_eq!(counts.month_total("2023-01"), 2);

    // Descending by count, ties by name
    assert_eq!(
        counts.genre_totals(),
        vec![
            ("indie".to_string(), 2),
            ("rock".to_string(), 2),
            (UNKNOWN_GENRE.to_string(), 1)
        ]
    );

    let months = counts.months();
    assert_eq!(
        counts.matrix(&months, &["rock", "indie"]),
        vec![vec![1.0, 0.0, 1.0], vec![1.0, 1.0, 0.0]]
    );
}

#[test]
fn test_monthly_track_counts_ignores_genre_flattening() {
    let counts = monthly_track_counts(&sample_records());

    assert_eq!(counts.get("2023-01"), Some(&1));
    assert_eq!(counts.get("2023-02"), Some(&2));
    assert_eq!(counts.get("2023-03"), Some(&1));
    assert_eq!(counts.values().sum::<u64>(), 4);
}

#[test]
fn test_empty_aggregation() {
    let counts = MonthlyGenreCounts::from_records(&[]);
    assert_eq!(counts.total(), 0);
    assert!(counts.months().is_empty());
    assert!(counts.genre_totals().is_empty());
    assert!(monthly_track_counts(&[]).is_empty());
}
