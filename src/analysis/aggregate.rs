use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use crate::types::TrackRecord;

/// Month bucket of a date, formatted `YYYY-MM`.
pub fn month_key(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m").to_string()
}

/// Record counts per (month, genre).
///
/// Counts rows, not distinct tracks: the sum over all cells equals the number
/// of records it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyGenreCounts {
    counts: BTreeMap<String, BTreeMap<String, u64>>,
}

impl MonthlyGenreCounts {
    pub fn from_records(records: &[TrackRecord]) -> Self {
        let mut counts: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
        for record in records {
            *counts
                .entry(month_key(&record.date))
                .or_default()
                .entry(record.genre.clone())
                .or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, month: &str, genre: &str) -> u64 {
        self.counts
            .get(month)
            .and_then(|genres| genres.get(genre))
            .copied()
            .unwrap_or(0)
    }

    /// Months in chronological order.
    pub fn months(&self) -> Vec<String> {
        self.counts.keys().cloned().collect()
    }

    pub fn month_total(&self, month: &str) -> u64 {
        self.counts
            .get(month)
            .map(|genres| genres.values().sum())
            .unwrap_or(0)
    }

    /// Totals per genre, descending by count and ascending by name on ties.
    pub fn genre_totals(&self) -> Vec<(String, u64)> {
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for genres in self.counts.values() {
            for (genre, count) in genres {
                *totals.entry(genre.as_str()).or_insert(0) += count;
            }
        }

        let mut totals: Vec<(String, u64)> = totals
            .into_iter()
            .map(|(genre, count)| (genre.to_string(), count))
            .collect();
        // stable sort keeps the alphabetical order from the BTreeMap on ties
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
    }

    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .flat_map(|genres| genres.values())
            .sum()
    }

    /// Non-zero cells as `(month, genre, count)`, ordered by month then genre.
    pub fn cells(&self) -> Vec<(String, String, u64)> {
        self.counts
            .iter()
            .flat_map(|(month, genres)| {
                genres
                    .iter()
                    .map(move |(genre, &count)| (month.clone(), genre.clone(), count))
            })
            .collect()
    }

    /// Dense matrix with one row per genre and one column per month.
    pub fn matrix<S: AsRef<str>, T: AsRef<str>>(&self, months: &[S], genres: &[T]) -> Vec<Vec<f64>> {
        genres
            .iter()
            .map(|genre| {
                months
                    .iter()
                    .map(|month| self.get(month.as_ref(), genre.as_ref()) as f64)
                    .collect()
            })
            .collect()
    }
}

/// Distinct saved tracks per month.
///
/// A track is identified by its (date, name, artist) triple so the genre
/// flattening of the cache does not inflate the counts.
pub fn monthly_track_counts(records: &[TrackRecord]) -> BTreeMap<String, u64> {
    let mut seen: HashSet<(&DateTime<Utc>, &str, &str)> = HashSet::new();
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        if seen.insert((&record.date, record.name.as_str(), record.artist.as_str())) {
            *counts.entry(month_key(&record.date)).or_insert(0) += 1;
        }
    }

    counts
}
