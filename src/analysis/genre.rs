use std::collections::HashMap;

use crate::types::TrackRecord;

/// Genre recorded for tracks whose artist carries no genre tags.
pub const UNKNOWN_GENRE: &str = "unknown";

/// Binary genre × artist incidence matrix.
///
/// Each genre maps to a vector with one slot per artist, `1` when the artist
/// carries the genre and `0` otherwise. Genres and artists are indexed in
/// order of first appearance in the records they were built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreVectors {
    genres: Vec<String>,
    artists: Vec<String>,
    artist_indices: HashMap<String, usize>,
    genre_indices: HashMap<String, usize>,
    vectors: Vec<Vec<u8>>,
}

impl GenreVectors {
    /// Builds the incidence matrix from flattened track records.
    ///
    /// Every artist gets a column, including artists that only appear with
    /// the [`UNKNOWN_GENRE`] placeholder. The placeholder itself gets no row.
    pub fn from_records(records: &[TrackRecord]) -> Self {
        let mut artists: Vec<String> = Vec::new();
        let mut artist_indices: HashMap<String, usize> = HashMap::new();
        let mut genres: Vec<String> = Vec::new();
        let mut genre_indices: HashMap<String, usize> = HashMap::new();
        let mut pairs: Vec<(usize, usize)> = Vec::new();

        for record in records {
            let artist_idx = *artist_indices
                .entry(record.artist.clone())
                .or_insert_with(|| {
                    artists.push(record.artist.clone());
                    artists.len() - 1
                });

            if record.genre == UNKNOWN_GENRE || record.genre.is_empty() {
                continue;
            }

            let genre_idx = *genre_indices.entry(record.genre.clone()).or_insert_with(|| {
                genres.push(record.genre.clone());
                genres.len() - 1
            });

            pairs.push((genre_idx, artist_idx));
        }

        let mut vectors = vec![vec![0u8; artists.len()]; genres.len()];
        for (genre_idx, artist_idx) in pairs {
            vectors[genre_idx][artist_idx] = 1;
        }

        Self {
            genres,
            artists,
            artist_indices,
            genre_indices,
            vectors,
        }
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn artist_index(&self, artist: &str) -> Option<usize> {
        self.artist_indices.get(artist).copied()
    }

    /// Number of genres.
    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    pub fn vector(&self, genre: &str) -> Option<&[u8]> {
        self.genre_indices
            .get(genre)
            .map(|&idx| self.vectors[idx].as_slice())
    }

    /// Incidence value for a (genre, artist) pair, `None` if either is unknown.
    pub fn get(&self, genre: &str, artist: &str) -> Option<u8> {
        let artist_idx = self.artist_index(artist)?;
        self.vector(genre).map(|v| v[artist_idx])
    }

    /// Number of artists carrying the genre.
    pub fn artist_count_for(&self, genre: &str) -> usize {
        self.vector(genre)
            .map(|v| v.iter().filter(|&&x| x == 1).count())
            .unwrap_or(0)
    }

    /// Restricts the matrix to the given genres, in the given order.
    ///
    /// Unknown genres are skipped. The artist axis is kept as is.
    pub fn select<S: AsRef<str>>(&self, genres: &[S]) -> Self {
        let mut selected = Self {
            artists: self.artists.clone(),
            artist_indices: self.artist_indices.clone(),
            ..Self::default()
        };

        for genre in genres {
            let genre = genre.as_ref();
            if selected.genre_indices.contains_key(genre) {
                continue;
            }
            if let Some(vector) = self.vector(genre) {
                selected
                    .genre_indices
                    .insert(genre.to_string(), selected.genres.len());
                selected.genres.push(genre.to_string());
                selected.vectors.push(vector.to_vec());
            }
        }

        selected
    }

    /// Genres ordered by the number of artists carrying them, descending.
    /// Ties keep first-appearance order.
    pub fn genres_by_artist_count(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = self
            .genres
            .iter()
            .map(|g| (g.clone(), self.artist_count_for(g)))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Rows of the matrix as floats, one row per genre.
    pub fn matrix(&self) -> Vec<Vec<f64>> {
        self.vectors
            .iter()
            .map(|row| row.iter().map(|&x| f64::from(x)).collect())
            .collect()
    }
}
