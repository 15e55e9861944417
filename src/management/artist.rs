use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{config, types::Artist};

/// Cache of artist metadata keyed by Spotify artist id.
pub struct ArtistManager {
    artists: HashMap<String, Artist>,
}

impl ArtistManager {
    pub fn new(artists: Option<Vec<Artist>>) -> Self {
        let mut manager = Self {
            artists: HashMap::new(),
        };
        manager.add_artists(artists.unwrap_or_default());
        manager
    }

    pub async fn load() -> Result<Self, String> {
        Self::load_from(&Self::cache_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        let artists: Vec<Artist> = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(Some(artists)))
    }

    pub async fn persist(&self) -> Result<(), String> {
        self.persist_to(&Self::cache_path()).await
    }

    pub async fn persist_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let mut artists: Vec<&Artist> = self.artists.values().collect();
        artists.sort_by(|a, b| a.id.cmp(&b.id));

        let json = serde_json::to_string_pretty(&artists).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Inserts or replaces artists by id.
    pub fn add_artists(&mut self, artists: Vec<Artist>) -> &mut Self {
        for artist in artists {
            self.artists.insert(artist.id.clone(), artist);
        }
        self
    }

    pub fn get(&self, artist_id: &str) -> Option<&Artist> {
        self.artists.get(artist_id)
    }

    /// Ids from `ids` that are not cached yet, deduplicated, in input order.
    pub fn missing_ids<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut missing: Vec<String> = Vec::new();
        for id in ids {
            if !self.artists.contains_key(id) && !missing.iter().any(|m| m == id) {
                missing.push(id.to_string());
            }
        }
        missing
    }

    pub fn count(&self) -> usize {
        self.artists.len()
    }

    pub fn as_map(&self) -> &HashMap<String, Artist> {
        &self.artists
    }

    pub fn cache_path() -> PathBuf {
        config::data_dir().join("cache/artists.json")
    }
}
