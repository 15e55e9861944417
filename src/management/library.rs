use std::{
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

use crate::{config, types::TrackRecord};

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    CsvError(csv::Error),
    CriticalError(String),
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<csv::Error> for CacheError {
    fn from(err: csv::Error) -> Self {
        CacheError::CsvError(err)
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::IoError(e) => write!(f, "io error: {}", e),
            CacheError::CsvError(e) => write!(f, "csv error: {}", e),
            CacheError::CriticalError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// The flattened saved-track library, cached as CSV.
///
/// The cache always mirrors the last fetch: persisting replaces the file.
pub struct LibraryManager {
    records: Vec<TrackRecord>,
}

impl LibraryManager {
    pub fn new(records: Option<Vec<TrackRecord>>) -> Self {
        Self {
            records: records.unwrap_or_default(),
        }
    }

    pub async fn load() -> Result<Self, CacheError> {
        Self::load_from(&Self::cache_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, CacheError> {
        let content = async_fs::read_to_string(path).await?;
        let records = Self::parse(&content)?;
        Ok(Self { records })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        self.persist_to(&Self::cache_path()).await
    }

    pub async fn persist_to(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let csv = self.to_csv()?;
        async_fs::write(path, csv).await?;
        Ok(())
    }

    /// Parses CSV with a `date,name,artist,genre` header.
    pub fn parse(content: &str) -> Result<Vec<TrackRecord>, CacheError> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: TrackRecord = result?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn to_csv(&self) -> Result<String, CacheError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());

        if self.records.is_empty() {
            // serde only emits the header together with the first row
            writer.write_record(["date", "name", "artist", "genre"])?;
        }
        for record in &self.records {
            writer.serialize(record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CacheError::CriticalError(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CacheError::CriticalError(e.to_string()))
    }

    pub fn records(&self) -> &[TrackRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TrackRecord> {
        self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn cache_path() -> PathBuf {
        config::data_dir().join("cache/library.csv")
    }
}
