use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::{
    Res,
    analysis::{GenreVectors, MonthlyGenreCounts, monthly_track_counts},
    chart,
    cli::library::load_records,
    error, success,
    types::TrackRecord,
    utils, warning,
};

const DEFAULT_TOP_MONTH_GENRES: usize = 20;
const DEFAULT_TOP_ARTIST_GENRES: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Bar chart of saved tracks per month
    Monthly,
    /// Heatmap of records per month and genre
    MonthGenre,
    /// Heatmap of which artists carry which genre
    GenreArtist,
}

impl ChartKind {
    fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Monthly => "monthly",
            ChartKind::MonthGenre => "month-genre",
            ChartKind::GenreArtist => "genre-artist",
        }
    }
}

/// Renders one chart of the cached library to SVG and optionally opens it.
pub async fn chart(
    kind: ChartKind,
    top: Option<usize>,
    since: Option<String>,
    until: Option<String>,
    output: Option<PathBuf>,
    open: bool,
) {
    let records = utils::filter_records_by_month(
        load_records().await,
        since.as_deref(),
        until.as_deref(),
    );

    if records.is_empty() {
        warning!("No records in the selected range.");
        return;
    }

    let path = utils::chart_output_path(output, kind.file_stem());
    let result = match kind {
        ChartKind::Monthly => render_monthly(&records, &path),
        ChartKind::MonthGenre => render_month_genre(&records, top, &path),
        ChartKind::GenreArtist => render_genre_artist(&records, top, &path),
    };

    if let Err(e) = result {
        error!("Failed to render chart: {}", e);
    }
    success!("Chart written to {}", path.display());

    if open {
        if let Err(e) = chart::open(&path) {
            warning!("Failed to open chart. Err: {}", e);
        }
    }
}

fn render_monthly(records: &[TrackRecord], path: &Path) -> Res<()> {
    let counts = monthly_track_counts(records);
    let labels: Vec<String> = counts.keys().cloned().collect();
    let values: Vec<u64> = counts.values().copied().collect();

    chart::bar(
        path,
        "Number of songs added to library each month",
        "Month",
        "Number of songs added",
        &labels,
        &values,
    )
}

fn render_month_genre(records: &[TrackRecord], top: Option<usize>, path: &Path) -> Res<()> {
    let counts = MonthlyGenreCounts::from_records(records);
    let months = counts.months();
    let genres: Vec<String> = counts
        .genre_totals()
        .into_iter()
        .take(top.unwrap_or(DEFAULT_TOP_MONTH_GENRES))
        .map(|(genre, _)| genre)
        .collect();

    chart::heatmap(
        path,
        "Songs added per month and genre",
        "Month",
        "Genre",
        &months,
        &genres,
        &counts.matrix(&months, &genres),
    )
}

fn render_genre_artist(records: &[TrackRecord], top: Option<usize>, path: &Path) -> Res<()> {
    let vectors = GenreVectors::from_records(records);
    let genres: Vec<String> = vectors
        .genres_by_artist_count()
        .into_iter()
        .take(top.unwrap_or(DEFAULT_TOP_ARTIST_GENRES))
        .map(|(genre, _)| genre)
        .collect();
    let selected = vectors.select(&genres);
    let matrix = selected.matrix();

    // one row per artist that carries at least one of the selected genres
    let mut artists: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, artist) in selected.artists().iter().enumerate() {
        let row: Vec<f64> = matrix.iter().map(|genre_row| genre_row[idx]).collect();
        if row.iter().any(|&v| v > 0.0) {
            artists.push(artist.clone());
            rows.push(row);
        }
    }

    chart::heatmap(
        path,
        "Genres per artist",
        "Genres",
        "Artists",
        selected.genres(),
        &artists,
        &rows,
    )
}
