use clap::ValueEnum;
use tabled::Table;

use crate::{
    analysis::{MonthlyGenreCounts, monthly_track_counts},
    cli::library::load_records,
    info,
    types::{GenreCountRow, MonthCountRow, MonthGenreCountRow},
    utils, warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatsBy {
    /// Saved tracks per month
    #[default]
    Month,
    /// Records per genre
    Genre,
    /// Records per month and genre
    MonthGenre,
}

/// Prints aggregated counts of the cached library as a table.
///
/// `since`/`until` restrict the months (inclusive, `YYYY-MM`). `top` limits
/// the genres considered for the `genre` and `month-genre` views to the most
/// frequent ones.
pub async fn stats(by: StatsBy, top: Option<usize>, since: Option<String>, until: Option<String>) {
    let records = utils::filter_records_by_month(
        load_records().await,
        since.as_deref(),
        until.as_deref(),
    );

    if records.is_empty() {
        warning!("No records in the selected range.");
        return;
    }

    match by {
        StatsBy::Month => {
            let rows: Vec<MonthCountRow> = monthly_track_counts(&records)
                .into_iter()
                .map(|(month, tracks)| MonthCountRow { month, tracks })
                .collect();
            let total: u64 = rows.iter().map(|r| r.tracks).sum();
            println!("{}", Table::new(rows));
            info!("{} saved tracks", total);
        }
        StatsBy::Genre => {
            let counts = MonthlyGenreCounts::from_records(&records);
            let totals = counts.genre_totals();
            let genre_count = totals.len();
            let rows: Vec<GenreCountRow> = totals
                .into_iter()
                .take(top.unwrap_or(usize::MAX))
                .map(|(genre, count)| GenreCountRow { genre, count })
                .collect();
            println!("{}", Table::new(rows));
            info!("{} records across {} genres", counts.total(), genre_count);
        }
        StatsBy::MonthGenre => {
            let counts = MonthlyGenreCounts::from_records(&records);
            let top_genres: Vec<String> = counts
                .genre_totals()
                .into_iter()
                .take(top.unwrap_or(usize::MAX))
                .map(|(genre, _)| genre)
                .collect();

            let rows: Vec<MonthGenreCountRow> = counts
                .cells()
                .into_iter()
                .filter(|(_, genre, _)| top_genres.contains(genre))
                .map(|(month, genre, count)| MonthGenreCountRow {
                    month,
                    genre,
                    count,
                })
                .collect();
            println!("{}", Table::new(rows));
            info!(
                "{} records over {} months",
                counts.total(),
                counts.months().len()
            );
        }
    }
}
