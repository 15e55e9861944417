use std::path::PathBuf;

use tabled::Table;

use crate::{
    analysis::{GenreVectors, Linkage, linkage},
    chart,
    cli::library::load_records,
    error, info, success,
    types::ClusterTableRow,
    utils, warning,
};

/// Clusters the most common genres by the artists they share and renders the
/// dendrogram.
///
/// `top` keeps the genres carried by the most artists; `clusters` also prints
/// a flat cut of the tree into that many groups.
pub async fn cluster(
    method: Linkage,
    top: usize,
    clusters: Option<usize>,
    output: Option<PathBuf>,
    open: bool,
) {
    let records = load_records().await;

    let vectors = GenreVectors::from_records(&records);
    let genres: Vec<String> = vectors
        .genres_by_artist_count()
        .into_iter()
        .take(top)
        .map(|(genre, _)| genre)
        .collect();
    let selected = vectors.select(&genres);

    if selected.len() < 2 {
        warning!(
            "Need at least two genres to cluster, found {}.",
            selected.len()
        );
        return;
    }

    let tree = linkage(&selected.matrix(), method);
    info!(
        "Clustered {} genres over {} artists using {} linkage (height {:.3}).",
        selected.len(),
        selected.artist_count(),
        method,
        tree.height()
    );

    let path = utils::chart_output_path(output, &format!("dendrogram-{}", method));
    let title = format!("Genre clustering ({} linkage)", method);
    if let Err(e) = chart::dendrogram(&path, &title, selected.genres(), &tree) {
        error!("Failed to render dendrogram: {}", e);
    }
    success!("Dendrogram written to {}", path.display());

    if let Some(k) = clusters {
        let labels = tree.cut(k);
        let cluster_count = labels.iter().copied().max().map_or(0, |m| m + 1);
        let rows: Vec<ClusterTableRow> = (0..cluster_count)
            .map(|c| ClusterTableRow {
                cluster: c + 1,
                genres: selected
                    .genres()
                    .iter()
                    .zip(&labels)
                    .filter(|(_, l)| **l == c)
                    .map(|(g, _)| g.as_str())
                    .collect::<Vec<&str>>()
                    .join(", "),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if open {
        if let Err(e) = chart::open(&path) {
            warning!("Failed to open dendrogram. Err: {}", e);
        }
    }
}
