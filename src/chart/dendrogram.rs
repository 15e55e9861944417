use std::path::Path;

use plotters::prelude::*;

use super::{FONT, ensure_parent};
use crate::{Res, analysis::Dendrogram};

/// Renders a horizontal dendrogram: leaves on the vertical axis labelled
/// with `labels` (indexed by leaf id), merge distance on the horizontal axis.
pub fn dendrogram(path: &Path, title: &str, labels: &[String], tree: &Dendrogram) -> Res<()> {
    let n = tree.leaves();
    if n == 0 {
        return Err("nothing to plot".into());
    }
    if labels.len() != n {
        return Err(format!("expected {} leaf labels, got {}", n, labels.len()).into());
    }
    ensure_parent(path)?;

    let order = tree.leaf_order();
    let positions = tree.node_positions();
    let max_x = if tree.height() > 0.0 {
        tree.height() * 1.05
    } else {
        1.0
    };

    let height = (n as u32 * 18 + 160).max(400);
    let root = SVGBackend::new(path, (1200, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(260)
        .build_cartesian_2d(0.0..max_x, -0.5..(n as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Euclidean distance")
        .y_labels(n)
        .y_label_formatter(&|y| {
            let idx = y.round();
            if (y - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            order
                .get(idx as usize)
                .and_then(|&leaf| labels.get(leaf))
                .cloned()
                .unwrap_or_default()
        })
        .y_label_style((FONT, 11))
        .draw()?;

    chart.draw_series(tree.merges().iter().enumerate().map(|(k, merge)| {
        let (left_pos, left_h) = positions[merge.left];
        let (right_pos, right_h) = positions[merge.right];
        let (_, h) = positions[n + k];
        PathElement::new(
            vec![
                (left_h, left_pos),
                (h, left_pos),
                (h, right_pos),
                (right_h, right_pos),
            ],
            BLUE.stroke_width(1),
        )
    }))?;

    root.present()?;
    Ok(())
}
