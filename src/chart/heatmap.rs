use std::path::Path;

use plotters::prelude::*;

use super::{FONT, ensure_parent, red_scale};
use crate::Res;

const CELL: u32 = 18;

/// Renders `values` (one row per y label, one column per x label) as a
/// red-scale heatmap. Cell intensity is relative to the matrix maximum.
pub fn heatmap(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    x_labels: &[String],
    y_labels: &[String],
    values: &[Vec<f64>],
) -> Res<()> {
    let (cols, rows) = (x_labels.len(), y_labels.len());
    if cols == 0 || rows == 0 {
        return Err("nothing to plot".into());
    }
    if values.len() != rows || values.iter().any(|row| row.len() != cols) {
        return Err(format!("heatmap values must be {} x {}", rows, cols).into());
    }
    ensure_parent(path)?;

    let max = values
        .iter()
        .flat_map(|row| row.iter().copied())
        .fold(0.0_f64, f64::max);

    let width = cols as u32 * CELL + 320;
    let height = rows as u32 * CELL + 260;
    let root = SVGBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .x_label_area_size(180)
        .y_label_area_size(240)
        .build_cartesian_2d(0i32..cols as i32, rows as i32..0i32)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(cols)
        .y_labels(rows)
        .x_label_offset(CELL as i32 / 2)
        .y_label_offset(CELL as i32 / 2)
        .x_label_formatter(&|x| label_at(x_labels, *x))
        .y_label_formatter(&|y| label_at(y_labels, *y))
        .x_label_style((FONT, 11).into_font().transform(FontTransform::Rotate90))
        .y_label_style((FONT, 11))
        .draw()?;

    chart.draw_series(values.iter().enumerate().flat_map(|(y, row)| {
        row.iter().enumerate().map(move |(x, &v)| {
            let (r, g, b) = red_scale(v, max);
            let (x, y) = (x as i32, y as i32);
            Rectangle::new([(x, y), (x + 1, y + 1)], RGBColor(r, g, b).filled())
        })
    }))?;

    root.present()?;
    Ok(())
}

fn label_at(labels: &[String], idx: i32) -> String {
    usize::try_from(idx)
        .ok()
        .and_then(|i| labels.get(i))
        .cloned()
        .unwrap_or_default()
}
