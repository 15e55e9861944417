use std::path::Path;

use plotters::prelude::*;

use super::{FONT, ensure_parent};
use crate::Res;

/// Renders a vertical bar chart with one bar per label.
pub fn bar(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    labels: &[String],
    values: &[u64],
) -> Res<()> {
    if labels.is_empty() || labels.len() != values.len() {
        return Err(format!(
            "cannot plot {} labels against {} values",
            labels.len(),
            values.len()
        )
        .into());
    }
    ensure_parent(path)?;

    let width = (labels.len() as u32 * 24 + 160).max(800);
    let root = SVGBackend::new(path, (width, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let max = values.iter().copied().max().unwrap_or(0).max(1);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0u64..max + max / 10 + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(labels.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RED.mix(0.8).filled())
            .margin(2)
            .data(values.iter().enumerate().map(|(i, &v)| (i, v))),
    )?;

    root.present()?;
    Ok(())
}
