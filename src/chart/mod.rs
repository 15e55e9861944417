//! # Chart Module
//!
//! Renders the analysis results as SVG files with `plotters`:
//!
//! - [`bar`] - vertical bar chart, used for saved tracks per month
//! - [`heatmap`] - red-scale matrix, used for month × genre counts and the
//!   genre × artist incidence matrix
//! - [`dendrogram`] - horizontal tree of a genre clustering
//!
//! [`open`] hands a rendered file to the system browser, which gives the
//! zoomable, scrollable view of the chart.

use std::{fs, path::Path};

use reqwest::Url;

use crate::Res;

mod bar;
mod dendrogram;
mod heatmap;

pub use bar::bar;
pub use dendrogram::dendrogram;
pub use heatmap::heatmap;

const FONT: &str = "sans-serif";

fn ensure_parent(path: &Path) -> Res<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Opens a rendered chart in the default browser.
pub fn open(path: &Path) -> Res<()> {
    let absolute = fs::canonicalize(path)?;
    let url = Url::from_file_path(&absolute)
        .map_err(|_| format!("cannot build file URL for {}", absolute.display()))?;
    webbrowser::open(url.as_str())?;
    Ok(())
}

/// Maps `value / max` onto white → red.
pub fn red_scale(value: f64, max: f64) -> (u8, u8, u8) {
    let t = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let fade = (255.0 * (1.0 - t)).round() as u8;
    (255, fade, fade)
}
