//! Chart specs and their drawing.

pub mod chart;
pub mod plot;

pub use chart::{ChartData, ChartSpec, cases_per_100k_chart, new_cases_chart, vaccinations_chart};
pub use plot::PngRenderer;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pipeline::DashboardViews;

/// Draws one chart to a file.
pub trait ChartRenderer {
    fn draw(&self, spec: &ChartSpec, path: &Path) -> Result<()>;

    /// File extension of the produced images.
    fn extension(&self) -> &'static str;
}

/// The three dashboard charts, in display order. `window` is the averaging
/// window the new-cases view was computed with.
pub fn chart_specs(views: &DashboardViews, window: usize) -> [ChartSpec; 3] {
    [
        new_cases_chart(&views.new_cases_smoothed, window),
        cases_per_100k_chart(&views.cases_per_100k),
        vaccinations_chart(&views.total_vaccinations),
    ]
}

/// Draws every chart of `views` into `dir`, creating it if needed.
///
/// Empty views are drawn as empty charts. Returns the written paths in display
/// order.
#[tracing::instrument(skip(renderer, views), fields(dir = %dir.display()))]
pub fn render_views<R: ChartRenderer + ?Sized>(
    renderer: &R,
    views: &DashboardViews,
    window: usize,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for spec in chart_specs(views, window) {
        let path = dir.join(format!("{}.{}", spec.name, renderer.extension()));
        renderer.draw(&spec, &path)?;
        written.push(path);
    }
    Ok(written)
}
