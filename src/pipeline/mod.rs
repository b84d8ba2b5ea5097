//! Aggregation pipeline: raw records in, three chart-ready views out.
//!
//! Every transform is a pure function of the dataset and the selection and
//! fails with [`crate::DashboardError::MissingColumn`] when a column it reads
//! is absent from the dataset header.

pub mod smoothing;
pub mod snapshot;
pub mod types;
pub mod utility;
pub mod vaccination;

pub use smoothing::{DEFAULT_WINDOW, smoothed_new_cases};
pub use snapshot::latest_cases_per_100k;
pub use types::{CasesPer100k, DashboardViews, SmoothedPoint, VaccinationPoint};
pub use vaccination::vaccination_series;

use tracing::info;

use crate::error::Result;
use crate::record::Dataset;
use crate::selection::Selection;

/// Runs all three transforms for `selection`.
pub fn compute_views(
    dataset: &Dataset,
    selection: &Selection,
    window: usize,
) -> Result<DashboardViews> {
    let views = DashboardViews {
        new_cases_smoothed: smoothed_new_cases(dataset, selection, window)?,
        cases_per_100k: latest_cases_per_100k(dataset, selection)?,
        total_vaccinations: vaccination_series(dataset, selection)?,
    };

    info!(
        smoothed_points = views.new_cases_smoothed.len(),
        snapshot_rows = views.cases_per_100k.len(),
        vaccination_points = views.total_vaccinations.len(),
        "Views computed"
    );

    Ok(views)
}
