//! Cumulative vaccinations over time.

use crate::error::Result;
use crate::pipeline::types::VaccinationPoint;
use crate::record::{Dataset, columns};
use crate::selection::Selection;

/// Selected records that report `total_vaccinations`, ordered by location and
/// then date. Values pass through untouched.
#[tracing::instrument(skip(dataset, selection), fields(selected = selection.len()))]
pub fn vaccination_series(
    dataset: &Dataset,
    selection: &Selection,
) -> Result<Vec<VaccinationPoint>> {
    dataset.require(&[columns::LOCATION, columns::DATE, columns::TOTAL_VACCINATIONS])?;

    let mut points: Vec<VaccinationPoint> = selection
        .filter(dataset.records())
        .filter_map(|r| {
            r.total_vaccinations.map(|total| VaccinationPoint {
                location: r.location.clone(),
                date: r.date,
                total_vaccinations: total,
            })
        })
        .collect();

    points.sort_by(|a, b| a.location.cmp(&b.location).then(a.date.cmp(&b.date)));
    Ok(points)
}
