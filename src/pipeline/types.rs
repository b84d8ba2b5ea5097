//! Chart-ready views produced by the pipeline.

use chrono::NaiveDate;
use serde::Serialize;

/// One position of a location's trailing-average series.
///
/// `value` is `None` until the window is full, or when any value inside the
/// window is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedPoint {
    pub location: String,
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Latest total cases normalised to 100,000 people.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasesPer100k {
    pub location: String,
    pub date: NaiveDate,
    pub cases_per_100k: f64,
}

/// A reported cumulative vaccination count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaccinationPoint {
    pub location: String,
    pub date: NaiveDate,
    pub total_vaccinations: f64,
}

/// The three derived views for one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardViews {
    pub new_cases_smoothed: Vec<SmoothedPoint>,
    pub cases_per_100k: Vec<CasesPer100k>,
    pub total_vaccinations: Vec<VaccinationPoint>,
}

impl DashboardViews {
    pub fn is_empty(&self) -> bool {
        self.new_cases_smoothed.is_empty()
            && self.cases_per_100k.is_empty()
            && self.total_vaccinations.is_empty()
    }
}
