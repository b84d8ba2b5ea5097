//! Trailing average of daily new cases per location.

use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::pipeline::types::SmoothedPoint;
use crate::pipeline::utility::rolling_mean;
use crate::record::{Dataset, Record, columns};
use crate::selection::Selection;

/// Window length of the dashboard's "7-day average".
pub const DEFAULT_WINDOW: usize = 7;

/// Groups the selected records by location, sorts each group by date and
/// averages `new_cases` over the trailing `window` records.
///
/// Date gaps are not filled in: the window spans consecutive records. Output is
/// ordered by location, then date.
#[tracing::instrument(skip(dataset, selection), fields(selected = selection.len()))]
pub fn smoothed_new_cases(
    dataset: &Dataset,
    selection: &Selection,
    window: usize,
) -> Result<Vec<SmoothedPoint>> {
    dataset.require(&[columns::LOCATION, columns::DATE, columns::NEW_CASES])?;
    if window == 0 {
        return Err(DashboardError::InvalidConfig(
            "smoothing window must be at least 1".to_string(),
        ));
    }

    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for record in selection.filter(dataset.records()) {
        groups.entry(record.location.as_str()).or_default().push(record);
    }

    let mut points = Vec::new();
    for (location, mut rows) in groups {
        rows.sort_by_key(|r| r.date);

        let values: Vec<Option<f64>> = rows.iter().map(|r| r.new_cases).collect();
        let averaged = rolling_mean(&values, window);
        debug!(
            location,
            rows = rows.len(),
            defined = averaged.iter().filter(|v| v.is_some()).count(),
            "Smoothed location"
        );

        points.extend(rows.iter().zip(averaged).map(|(r, value)| SmoothedPoint {
            location: location.to_string(),
            date: r.date,
            value,
        }));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn series(location: &str, values: &[Option<f64>]) -> Vec<Record> {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut r = Record::new(location, start + Days::new(i as u64));
                r.new_cases = *v;
                r
            })
            .collect()
    }

    fn counting(n: usize) -> Vec<Option<f64>> {
        (1..=n).map(|v| Some(v as f64)).collect()
    }

    #[test]
    fn test_ten_days_gives_four_defined_points() {
        let dataset = Dataset::from_records(series("United States", &counting(10)));
        let selection = Selection::new(["United States"]);

        let points = smoothed_new_cases(&dataset, &selection, DEFAULT_WINDOW).unwrap();

        assert_eq!(points.len(), 10);
        let defined: Vec<f64> = points.iter().filter_map(|p| p.value).collect();
        assert_eq!(defined, vec![4.0, 5.0, 6.0, 7.0]);
        assert!(points[..6].iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_sorts_by_date_within_location() {
        let mut records = series("India", &counting(7));
        records.reverse();
        let dataset = Dataset::from_records(records);

        let points = smoothed_new_cases(&dataset, &Selection::new(["India"]), 7).unwrap();

        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(points[6].value, Some(4.0));
    }

    #[test]
    fn test_window_spans_calendar_gaps() {
        // six January days, then nothing until March
        let mut records = series("Pakistan", &counting(6));
        let mut march = Record::new("Pakistan", NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        march.new_cases = Some(7.0);
        records.push(march);
        let dataset = Dataset::from_records(records);

        let points = smoothed_new_cases(&dataset, &Selection::new(["Pakistan"]), 7).unwrap();

        assert_eq!(points.len(), 7);
        assert_eq!(points[6].date, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert_eq!(points[6].value, Some(4.0));
        assert!(points[..6].iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_locations_are_independent() {
        let mut records = series("India", &counting(7));
        records.extend(series("Pakistan", &counting(3)));
        let dataset = Dataset::from_records(records);

        let points =
            smoothed_new_cases(&dataset, &Selection::new(["India", "Pakistan"]), 7).unwrap();

        let india: Vec<_> = points.iter().filter(|p| p.location == "India").collect();
        let pakistan: Vec<_> = points.iter().filter(|p| p.location == "Pakistan").collect();
        assert_eq!(india.last().unwrap().value, Some(4.0));
        assert_eq!(pakistan.len(), 3);
        assert!(pakistan.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_unselected_locations_are_dropped() {
        let dataset = Dataset::from_records(series("France", &counting(8)));
        let points = smoothed_new_cases(&dataset, &Selection::all_candidates(), 7).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let dataset = Dataset::new(series("India", &counting(8)), ["location", "date"]);
        let err = smoothed_new_cases(&dataset, &Selection::new(["India"]), 7).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(c) if c == "new_cases"));
    }

    #[test]
    fn test_zero_window_rejected() {
        let dataset = Dataset::from_records(series("India", &counting(8)));
        let err = smoothed_new_cases(&dataset, &Selection::new(["India"]), 0).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
    }
}
