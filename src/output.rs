//! Output formatting and persistence for the derived views.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::pipeline::{CasesPer100k, DashboardViews};
use csv::WriterBuilder;

/// Logs the views using Rust's debug pretty-print format.
pub fn print_pretty(views: &DashboardViews) {
    debug!("{:#?}", views);
}

/// Renders the views as pretty-printed JSON.
pub fn to_json(views: &DashboardViews) -> Result<String> {
    Ok(serde_json::to_string_pretty(views)?)
}

/// Logs one line per location of the cases-per-100k snapshot.
pub fn log_snapshot(rows: &[CasesPer100k]) {
    if rows.is_empty() {
        info!("No location in the selection has a complete latest record");
    }
    for row in rows {
        info!(
            location = %row.location,
            date = %row.date,
            cases_per_100k = format!("{:.2}", row.cases_per_100k),
            "Cases per 100k"
        );
    }
}

/// Writes `rows` to a CSV file with a header, replacing any existing file.
///
/// Undefined values are written as empty cells.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Exports every view as CSV into `dir`. Returns the written paths.
#[tracing::instrument(skip(views), fields(dir = %dir.display()))]
pub fn export_views(views: &DashboardViews, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let smoothed = dir.join("new_cases_7d.csv");
    write_csv(&smoothed, &views.new_cases_smoothed)?;
    let snapshot = dir.join("cases_per_100k.csv");
    write_csv(&snapshot, &views.cases_per_100k)?;
    let vaccinations = dir.join("total_vaccinations.csv");
    write_csv(&vaccinations, &views.total_vaccinations)?;

    Ok(vec![smoothed, snapshot, vaccinations])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SmoothedPoint;
    use chrono::NaiveDate;
    use std::fs;

    fn views() -> DashboardViews {
        let date = NaiveDate::from_ymd_opt(2021, 1, 7).unwrap();
        DashboardViews {
            new_cases_smoothed: vec![
                SmoothedPoint {
                    location: "India".to_string(),
                    date,
                    value: None,
                },
                SmoothedPoint {
                    location: "India".to_string(),
                    date: date.succ_opt().unwrap(),
                    value: Some(4.0),
                },
            ],
            cases_per_100k: vec![CasesPer100k {
                location: "India".to_string(),
                date,
                cases_per_100k: 0.5,
            }],
            total_vaccinations: vec![],
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&DashboardViews::default());
    }

    #[test]
    fn test_to_json_contains_views() {
        let json = to_json(&views()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["new_cases_smoothed"][0]["value"], serde_json::Value::Null);
        assert_eq!(value["new_cases_smoothed"][1]["value"], 4.0);
        assert_eq!(value["cases_per_100k"][0]["date"], "2021-01-07");
    }

    #[test]
    fn test_export_views_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();

        let written = export_views(&views(), dir.path()).unwrap();

        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|p| p.exists()));

        let smoothed = fs::read_to_string(dir.path().join("new_cases_7d.csv")).unwrap();
        let lines: Vec<_> = smoothed.lines().collect();
        assert_eq!(lines[0], "location,date,value");
        assert_eq!(lines[1], "India,2021-01-07,");
        assert_eq!(lines[2], "India,2021-01-08,4.0");
    }

    #[test]
    fn test_write_csv_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.csv");
        let rows = views().cases_per_100k;

        write_csv(&path, &rows).unwrap();
        write_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("location")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 2);
    }
}
