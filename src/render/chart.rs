//! Labeled chart descriptions built from the pipeline's views.
//!
//! A [`ChartSpec`] is everything a renderer needs: a title, axis labels and
//! the series to draw. Building one involves no drawing backend.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::pipeline::{CasesPer100k, SmoothedPoint, VaccinationPoint};

/// One line of a time-series chart.
///
/// Undefined values break the line, so a series is stored as the contiguous
/// runs of defined points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub segments: Vec<Vec<(NaiveDate, f64)>>,
}

impl LineSeries {
    pub fn points(&self) -> impl Iterator<Item = &(NaiveDate, f64)> {
        self.segments.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Lines(Vec<LineSeries>),
    Bars(Vec<Bar>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// File stem used when the chart is written to disk.
    pub name: &'static str,
    pub heading: String,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: String,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Lines(lines) => lines.iter().all(|l| l.points().next().is_none()),
            ChartData::Bars(bars) => bars.is_empty(),
        }
    }

    /// Date range covered by all line points, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let ChartData::Lines(lines) = &self.data else {
            return None;
        };
        let dates = lines.iter().flat_map(|l| l.points().map(|(d, _)| *d));
        dates.fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }

    /// Largest y value in the chart, or 0.0 when empty.
    pub fn max_value(&self) -> f64 {
        match &self.data {
            ChartData::Lines(lines) => lines
                .iter()
                .flat_map(|l| l.points().map(|(_, v)| *v))
                .fold(0.0, f64::max),
            ChartData::Bars(bars) => bars.iter().map(|b| b.value).fold(0.0, f64::max),
        }
    }
}

/// Splits `(location, date, value)` rows into one line per location.
fn lines_by_location<'a, I>(rows: I) -> Vec<LineSeries>
where
    I: IntoIterator<Item = (&'a str, NaiveDate, Option<f64>)>,
{
    let mut by_location: BTreeMap<&str, Vec<Vec<(NaiveDate, f64)>>> = BTreeMap::new();
    let mut open: BTreeMap<&str, bool> = BTreeMap::new();

    for (location, date, value) in rows {
        let segments = by_location.entry(location).or_default();
        let extending = open.entry(location).or_insert(false);
        match value {
            Some(v) => {
                if !*extending {
                    segments.push(Vec::new());
                    *extending = true;
                }
                if let Some(segment) = segments.last_mut() {
                    segment.push((date, v));
                }
            }
            None => *extending = false,
        }
    }

    by_location
        .into_iter()
        .map(|(label, segments)| LineSeries {
            label: label.to_string(),
            segments,
        })
        .collect()
}

/// Smoothed new cases; the heading and y label name the averaging `window`.
pub fn new_cases_chart(points: &[SmoothedPoint], window: usize) -> ChartSpec {
    ChartSpec {
        name: "new_cases_7d",
        heading: format!("Daily New Cases ({window}-Day Avg)"),
        title: "Smoothed Daily New COVID-19 Cases",
        x_label: "Date",
        y_label: format!("New Cases ({window}-day avg)"),
        data: ChartData::Lines(lines_by_location(
            points.iter().map(|p| (p.location.as_str(), p.date, p.value)),
        )),
    }
}

pub fn cases_per_100k_chart(rows: &[CasesPer100k]) -> ChartSpec {
    ChartSpec {
        name: "cases_per_100k",
        heading: "Total Cases per 100,000 People".to_string(),
        title: "Cases per 100k People",
        x_label: "Location",
        y_label: "Cases per 100k".to_string(),
        data: ChartData::Bars(
            rows.iter()
                .map(|r| Bar {
                    label: r.location.clone(),
                    value: r.cases_per_100k,
                })
                .collect(),
        ),
    }
}

pub fn vaccinations_chart(points: &[VaccinationPoint]) -> ChartSpec {
    ChartSpec {
        name: "total_vaccinations",
        heading: "Total Vaccinations Over Time".to_string(),
        title: "Total COVID-19 Vaccinations",
        x_label: "Date",
        y_label: "Vaccinations".to_string(),
        data: ChartData::Lines(lines_by_location(points.iter().map(|p| {
            (p.location.as_str(), p.date, Some(p.total_vaccinations))
        }))),
    }
}
