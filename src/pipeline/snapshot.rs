//! Latest cases per 100,000 people for each location.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::pipeline::types::CasesPer100k;
use crate::record::{Dataset, Record, columns};
use crate::selection::Selection;

const PER_100K: f64 = 100_000.0;

/// The most recent record of every location in `records`.
///
/// Among records sharing the latest date, the one seen last wins; this mirrors
/// a stable sort by date followed by taking the last row of each group.
pub fn latest_per_location(records: &[Record]) -> BTreeMap<&str, &Record> {
    let mut latest: BTreeMap<&str, &Record> = BTreeMap::new();
    for record in records {
        latest
            .entry(record.location.as_str())
            .and_modify(|current| {
                if record.date >= current.date {
                    *current = record;
                }
            })
            .or_insert(record);
    }
    latest
}

/// `total_cases / population * 100000`, or `None` when either is missing or
/// the population is not positive.
pub fn per_100k(total_cases: Option<f64>, population: Option<f64>) -> Option<f64> {
    match (total_cases, population) {
        (Some(cases), Some(population)) if population > 0.0 => {
            Some(cases / population * PER_100K)
        }
        _ => None,
    }
}

/// Takes each location's latest record over the whole dataset, drops those
/// lacking total cases, population or continent, then keeps the selected ones.
///
/// Selected locations without a qualifying latest record are silently absent.
#[tracing::instrument(skip(dataset, selection), fields(selected = selection.len()))]
pub fn latest_cases_per_100k(
    dataset: &Dataset,
    selection: &Selection,
) -> Result<Vec<CasesPer100k>> {
    dataset.require(&[
        columns::LOCATION,
        columns::DATE,
        columns::TOTAL_CASES,
        columns::POPULATION,
        columns::CONTINENT,
    ])?;

    let snapshot = latest_per_location(dataset.records())
        .into_iter()
        .filter(|(_, record)| record.continent.is_some())
        .filter_map(|(location, record)| {
            per_100k(record.total_cases, record.population).map(|value| CasesPer100k {
                location: location.to_string(),
                date: record.date,
                cases_per_100k: value,
            })
        })
        .filter(|row| selection.contains(&row.location))
        .collect();

    Ok(snapshot)
}
