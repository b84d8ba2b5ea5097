//! Raw per-location daily records and the loaded dataset.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::error::{DashboardError, Result};

/// A single (location, date) row of the OWID COVID-19 dataset.
///
/// Only the columns the dashboard reads are kept; every other column of the
/// source CSV is ignored. Numeric and string cells that are empty in the CSV
/// deserialize to `None`, as do columns missing from the header entirely.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub location: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub new_cases: Option<f64>,
    #[serde(default)]
    pub total_cases: Option<f64>,
    #[serde(default)]
    pub population: Option<f64>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub total_vaccinations: Option<f64>,
}

impl Record {
    /// Builds a record with only the key fields set.
    pub fn new(location: &str, date: NaiveDate) -> Self {
        Record {
            location: location.to_string(),
            date,
            new_cases: None,
            total_cases: None,
            population: None,
            continent: None,
            total_vaccinations: None,
        }
    }

    pub fn with_new_cases(mut self, value: f64) -> Self {
        self.new_cases = Some(value);
        self
    }

    pub fn with_total_cases(mut self, value: f64) -> Self {
        self.total_cases = Some(value);
        self
    }

    pub fn with_population(mut self, value: f64) -> Self {
        self.population = Some(value);
        self
    }

    pub fn with_continent(mut self, value: &str) -> Self {
        self.continent = Some(value.to_string());
        self
    }

    pub fn with_total_vaccinations(mut self, value: f64) -> Self {
        self.total_vaccinations = Some(value);
        self
    }
}

/// Column names the pipeline knows how to read.
pub mod columns {
    pub const LOCATION: &str = "location";
    pub const DATE: &str = "date";
    pub const NEW_CASES: &str = "new_cases";
    pub const TOTAL_CASES: &str = "total_cases";
    pub const POPULATION: &str = "population";
    pub const CONTINENT: &str = "continent";
    pub const TOTAL_VACCINATIONS: &str = "total_vaccinations";

    pub const ALL: &[&str] = &[
        LOCATION,
        DATE,
        NEW_CASES,
        TOTAL_CASES,
        POPULATION,
        CONTINENT,
        TOTAL_VACCINATIONS,
    ];
}

/// The full record set plus the header it was parsed from.
///
/// Immutable once built; transforms only read from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    columns: BTreeSet<String>,
}

impl Dataset {
    pub fn new<I, S>(records: Vec<Record>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a dataset whose header contains every known column.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(records, columns::ALL.iter().copied())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Fails with [`DashboardError::MissingColumn`] for the first absent column.
    pub fn require(&self, names: &[&str]) -> Result<()> {
        match names.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(DashboardError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Distinct locations with their row counts, in ascending order.
    pub fn locations(&self) -> Vec<(String, usize)> {
        let mut counts: std::collections::BTreeMap<&str, usize> = Default::default();
        for record in &self.records {
            *counts.entry(record.location.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(location, rows)| (location.to_string(), rows))
            .collect()
    }
}
