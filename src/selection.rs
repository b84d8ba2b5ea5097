//! The operator's choice of locations.

use std::collections::BTreeSet;

use crate::error::{DashboardError, Result};
use crate::record::Record;

/// Locations offered by the dashboard's multi-select.
pub const CANDIDATE_LOCATIONS: &[&str] = &["United States", "India", "Pakistan"];

/// A set of selected location names. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    locations: BTreeSet<String>,
}

impl Selection {
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    /// Every candidate location, the dashboard's default.
    pub fn all_candidates() -> Self {
        Self::new(CANDIDATE_LOCATIONS.iter().copied())
    }

    /// Builds a selection from names the operator typed, rejecting any that is
    /// not in `candidates`.
    pub fn from_names<S: AsRef<str>>(names: &[S], candidates: &[String]) -> Result<Self> {
        let mut locations = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if !candidates.iter().any(|c| c == name) {
                return Err(DashboardError::InvalidConfig(format!(
                    "unknown location '{}', expected one of: {}",
                    name,
                    candidates.join(", ")
                )));
            }
            locations.insert(name.to_string());
        }
        Ok(Self { locations })
    }

    pub fn contains(&self, location: &str) -> bool {
        self.locations.contains(location)
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(String::as_str)
    }

    /// Records whose location is selected, in input order.
    pub fn filter<'a>(&'a self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        records.iter().filter(move |r| self.contains(&r.location))
    }
}
