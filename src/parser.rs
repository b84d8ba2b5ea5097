//! CSV parser for the OWID COVID-19 dataset.

use tracing::debug;

use crate::error::Result;
use crate::record::{Dataset, Record, columns};

/// Decodes CSV bytes into a [`Dataset`].
///
/// The header must carry `location` and `date`; every other known column is
/// optional and read as `None` when absent. Unknown columns are ignored.
///
/// # Errors
///
/// Returns [`crate::DashboardError::MissingColumn`] if a key column is absent,
/// or a CSV error if a row cannot be decoded (e.g. a malformed date).
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let dataset_columns = Dataset::new(Vec::new(), header.iter().cloned());
    dataset_columns.require(&[columns::LOCATION, columns::DATE])?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: Record = result?;
        records.push(record);
    }

    debug!(
        rows = records.len(),
        columns = header.len(),
        "Dataset parsed"
    );

    Ok(Dataset::new(records, header))
}
