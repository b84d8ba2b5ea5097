//! HTTP download of the raw dataset.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use tracing::debug;

use crate::error::{DashboardError, Result};

/// Downloads `url` and returns the response body.
///
/// A transport failure or a non-success status is reported as
/// [`DashboardError::Fetch`]; nothing is retried.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let parsed: reqwest::Url = url
        .parse()
        .map_err(|e| DashboardError::fetch(url, format!("invalid URL: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| DashboardError::fetch(url, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(DashboardError::fetch(url, format!("HTTP status {status}")));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| DashboardError::fetch(url, e))?;
    debug!(url, bytes = bytes.len(), "Dataset downloaded");

    Ok(bytes.to_vec())
}
