//! Error types for the dashboard library.

use thiserror::Error;

/// Failures raised while loading, transforming or rendering the dataset.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to fetch dataset from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn fetch(url: &str, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn render(message: impl ToString) -> Self {
        Self::Render(message.to_string())
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, DashboardError>;
