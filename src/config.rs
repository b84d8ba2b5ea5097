//! Static dashboard configuration.

use clap::ValueEnum;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};
use crate::pipeline::DEFAULT_WINDOW;
use crate::selection::CANDIDATE_LOCATIONS;
use crate::source::OWID_DATASET_URL;

pub const PAGE_TITLE: &str = "COVID-19 Dashboard";
pub const FOOTER: &str = "Data Source: Our World in Data (https://ourworldindata.org/covid-deaths)";

/// Page layout. Only affects chart dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
    #[default]
    Wide,
    Centered,
}

impl Layout {
    pub fn line_chart_size(self) -> (u32, u32) {
        match self {
            Layout::Wide => (1200, 500),
            Layout::Centered => (800, 400),
        }
    }

    pub fn bar_chart_size(self) -> (u32, u32) {
        match self {
            Layout::Wide => (800, 400),
            Layout::Centered => (640, 360),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub page_title: String,
    pub layout: Layout,
    /// URL or local path of the dataset CSV.
    pub source: String,
    pub window: usize,
    pub candidates: Vec<String>,
    pub output_dir: PathBuf,
    pub footer: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_title: PAGE_TITLE.to_string(),
            layout: Layout::default(),
            source: OWID_DATASET_URL.to_string(),
            window: DEFAULT_WINDOW,
            candidates: CANDIDATE_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("dashboard"),
            footer: FOOTER.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `COVID_DATA_URL` and `DASHBOARD_OUTPUT_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(source) = std::env::var("COVID_DATA_URL") {
            config.source = source;
        }
        if let Ok(dir) = std::env::var("DASHBOARD_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(DashboardError::InvalidConfig(
                "smoothing window must be at least 1".to_string(),
            ));
        }
        if self.source.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "dataset source must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
