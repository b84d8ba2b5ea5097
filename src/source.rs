//! Where the raw dataset comes from: a URL or a local CSV file.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use crate::error::Result;
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::parser::parse_dataset;
use crate::record::Dataset;

/// Default public location of the OWID COVID-19 dataset.
pub const OWID_DATASET_URL: &str = "https://covid.ourworldindata.org/data/owid-covid-data.csv";

/// Produces the full record set. Called at most once per cache fill.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load(&self) -> Result<Dataset>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Downloads the CSV over HTTP.
pub struct HttpSource<C = BasicClient> {
    client: C,
    url: String,
}

impl HttpSource<BasicClient> {
    pub fn new(url: &str) -> Self {
        Self::with_client(BasicClient::new(), url)
    }
}

impl<C: HttpClient> HttpSource<C> {
    pub fn with_client(client: C, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> DataSource for HttpSource<C> {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn load(&self) -> Result<Dataset> {
        let bytes = fetch_bytes(&self.client, &self.url).await?;
        let dataset = parse_dataset(&bytes)?;
        info!(rows = dataset.len(), "Dataset loaded from network");
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the CSV from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Dataset> {
        let bytes = tokio::fs::read(&self.path).await?;
        let dataset = parse_dataset(&bytes)?;
        info!(rows = dataset.len(), "Dataset loaded from file");
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
pub fn source_for(location: &str) -> Box<dyn DataSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

#[async_trait]
impl DataSource for Box<dyn DataSource> {
    async fn load(&self) -> Result<Dataset> {
        (**self).load().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
