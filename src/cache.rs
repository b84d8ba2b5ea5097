//! Session-scoped memoization of the loaded dataset.

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::record::Dataset;
use crate::source::DataSource;

/// Holds the dataset once it has been loaded and hands out shared handles.
///
/// The first [`DatasetCache::get`] loads from the source; later calls return
/// the same `Arc` until [`DatasetCache::invalidate`] drops it. A failed load
/// leaves the cache empty so the next call tries again.
pub struct DatasetCache<S> {
    source: S,
    dataset: Option<Arc<Dataset>>,
}

impl<S: DataSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            dataset: None,
        }
    }

    pub async fn get(&mut self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = &self.dataset {
            debug!("Dataset served from cache");
            return Ok(Arc::clone(dataset));
        }

        info!(source = %self.source.describe(), "Loading dataset");
        let dataset = Arc::new(self.source.load().await?);
        self.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn invalidate(&mut self) {
        if self.dataset.take().is_some() {
            info!("Dataset cache cleared");
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
