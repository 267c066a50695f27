//! Storing the analysis summary in an S3-compatible bucket.

use nowcast_common::types::AnalysisSummary;
use nowcast_common::{NowcastError, Result};
use nowcast_config::StorageConfig;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::ObjectStore;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

/// Writes each run's summary to one fixed key; the last write wins.
#[derive(Clone)]
pub struct Archiver {
    store: Arc<dyn ObjectStore>,
    key: Path,
}

impl fmt::Debug for Archiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archiver")
            .field("store", &self.store.to_string())
            .field("key", &self.key.as_ref())
            .finish()
    }
}

impl Archiver {
    /// Creates an archiver over any object store.
    pub fn new(store: Arc<dyn ObjectStore>, key: &str) -> Result<Self> {
        let key = Path::parse(key)
            .map_err(|e| NowcastError::archive_with_source(format!("invalid archive key '{}'", key), e))?;
        Ok(Self { store, key })
    }

    /// Creates an archiver for the configured bucket.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        let store = builder.build()?;
        Self::new(Arc::new(store), &config.archive_key)
    }

    /// Object key the summary is written to.
    pub fn key(&self) -> &Path {
        &self.key
    }

    /// Serialize the summary as JSON and overwrite the object.
    #[instrument(skip_all, fields(key = %self.key))]
    pub async fn archive(&self, summary: &AnalysisSummary) -> Result<()> {
        let payload = serde_json::to_vec(summary)?;
        let size = payload.len();
        self.store.put(&self.key, payload.into()).await?;
        info!(bytes = size, hour = %summary.hour, "Archived analysis summary");
        Ok(())
    }
}
