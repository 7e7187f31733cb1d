use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info};

use crate::domain::MovieRecord;
use crate::error::IngestError;
use crate::port::{BlobStore, public_url};

pub const POSTER_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct PosterConfig {
    pub bucket: String,
    /// Domain used in derived poster URLs, e.g. `s3.amazonaws.com`.
    pub public_domain: String,
}

/// Copies a movie's poster from its source URL into the poster bucket.
#[derive(Clone)]
pub struct PosterPersister {
    http: Client,
    blobs: Arc<dyn BlobStore>,
    config: PosterConfig,
}

impl PosterPersister {
    #[must_use]
    pub fn new(http: Client, blobs: Arc<dyn BlobStore>, config: PosterConfig) -> Self {
        Self {
            http,
            blobs,
            config,
        }
    }

    /// Download the poster and upload it as `"{title}.jpg"`, returning its
    /// public URL. Re-persisting a title overwrites the same object.
    ///
    /// # Errors
    /// [`IngestError::UploadFailed`] if the download fails, returns a
    /// non-success status, or the blob store rejects the write.
    pub async fn persist(&self, record: &MovieRecord) -> Result<String, IngestError> {
        let response = self
            .http
            .get(&record.poster_source_url)
            .send()
            .await
            .map_err(|e| IngestError::UploadFailed(format!("poster download failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::UploadFailed(format!(
                "poster download returned status {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IngestError::UploadFailed(format!("poster download failed: {e}")))?;
        debug!(bytes = body.len(), source = %record.poster_source_url, "Downloaded poster");

        let key = record.poster_key();
        self.blobs
            .put(&self.config.bucket, &key, body, POSTER_CONTENT_TYPE)
            .await
            .map_err(|e| IngestError::UploadFailed(e.to_string()))?;

        let url = public_url(&self.config.bucket, &self.config.public_domain, &key);
        info!(key = %key, url = %url, "Stored poster");
        Ok(url)
    }
}
