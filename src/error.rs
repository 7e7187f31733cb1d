use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Failures of a single ingestion attempt. A catalog miss is not an error;
/// see [`crate::pipeline::IngestOutcome::NotFound`].
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("catalog request failed: {0}")]
    Catalog(String),

    #[error("catalog response is missing required field `{0}`")]
    MalformedResponse(&'static str),

    #[error("poster upload failed: {0}")]
    UploadFailed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document store backend error: {0}")]
    Backend(String),

    #[error("failed to encode document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("ClickHouse error: {0}")]
    ClickHouse(#[from] clickhouse::error::Error),
}

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("bucket {0} does not exist")]
    NoSuchBucket(String),

    #[error("blob I/O failed for {bucket}/{key}: {source}")]
    Io {
        bucket: String,
        key: String,
        #[source]
        source: std::io::Error,
    },
}
