use crate::adapter::{
    ClickHouseDocumentStore, EnvSecretResolver, FilesystemBlobStore, MemoryBlobStore,
    MemoryDocumentStore,
};
use crate::catalog::{CatalogClient, CatalogConfig};
use crate::config::{BlobBackend, DocumentBackend, Settings};
use crate::error::ServiceError;
use crate::pipeline::{IngestionPipeline, PosterConfig, PosterPersister, QueryService, RecordStore};
use crate::port::{BlobStore, DocumentStore, SecretResolver};
use clickhouse::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Composition root: every client is constructed here exactly once and
/// injected into the components that use it.
pub struct AppState {
    pub pipeline: IngestionPipeline,
    pub queries: QueryService,
    blobs: Arc<dyn BlobStore>,
    documents: Arc<dyn DocumentStore>,
    bucket: String,
    table: String,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    ///
    /// # Errors
    /// Returns [`ServiceError::Config`] if an HTTP client cannot be built or
    /// the catalog endpoint is invalid.
    pub fn from_settings(settings: &Settings) -> Result<Self, ServiceError> {
        let secrets: Arc<dyn SecretResolver> = Arc::new(EnvSecretResolver::new());
        let blobs = blob_store(&settings.blob_backend);
        let documents = document_store(&settings.document_backend);
        Self::with_ports(settings, secrets, blobs, documents)
    }

    /// Wire the components over explicitly provided ports.
    ///
    /// # Errors
    /// Same as [`AppState::from_settings`].
    pub fn with_ports(
        settings: &Settings,
        secrets: Arc<dyn SecretResolver>,
        blobs: Arc<dyn BlobStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Result<Self, ServiceError> {
        let catalog = CatalogClient::new(
            CatalogConfig {
                endpoint: settings.catalog_endpoint.clone(),
                secret_name: settings.catalog_secret_name.clone(),
                timeout: settings.catalog_timeout,
            },
            secrets,
        )
        .map_err(|e| ServiceError::Config(e.to_string()))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ServiceError::Config(format!("failed to build poster HTTP client: {e}")))?;
        let posters = PosterPersister::new(
            http,
            Arc::clone(&blobs),
            PosterConfig {
                bucket: settings.movie_bucket.clone(),
                public_domain: settings.blob_public_domain.clone(),
            },
        );
        let records = RecordStore::new(Arc::clone(&documents), settings.movie_table.clone());
        let queries = QueryService::new(Arc::clone(&documents), settings.movie_table.clone());

        Ok(Self {
            pipeline: IngestionPipeline::new(catalog, posters, records),
            queries,
            blobs,
            documents,
            bucket: settings.movie_bucket.clone(),
            table: settings.movie_table.clone(),
        })
    }

    /// Ensure the poster bucket and movie table exist. Failures are logged
    /// and do not abort start-up; the first write will surface them.
    pub async fn provision(&self) {
        match self.blobs.ensure_bucket(&self.bucket).await {
            Ok(()) => info!(bucket = %self.bucket, "Poster bucket ready"),
            Err(e) => warn!(bucket = %self.bucket, error = %e, "Failed to ensure poster bucket"),
        }
        match self.documents.ensure_table(&self.table).await {
            Ok(()) => info!(table = %self.table, "Movie table ready"),
            Err(e) => warn!(table = %self.table, error = %e, "Failed to ensure movie table"),
        }
    }
}

fn blob_store(backend: &BlobBackend) -> Arc<dyn BlobStore> {
    match backend {
        BlobBackend::Memory => Arc::new(MemoryBlobStore::new()),
        BlobBackend::Filesystem { root } => Arc::new(FilesystemBlobStore::new(root.clone())),
    }
}

fn document_store(backend: &DocumentBackend) -> Arc<dyn DocumentStore> {
    match backend {
        DocumentBackend::Memory => Arc::new(MemoryDocumentStore::new()),
        DocumentBackend::ClickHouse(ch) => {
            let client = Client::default()
                .with_url(format!("http://{}:{}", ch.host, ch.port))
                .with_user(&ch.user)
                .with_password(&ch.password)
                .with_database(&ch.database);
            Arc::new(ClickHouseDocumentStore::new(client))
        }
    }
}
