use tracing::{error, info, instrument};

use super::{PosterPersister, RecordStore};
use crate::catalog::CatalogClient;
use crate::domain::StoredMovie;
use crate::error::IngestError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Stored(StoredMovie),
    /// The catalog does not know the identifier. Nothing was written.
    NotFound,
}

/// Fetch → poster → record, strictly in that order. Any failure stops the run
/// before the next step, so a record is never written without its poster.
#[derive(Clone)]
pub struct IngestionPipeline {
    catalog: CatalogClient,
    posters: PosterPersister,
    records: RecordStore,
}

impl IngestionPipeline {
    #[must_use]
    pub fn new(catalog: CatalogClient, posters: PosterPersister, records: RecordStore) -> Self {
        Self {
            catalog,
            posters,
            records,
        }
    }

    /// # Errors
    /// The first [`IngestError`] raised by any step. No retries.
    #[instrument(skip(self))]
    pub async fn ingest(&self, movie_id: &str) -> Result<IngestOutcome, IngestError> {
        let result = self.run(movie_id).await;
        match &result {
            Ok(IngestOutcome::Stored(movie)) => {
                info!(movie_id = %movie.movie_id, "Ingestion complete");
            }
            Ok(IngestOutcome::NotFound) => info!("Movie not found, nothing stored"),
            Err(e) => error!(error = %e, "Ingestion failed"),
        }
        result
    }

    async fn run(&self, movie_id: &str) -> Result<IngestOutcome, IngestError> {
        let Some(record) = self.catalog.fetch(movie_id).await? else {
            return Ok(IngestOutcome::NotFound);
        };
        let poster_url = self.posters.persist(&record).await?;
        let movie = self.records.store(&record, &poster_url).await?;
        Ok(IngestOutcome::Stored(movie))
    }
}
