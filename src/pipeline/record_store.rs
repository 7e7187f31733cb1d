use std::sync::Arc;

use tracing::info;

use crate::domain::{MovieRecord, StoredMovie};
use crate::error::StoreError;
use crate::port::DocumentStore;

/// Writes ingested movies into the movie table.
#[derive(Clone)]
pub struct RecordStore {
    documents: Arc<dyn DocumentStore>,
    table: String,
}

impl RecordStore {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, table: impl Into<String>) -> Self {
        Self {
            documents,
            table: table.into(),
        }
    }

    /// Blind upsert keyed by title. Concurrent stores of the same title race;
    /// the last write wins.
    ///
    /// # Errors
    /// Any failure of the underlying write.
    pub async fn store(
        &self,
        record: &MovieRecord,
        poster_url: &str,
    ) -> Result<StoredMovie, StoreError> {
        let movie = StoredMovie::from_record(record, poster_url);
        self.documents.put_item(&self.table, movie.clone()).await?;
        info!(table = %self.table, movie_id = %movie.movie_id, "Movie data stored");
        Ok(movie)
    }
}
