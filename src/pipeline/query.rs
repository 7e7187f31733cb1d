use std::sync::Arc;

use tracing::debug;

use crate::domain::StoredMovie;
use crate::error::StoreError;
use crate::port::DocumentStore;

/// Read side of the movie table. Every call performs a fresh full scan.
#[derive(Clone)]
pub struct QueryService {
    documents: Arc<dyn DocumentStore>,
    table: String,
}

impl QueryService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, table: impl Into<String>) -> Self {
        Self {
            documents,
            table: table.into(),
        }
    }

    /// # Errors
    /// Any failure of the underlying scan.
    pub async fn list_all(&self) -> Result<Vec<StoredMovie>, StoreError> {
        let movies = self.documents.scan(&self.table).await?;
        debug!(count = movies.len(), "Scanned movie table");
        Ok(movies)
    }

    /// Full scan filtered on `info.year`. The record store never writes that
    /// field, so for documents it produced this is always empty.
    ///
    /// # Errors
    /// Any failure of the underlying scan.
    pub async fn list_by_year(&self, year: &str) -> Result<Vec<StoredMovie>, StoreError> {
        let movies: Vec<StoredMovie> = self
            .list_all()
            .await?
            .into_iter()
            .filter(|movie| movie.info.year.as_deref() == Some(year))
            .collect();
        debug!(year, count = movies.len(), "Filtered movies by year");
        Ok(movies)
    }
}
