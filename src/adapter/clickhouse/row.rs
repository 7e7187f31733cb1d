use crate::domain::{MovieInfo, StoredMovie};
use crate::error::StoreError;
use serde::{Deserialize, Serialize};

#[derive(clickhouse::Row, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MovieRow {
    pub movie_id: String, // String (ORDER BY key)
    pub info: String,     // String, JSON-encoded MovieInfo
    pub version: u64,     // UInt64, ReplacingMergeTree version column
}

impl MovieRow {
    /// Encode a document. `version` decides which row survives a merge, so
    /// callers pass a monotonically increasing value.
    pub fn from_document(movie: &StoredMovie, version: u64) -> Result<Self, StoreError> {
        Ok(Self {
            movie_id: movie.movie_id.clone(),
            info: serde_json::to_string(&movie.info)?,
            version,
        })
    }

    pub fn into_document(self) -> Result<StoredMovie, StoreError> {
        let info: MovieInfo = serde_json::from_str(&self.info)?;
        Ok(StoredMovie {
            movie_id: self.movie_id,
            info,
        })
    }
}
