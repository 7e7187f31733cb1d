//! Ingestion pipeline (catalog fetch → poster upload → record upsert) and
//! the read-side query service over the movie table.

mod ingest;
mod poster;
mod query;
mod record_store;

pub use ingest::{IngestOutcome, IngestionPipeline};
pub use poster::{POSTER_CONTENT_TYPE, PosterConfig, PosterPersister};
pub use query::QueryService;
pub use record_store::RecordStore;
