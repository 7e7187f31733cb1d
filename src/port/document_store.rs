//! DocumentStore trait for the movie table.

use crate::domain::StoredMovie;
use crate::error::StoreError;
use std::future::Future;
use std::pin::Pin;

/// Key-addressed document store supporting point writes and full scans.
///
/// Documents are keyed by `StoredMovie::movie_id`. No secondary indexes and
/// no pagination: `scan` returns the whole table.
pub trait DocumentStore: Send + Sync {
    /// Create the table if it does not exist yet. Idempotent.
    fn ensure_table(
        &self,
        table: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>>;

    /// Unconditional upsert: an existing document with the same key is replaced.
    fn put_item(
        &self,
        table: &str,
        item: StoredMovie,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>>;

    /// Every document currently in the table, in backend order.
    fn scan(
        &self,
        table: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StoredMovie>, StoreError>> + Send + '_>>;
}
