//! BlobStore trait for poster storage.
//!
//! This trait is dyn-compatible by using boxed futures, so the composition
//! root can pick a backend at runtime and tests can inject in-memory doubles.

use crate::error::BlobError;
use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;

pub trait BlobStore: Send + Sync {
    /// Create the bucket if it does not exist yet. Idempotent.
    fn ensure_bucket(
        &self,
        bucket: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BlobError>> + Send + '_>>;

    /// Store `body` under `bucket/key`, replacing any previous object.
    fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BlobError>> + Send + '_>>;

    /// Fetch an object. `Ok(None)` when the key is absent.
    fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Bytes>, BlobError>> + Send + '_>>;
}

/// Public, unsigned URL of an object: `https://{bucket}.{domain}/{key}`.
///
/// The key is used verbatim, spaces included.
#[must_use]
pub fn public_url(bucket: &str, domain: &str, key: &str) -> String {
    format!("https://{bucket}.{domain}/{key}")
}
