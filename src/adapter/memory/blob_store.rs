use crate::error::BlobError;
use crate::port::BlobStore;
use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBlob {
    pub body: Bytes,
    pub content_type: String,
}

/// Process-local blob store. Buckets must be created with
/// [`BlobStore::ensure_bucket`] (or [`MemoryBlobStore::with_bucket`]) before use.
#[derive(Default)]
pub struct MemoryBlobStore {
    buckets: RwLock<HashMap<String, HashMap<String, StoredBlob>>>,
    puts: AtomicUsize,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bucket(bucket: &str) -> Self {
        let mut buckets = HashMap::new();
        buckets.insert(bucket.to_string(), HashMap::new());
        Self {
            buckets: RwLock::new(buckets),
            puts: AtomicUsize::new(0),
        }
    }

    /// Number of successful `put` calls since construction.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub async fn object(&self, bucket: &str, key: &str) -> Option<StoredBlob> {
        self.buckets.read().await.get(bucket)?.get(key).cloned()
    }

    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.read().await;
        let mut keys: Vec<String> = buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl BlobStore for MemoryBlobStore {
    fn ensure_bucket(
        &self,
        bucket: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BlobError>> + Send + '_>> {
        let bucket = bucket.to_string();
        Box::pin(async move {
            self.buckets.write().await.entry(bucket).or_default();
            Ok(())
        })
    }

    fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BlobError>> + Send + '_>> {
        let bucket = bucket.to_string();
        let key = key.to_string();
        let content_type = content_type.to_string();
        Box::pin(async move {
            let mut buckets = self.buckets.write().await;
            let objects = buckets
                .get_mut(&bucket)
                .ok_or_else(|| BlobError::NoSuchBucket(bucket.clone()))?;
            objects.insert(key, StoredBlob { body, content_type });
            self.puts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Bytes>, BlobError>> + Send + '_>> {
        let bucket = bucket.to_string();
        let key = key.to_string();
        Box::pin(async move {
            let buckets = self.buckets.read().await;
            let objects = buckets
                .get(&bucket)
                .ok_or_else(|| BlobError::NoSuchBucket(bucket.clone()))?;
            Ok(objects.get(&key).map(|blob| blob.body.clone()))
        })
    }
}
