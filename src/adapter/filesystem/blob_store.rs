// Blob store backed by a local directory tree: each bucket is a directory
// under `root`, each object a file named by its key. Content type is not
// persisted; the public URL domain decides how objects are served.

use crate::error::BlobError;
use crate::port::BlobStore;
use bytes::Bytes;
use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct FilesystemBlobStore {
    root: PathBuf,
}

impl FilesystemBlobStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(io_error(
                bucket,
                key,
                io::Error::new(io::ErrorKind::InvalidInput, "key escapes the bucket"),
            ));
        }
        Ok(self.bucket_dir(bucket).join(relative))
    }
}

fn io_error(bucket: &str, key: &str, source: io::Error) -> BlobError {
    BlobError::Io {
        bucket: bucket.to_string(),
        key: key.to_string(),
        source,
    }
}

impl BlobStore for FilesystemBlobStore {
    fn ensure_bucket(
        &self,
        bucket: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BlobError>> + Send + '_>> {
        let bucket = bucket.to_string();
        Box::pin(async move {
            fs::create_dir_all(self.bucket_dir(&bucket))
                .await
                .map_err(|e| io_error(&bucket, "", e))
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
            let bucket_exists = fs::try_exists(self.bucket_dir(&bucket))
                .await
                .map_err(|e| io_error(&bucket, &key, e))?;
            if !bucket_exists {
                return Err(BlobError::NoSuchBucket(bucket));
            }
            let path = self.object_path(&bucket, &key)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| io_error(&bucket, &key, e))?;
            }
            fs::write(&path, &body)
                .await
                .map_err(|e| io_error(&bucket, &key, e))?;
            debug!(
                bucket = %bucket,
                key = %key,
                content_type = %content_type,
                bytes = body.len(),
                "Wrote blob to disk"
            );
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
            let path = self.object_path(&bucket, &key)?;
            match fs::read(&path).await {
                Ok(content) => Ok(Some(Bytes::from(content))),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(io_error(&bucket, &key, e)),
            }
        })
    }
}
