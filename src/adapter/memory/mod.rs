mod blob_store;
mod document_store;

pub use blob_store::{MemoryBlobStore, StoredBlob};
pub use document_store::MemoryDocumentStore;
