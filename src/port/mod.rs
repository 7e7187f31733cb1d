pub mod blob_store;
pub mod document_store;
pub mod secret_resolver;

pub use blob_store::{BlobStore, public_url};
pub use document_store::DocumentStore;
pub use secret_resolver::SecretResolver;
