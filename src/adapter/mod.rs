pub mod clickhouse;
pub mod env_secret;
pub mod filesystem;
pub mod memory;

pub use clickhouse::ClickHouseDocumentStore;
pub use env_secret::EnvSecretResolver;
pub use filesystem::FilesystemBlobStore;
pub use memory::{MemoryBlobStore, MemoryDocumentStore};
