pub mod document_store;
pub mod row;

pub use document_store::ClickHouseDocumentStore;
pub use row::MovieRow;
