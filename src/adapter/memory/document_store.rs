use crate::domain::StoredMovie;
use crate::error::StoreError;
use crate::port::DocumentStore;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Process-local document store. Scans enumerate documents in key order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    tables: RwLock<HashMap<String, BTreeMap<String, StoredMovie>>>,
    writes: AtomicUsize,
    scans: AtomicUsize,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(table: &str) -> Self {
        let mut tables = HashMap::new();
        tables.insert(table.to_string(), BTreeMap::new());
        Self {
            tables: RwLock::new(tables),
            ..Self::default()
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

fn no_such_table(table: &str) -> StoreError {
    StoreError::Backend(format!("table {table} does not exist"))
}

impl DocumentStore for MemoryDocumentStore {
    fn ensure_table(
        &self,
        table: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        let table = table.to_string();
        Box::pin(async move {
            self.tables.write().await.entry(table).or_default();
            Ok(())
        })
    }

    fn put_item(
        &self,
        table: &str,
        item: StoredMovie,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        let table = table.to_string();
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let documents = tables.get_mut(&table).ok_or_else(|| no_such_table(&table))?;
            documents.insert(item.movie_id.clone(), item);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn scan(
        &self,
        table: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StoredMovie>, StoreError>> + Send + '_>> {
        let table = table.to_string();
        Box::pin(async move {
            self.scans.fetch_add(1, Ordering::SeqCst);
            let tables = self.tables.read().await;
            let documents = tables.get(&table).ok_or_else(|| no_such_table(&table))?;
            Ok(documents.values().cloned().collect())
        })
    }
}
