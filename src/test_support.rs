//! Shared test support utilities
//!
//! Test doubles for the ports plus record fixtures, for use in unit and
//! integration tests.

use crate::config::{Settings, configuration_from};
use crate::domain::{MovieRecord, StoredMovie};
use crate::error::StoreError;
use crate::port::{DocumentStore, SecretResolver};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Secret resolver answering from a fixed map.
#[derive(Clone, Debug, Default)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(name: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(name.to_string(), value.to_string());
        Self { values }
    }
}

impl SecretResolver for StaticSecrets {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Document store whose every operation fails, counting the attempts.
#[derive(Default)]
pub struct FailingDocumentStore {
    calls: AtomicUsize,
}

impl FailingDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Backend("mock store failure".to_string()))
    }
}

impl DocumentStore for FailingDocumentStore {
    fn ensure_table(
        &self,
        _table: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        Box::pin(async move { self.fail() })
    }

    fn put_item(
        &self,
        _table: &str,
        _item: StoredMovie,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        Box::pin(async move { self.fail() })
    }

    fn scan(
        &self,
        _table: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StoredMovie>, StoreError>> + Send + '_>> {
        Box::pin(async move { self.fail() })
    }
}

/// A fully populated record with the given title and poster source.
pub fn sample_record(title: &str, poster_source_url: &str) -> MovieRecord {
    MovieRecord {
        title: title.to_string(),
        year: "1995".to_string(),
        released: "15 Dec 1995".to_string(),
        genre: "Crime, Drama".to_string(),
        language: "English".to_string(),
        poster_source_url: poster_source_url.to_string(),
        plot: "A sample plot.".to_string(),
        rating: "8.0".to_string(),
    }
}

/// Default settings with the catalog pointed at `catalog_endpoint`.
pub fn test_settings(catalog_endpoint: &str) -> Settings {
    let endpoint = catalog_endpoint.to_string();
    configuration_from(move |name| (name == "CATALOG_ENDPOINT").then(|| endpoint.clone()))
        .expect("default settings are valid")
}

/// Successful catalog lookup body for `title`, without `Plot`/`imdbRating`
/// unless given.
pub fn catalog_body(
    title: &str,
    poster_url: &str,
    plot: Option<&str>,
    rating: Option<&str>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "Title": title,
        "Year": "1994",
        "Released": "14 Oct 1994",
        "Genre": "Drama",
        "Language": "English",
        "Poster": poster_url,
        "Response": "True"
    });
    if let Some(fields) = body.as_object_mut() {
        if let Some(plot) = plot {
            fields.insert("Plot".to_string(), plot.into());
        }
        if let Some(rating) = rating {
            fields.insert("imdbRating".to_string(), rating.into());
        }
    }
    body
}
