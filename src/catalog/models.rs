use serde::Deserialize;
use serde_json::Value;

use crate::domain::{MovieRecord, NOT_AVAILABLE};
use crate::error::IngestError;

/// Catalog lookup response. Every field is optional at the wire level;
/// required fields are enforced by [`CatalogResponse::into_record`]. Metadata
/// fields are kept as raw JSON so a numeric `Year` still normalizes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CatalogResponse {
    pub(crate) response: Option<String>,
    pub(crate) error: Option<String>,
    title: Option<Value>,
    year: Option<Value>,
    released: Option<Value>,
    genre: Option<Value>,
    language: Option<Value>,
    poster: Option<Value>,
    plot: Option<Value>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<Value>,
}

impl CatalogResponse {
    pub(crate) fn is_found(&self) -> bool {
        self.response.as_deref() == Some("True")
    }

    pub(crate) fn into_record(self) -> Result<MovieRecord, IngestError> {
        Ok(MovieRecord {
            title: required(self.title, "Title")?,
            year: required(self.year, "Year")?,
            released: required(self.released, "Released")?,
            genre: required(self.genre, "Genre")?,
            language: required(self.language, "Language")?,
            poster_source_url: required(self.poster, "Poster")?,
            plot: self.plot.and_then(text).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            rating: self
                .imdb_rating
                .and_then(text)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
    }
}

/// Scalar JSON as text. Null, arrays and objects have no text form.
fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn required(value: Option<Value>, field: &'static str) -> Result<String, IngestError> {
    value
        .and_then(text)
        .ok_or(IngestError::MalformedResponse(field))
}
