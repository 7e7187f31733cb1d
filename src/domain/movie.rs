use serde::{Deserialize, Serialize};

/// Placeholder the catalog uses, and we fall back to, for absent optional fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Normalized catalog metadata for one movie. Lives only for the duration of
/// an ingestion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: String,
    pub year: String,
    pub released: String,
    pub genre: String,
    pub language: String,
    pub poster_source_url: String,
    pub plot: String,
    pub rating: String,
}

impl MovieRecord {
    /// Blob key the poster for this record is stored under.
    #[must_use]
    pub fn poster_key(&self) -> String {
        format!("{}.jpg", self.title)
    }
}

/// Document persisted in the movie table, keyed by `movie_id`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoredMovie {
    pub movie_id: String,
    pub info: MovieInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MovieInfo {
    pub plot: String,
    pub rating: String,
    pub poster: String,
    // Never written by the record store; only read by the year filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl StoredMovie {
    /// Fold an ingested record and its hosted poster URL into the stored shape.
    /// The key is the movie title, not the catalog identifier.
    #[must_use]
    pub fn from_record(record: &MovieRecord, poster_url: impl Into<String>) -> Self {
        Self {
            movie_id: record.title.clone(),
            info: MovieInfo {
                plot: record.plot.clone(),
                rating: record.rating.clone(),
                poster: poster_url.into(),
                year: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shawshank() -> MovieRecord {
        MovieRecord {
            title: "The Shawshank Redemption".to_string(),
            year: "1994".to_string(),
            released: "14 Oct 1994".to_string(),
            genre: "Drama".to_string(),
            language: "English".to_string(),
            poster_source_url: "https://img.example.com/p.jpg".to_string(),
            plot: "Two imprisoned men bond.".to_string(),
            rating: "9.3".to_string(),
        }
    }

    #[test]
    fn poster_key_is_title_with_jpg_suffix() {
        assert_eq!(shawshank().poster_key(), "The Shawshank Redemption.jpg");
    }

    #[test]
    fn stored_movie_is_keyed_by_title_and_drops_year() {
        let stored = StoredMovie::from_record(&shawshank(), "https://b.example/k.jpg");

        assert_eq!(stored.movie_id, "The Shawshank Redemption");
        assert_eq!(stored.info.plot, "Two imprisoned men bond.");
        assert_eq!(stored.info.rating, "9.3");
        assert_eq!(stored.info.poster, "https://b.example/k.jpg");
        assert_eq!(stored.info.year, None);
    }

    #[test]
    fn stored_movie_serializes_without_year() {
        let stored = StoredMovie::from_record(&shawshank(), "u");
        let json = serde_json::to_value(&stored).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "movie_id": "The Shawshank Redemption",
                "info": {"plot": "Two imprisoned men bond.", "rating": "9.3", "poster": "u"}
            })
        );
    }

    #[test]
    fn stored_movie_reads_year_when_present() {
        let json = r#"{"movie_id":"m","info":{"plot":"p","rating":"r","poster":"u","year":"1994"}}"#;
        let stored: StoredMovie = serde_json::from_str(json).unwrap();
        assert_eq!(stored.info.year.as_deref(), Some("1994"));
    }
}
