use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use super::models::CatalogResponse;
use crate::domain::MovieRecord;
use crate::error::IngestError;
use crate::port::SecretResolver;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub secret_name: String,
    /// `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

/// Looks movies up in the catalog by identifier and normalizes the result.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: Url,
    secret_name: String,
    secrets: Arc<dyn SecretResolver>,
}

impl CatalogClient {
    /// # Errors
    /// Returns [`IngestError::Configuration`] if the endpoint is not a valid URL
    /// or the HTTP client cannot be built.
    pub fn new(
        config: CatalogConfig,
        secrets: Arc<dyn SecretResolver>,
    ) -> Result<Self, IngestError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            IngestError::Configuration(format!("failed to build catalog HTTP client: {e}"))
        })?;
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            IngestError::Configuration(format!("invalid catalog endpoint {}: {e}", config.endpoint))
        })?;

        Ok(Self {
            client,
            endpoint,
            secret_name: config.secret_name,
            secrets,
        })
    }

    /// Fetch and normalize one movie.
    ///
    /// `Ok(None)` means the catalog reported the identifier as unknown; the
    /// caller must not write anything for it. The API key is resolved on
    /// every call.
    ///
    /// # Errors
    /// - [`IngestError::Configuration`] when no API key is available.
    /// - [`IngestError::Catalog`] when the request fails or the body is not JSON.
    /// - [`IngestError::MalformedResponse`] when a required field is missing.
    pub async fn fetch(&self, movie_id: &str) -> Result<Option<MovieRecord>, IngestError> {
        let api_key = self.secrets.get(&self.secret_name).ok_or_else(|| {
            IngestError::Configuration(format!("catalog API key {} not found", self.secret_name))
        })?;

        debug!(movie_id, "fetching movie from catalog");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("i", movie_id), ("apikey", api_key.as_str())])
            .send()
            .await
            .map_err(|e| IngestError::Catalog(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let body: CatalogResponse = response.json().await.map_err(|e| {
            IngestError::Catalog(format!("failed to decode response (status {status}): {e}"))
        })?;

        if !body.is_found() {
            warn!(
                movie_id,
                %status,
                reason = body.error.as_deref().unwrap_or("unknown"),
                "Movie not found in catalog"
            );
            return Ok(None);
        }

        let record = body.into_record()?;
        info!(movie_id, title = %record.title, "Fetched movie metadata");
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticSecrets;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, secrets: StaticSecrets) -> CatalogClient {
        CatalogClient::new(
            CatalogConfig {
                endpoint: format!("{}/", server.uri()),
                secret_name: "OMDbAPIKey".to_string(),
                timeout: Some(Duration::from_secs(5)),
            },
            Arc::new(secrets),
        )
        .expect("client should build")
    }

    #[tokio::test]
    async fn fetch_sends_identifier_and_key_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("i", "tt0111161"))
            .and(query_param("apikey", "secret-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Title": "The Shawshank Redemption",
                "Year": "1994",
                "Released": "14 Oct 1994",
                "Genre": "Drama",
                "Language": "English",
                "Poster": "https://img.example.com/shawshank.jpg",
                "Response": "True"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, StaticSecrets::single("OMDbAPIKey", "secret-key"));
        let record = client
            .fetch("tt0111161")
            .await
            .expect("fetch should succeed")
            .expect("movie should be found");

        assert_eq!(record.title, "The Shawshank Redemption");
        assert_eq!(record.plot, "N/A");
        assert_eq!(record.rating, "N/A");
    }

    #[tokio::test]
    async fn fetch_returns_none_when_catalog_says_false() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "False",
                "Error": "Incorrect IMDb ID."
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, StaticSecrets::single("OMDbAPIKey", "k"));
        let result = client.fetch("tt0000000").await.expect("not found is not an error");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fetch_without_key_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, StaticSecrets::empty());
        let err = client.fetch("tt0111161").await.unwrap_err();

        assert!(matches!(err, IngestError::Configuration(_)));
    }

    #[tokio::test]
    async fn fetch_with_missing_required_field_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Title": "Untitled",
                "Response": "True"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, StaticSecrets::single("OMDbAPIKey", "k"));
        let err = client.fetch("tt1").await.unwrap_err();

        assert!(matches!(err, IngestError::MalformedResponse("Year")));
    }

    #[tokio::test]
    async fn fetch_with_non_json_body_is_catalog_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = client_for(&server, StaticSecrets::single("OMDbAPIKey", "k"));
        let err = client.fetch("tt1").await.unwrap_err();

        match err {
            IngestError::Catalog(message) => assert!(message.contains("503")),
            other => panic!("expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_endpoint_is_configuration_error() {
        let result = CatalogClient::new(
            CatalogConfig {
                endpoint: "not a url".to_string(),
                secret_name: "OMDbAPIKey".to_string(),
                timeout: None,
            },
            Arc::new(StaticSecrets::empty()),
        );
        assert!(matches!(result, Err(IngestError::Configuration(_))));
    }
}
