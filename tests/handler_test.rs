use axum::http::StatusCode;
use axum_test::TestServer;
use movie_catalog::adapter::{MemoryBlobStore, MemoryDocumentStore};
use movie_catalog::app::{AppState, main_router, movies_router};
use movie_catalog::domain::{MovieInfo, StoredMovie};
use movie_catalog::pipeline::QueryService;
use movie_catalog::port::DocumentStore;
use movie_catalog::test_support::{
    FailingDocumentStore, StaticSecrets, catalog_body, test_settings,
};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TABLE: &str = "movie2-api-table-1";

fn stored(id: &str, year: Option<&str>) -> StoredMovie {
    StoredMovie {
        movie_id: id.to_string(),
        info: MovieInfo {
            plot: format!("{id} plot"),
            rating: "7.5".to_string(),
            poster: format!("https://movie-api.bucket-1.s3.amazonaws.com/{id}.jpg"),
            year: year.map(str::to_string),
        },
    }
}

async fn seeded_store(movies: &[StoredMovie]) -> Arc<MemoryDocumentStore> {
    let documents = Arc::new(MemoryDocumentStore::with_table(TABLE));
    for movie in movies {
        documents.put_item(TABLE, movie.clone()).await.unwrap();
    }
    documents
}

fn movies_server(documents: Arc<dyn DocumentStore>) -> TestServer {
    TestServer::new(movies_router(QueryService::new(documents, TABLE))).unwrap()
}

#[tokio::test]
async fn test_list_movies_returns_every_document() {
    let documents = seeded_store(&[stored("Heat", None), stored("Alien", None)]).await;
    let server = movies_server(documents);

    let response = server.get("/v1/movies").await;

    response.assert_status_ok();
    let movies: Vec<StoredMovie> = response.json();
    assert_eq!(movies.len(), 2);
    assert!(movies.contains(&stored("Heat", None)));
}

#[tokio::test]
async fn test_list_movies_on_empty_table_is_empty_array() {
    let server = movies_server(seeded_store(&[]).await);

    let response = server.get("/v1/movies").await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!([]));
}

#[tokio::test]
async fn test_list_movies_store_failure_is_500() {
    let server = movies_server(Arc::new(FailingDocumentStore::new()));

    let response = server.get("/v1/movies").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().starts_with("Error retrieving movies: "));
}

#[tokio::test]
async fn test_by_year_without_year_is_400_and_skips_store() {
    let documents = Arc::new(FailingDocumentStore::new());
    let server = movies_server(documents.clone());

    let missing = server.get("/v1/movies/by-year").await;
    let empty = server.get("/v1/movies/by-year").add_query_param("year", "").await;

    missing.assert_status(StatusCode::BAD_REQUEST);
    missing.assert_text("Year parameter is required");
    empty.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(documents.calls(), 0);
}

#[tokio::test]
async fn test_by_year_over_ingested_documents_is_always_empty() {
    let documents = seeded_store(&[stored("Heat", None), stored("Alien", None)]).await;
    let server = movies_server(documents);

    for year in ["1979", "1995", "2024"] {
        let response = server.get("/v1/movies/by-year").add_query_param("year", year).await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }
}

#[tokio::test]
async fn test_by_year_matches_documents_with_year() {
    let documents = seeded_store(&[stored("Heat", Some("1995")), stored("Alien", None)]).await;
    let server = movies_server(documents);

    let response = server
        .get("/v1/movies/by-year")
        .add_query_param("year", "1995")
        .await;

    response.assert_status_ok();
    let movies: Vec<StoredMovie> = response.json();
    assert_eq!(movies, vec![stored("Heat", Some("1995"))]);
}

#[tokio::test]
async fn test_by_year_store_failure_is_500() {
    let server = movies_server(Arc::new(FailingDocumentStore::new()));

    let response = server
        .get("/v1/movies/by-year")
        .add_query_param("year", "1994")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().starts_with("Error retrieving movies by year: "));
}

async fn full_app(catalog: &MockServer, secrets: StaticSecrets) -> (TestServer, Arc<MemoryDocumentStore>) {
    let settings = test_settings(&format!("{}/", catalog.uri()));
    let documents = Arc::new(MemoryDocumentStore::new());
    let state = AppState::with_ports(
        &settings,
        Arc::new(secrets),
        Arc::new(MemoryBlobStore::new()),
        documents.clone(),
    )
    .unwrap();
    state.provision().await;
    (TestServer::new(main_router(&state)).unwrap(), documents)
}

#[tokio::test]
async fn test_health_endpoint_reports_healthy() {
    let catalog = MockServer::start().await;
    let (server, _) = full_app(&catalog, StaticSecrets::empty()).await;

    let response = server.get("/v1/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ingest_endpoint_stores_movie_and_returns_201() {
    let catalog = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("i", "tt0113277"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body(
            "Heat",
            &format!("{}/posters/heat.jpg", catalog.uri()),
            Some("A group of professional bank robbers."),
            Some("8.3"),
        )))
        .mount(&catalog)
        .await;
    Mock::given(method("GET"))
        .and(path("/posters/heat.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
        .mount(&catalog)
        .await;
    let (server, _) = full_app(&catalog, StaticSecrets::single("OMDbAPIKey", "k")).await;

    let response = server.post("/v1/movies/tt0113277/ingest").await;

    response.assert_status(StatusCode::CREATED);
    response.assert_json(&serde_json::json!({
        "movie_id": "Heat",
        "info": {
            "plot": "A group of professional bank robbers.",
            "rating": "8.3",
            "poster": "https://movie-api.bucket-1.s3.amazonaws.com/Heat.jpg"
        }
    }));
    let listed: Vec<StoredMovie> = server.get("/v1/movies").await.json();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_ingest_endpoint_unknown_movie_is_404() {
    let catalog = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Response": "False",
            "Error": "Incorrect IMDb ID."
        })))
        .mount(&catalog)
        .await;
    let (server, documents) = full_app(&catalog, StaticSecrets::single("OMDbAPIKey", "k")).await;

    let response = server.post("/v1/movies/tt9999999/ingest").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(documents.write_count(), 0);
}

#[tokio::test]
async fn test_ingest_endpoint_without_api_key_is_500() {
    let catalog = MockServer::start().await;
    let (server, _) = full_app(&catalog, StaticSecrets::empty()).await;

    let response = server.post("/v1/movies/tt0111161/ingest").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("configuration error"));
}

#[tokio::test]
async fn test_ingest_endpoint_poster_failure_is_502() {
    let catalog = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body(
            "Heat",
            &format!("{}/gone.jpg", catalog.uri()),
            None,
            None,
        )))
        .mount(&catalog)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.jpg"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&catalog)
        .await;
    let (server, documents) = full_app(&catalog, StaticSecrets::single("OMDbAPIKey", "k")).await;

    let response = server.post("/v1/movies/tt0113277/ingest").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(documents.write_count(), 0);
}
