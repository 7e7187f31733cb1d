use crate::app::state::AppState;
use crate::handler::health::health_handler;
use crate::handler::ingest::ingest_handler;
use crate::handler::movies::{list_movies_by_year_handler, list_movies_handler};
use crate::pipeline::{IngestionPipeline, QueryService};
use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the HTTP router (health, read endpoints, ingestion).
pub fn main_router(state: &AppState) -> Router {
    Router::new()
        .route("/v1/health", get(health_handler))
        .merge(movies_router(state.queries.clone()))
        .merge(ingest_router(state.pipeline.clone()))
        .layer(TraceLayer::new_for_http())
}

/// Read endpoints over the movie table.
pub fn movies_router(queries: QueryService) -> Router {
    Router::new()
        .route("/v1/movies", get(list_movies_handler))
        .route("/v1/movies/by-year", get(list_movies_by_year_handler))
        .with_state(queries)
}

pub fn ingest_router(pipeline: IngestionPipeline) -> Router {
    Router::new()
        .route("/v1/movies/{movie_id}/ingest", post(ingest_handler))
        .with_state(pipeline)
}
