use crate::error::IngestError;
use crate::pipeline::{IngestOutcome, IngestionPipeline};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Status code an ingestion failure is reported with.
#[must_use]
pub fn status_for(error: &IngestError) -> StatusCode {
    match error {
        IngestError::Catalog(_)
        | IngestError::MalformedResponse(_)
        | IngestError::UploadFailed(_) => StatusCode::BAD_GATEWAY,
        IngestError::Configuration(_) | IngestError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Handler for POST /v1/movies/{movie_id}/ingest
///
/// The pipeline logs its own outcome; this only maps it to a response.
pub async fn ingest_handler(
    State(pipeline): State<IngestionPipeline>,
    Path(movie_id): Path<String>,
) -> Response {
    match pipeline.ingest(&movie_id).await {
        Ok(IngestOutcome::Stored(movie)) => (StatusCode::CREATED, Json(movie)).into_response(),
        Ok(IngestOutcome::NotFound) => (
            StatusCode::NOT_FOUND,
            format!("Movie {movie_id} not found in catalog"),
        )
            .into_response(),
        Err(e) => (status_for(&e), format!("Error ingesting movie: {e}")).into_response(),
    }
}
