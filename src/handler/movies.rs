use crate::pipeline::QueryService;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

/// Handler for GET /v1/movies
pub async fn list_movies_handler(State(queries): State<QueryService>) -> Response {
    match queries.list_all().await {
        Ok(movies) => {
            info!(count = movies.len(), "Listed movies");
            (StatusCode::OK, Json(movies)).into_response()
        }
        Err(e) => {
            error!("Failed to list movies: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error retrieving movies: {e}"),
            )
                .into_response()
        }
    }
}

/// Handler for GET /v1/movies/by-year?year=YYYY
///
/// A missing or empty `year` is rejected before the store is touched.
pub async fn list_movies_by_year_handler(
    State(queries): State<QueryService>,
    Query(params): Query<YearQuery>,
) -> Response {
    let Some(year) = params.year.filter(|y| !y.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Year parameter is required").into_response();
    };

    match queries.list_by_year(&year).await {
        Ok(movies) => {
            info!(year = %year, count = movies.len(), "Listed movies by year");
            (StatusCode::OK, Json(movies)).into_response()
        }
        Err(e) => {
            error!("Failed to list movies by year {year}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error retrieving movies by year: {e}"),
            )
                .into_response()
        }
    }
}
