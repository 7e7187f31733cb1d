use axum::Json;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Handler for GET /v1/health
pub async fn health_handler() -> Json<HealthReport> {
    debug!("Health check requested");
    Json(HealthReport {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
