use std::net::TcpListener;
use std::time::Duration;
use tokio::time::sleep;

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn spawn_server(port: u16, app: axum::Router) -> tokio::task::JoinHandle<()> {
    let handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}"))
            .await
            .unwrap();
        axum::serve(listener, app).await.unwrap();
    });
    sleep(Duration::from_millis(100)).await;
    handle
}

/// The probe accepts the service's own health route.
#[tokio::test]
async fn test_healthcheck_succeeds_against_health_handler() {
    let port = free_port();
    let app = axum::Router::new().route(
        "/v1/health",
        axum::routing::get(movie_catalog::handler::health::health_handler),
    );
    let server = spawn_server(port, app).await;

    let result = movie_catalog::healthcheck_with_port(port).await;
    assert!(result.is_ok(), "Healthcheck should succeed when server is running");

    server.abort();
}

#[tokio::test]
async fn test_healthcheck_fails_when_server_not_running() {
    let port = free_port();

    let result = movie_catalog::healthcheck_with_port(port).await;
    assert!(result.is_err(), "Healthcheck should fail when server is not running");
}

#[tokio::test]
async fn test_healthcheck_fails_on_non_success_status() {
    let port = free_port();
    let app = axum::Router::new().route(
        "/v1/health",
        axum::routing::get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "Unhealthy") }),
    );
    let server = spawn_server(port, app).await;

    let err = movie_catalog::healthcheck_with_port(port).await.unwrap_err();
    assert!(err.to_string().contains("503"));

    server.abort();
}
