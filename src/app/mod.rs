mod router;
pub mod server;
mod state;
pub mod tracing;

pub use router::{ingest_router, main_router, movies_router};
pub use state::AppState;

use crate::config;
use crate::error::ServiceError;
use crate::pipeline::IngestOutcome;
use tokio_util::sync::CancellationToken;

/// Application entry point. Handles the `healthcheck` and `ingest <movie_id>`
/// subcommands, otherwise initializes tracing and configuration and serves HTTP.
pub async fn run() -> Result<(), ServiceError> {
    let args: Vec<String> = std::env::args().collect();

    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if args.get(1).map(String::as_str) == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Healthcheck failed: {e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings =
        config::get_configuration().map_err(|e| ServiceError::Config(e.to_string()))?;
    ::tracing::info!("Loaded settings");

    let app_state = AppState::from_settings(&settings)?;
    if settings.provision_on_startup {
        app_state.provision().await;
    }

    if args.get(1).map(String::as_str) == Some("ingest") {
        let Some(movie_id) = args.get(2) else {
            eprintln!("usage: movie-catalog ingest <movie_id>");
            std::process::exit(2)
        };
        match run_ingest(&app_state, movie_id).await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e:#}");
                std::process::exit(1)
            }
        }
    }

    let app = router::main_router(&app_state);
    server::serve(app, settings.http_port, CancellationToken::new()).await
}

/// One-shot ingestion from the command line. A catalog miss is reported as a
/// failure so scripts can tell it apart from a stored movie.
async fn run_ingest(state: &AppState, movie_id: &str) -> anyhow::Result<()> {
    match state.pipeline.ingest(movie_id).await? {
        IngestOutcome::Stored(movie) => {
            println!("{}", serde_json::to_string_pretty(&movie)?);
            Ok(())
        }
        IngestOutcome::NotFound => anyhow::bail!("movie {movie_id} not found in catalog"),
    }
}
