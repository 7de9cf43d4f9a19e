//! SNOMED CT seeding control surface binary.

use std::sync::Arc;

use snomed_checkpoint::CheckpointStore;
use snomed_graph::InMemoryGraph;
use snomed_pipeline::JobController;
use snomed_service::SnomedConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CONFIG_PATH: &str = "snomed.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config_path = std::env::var("SNOMED_CONFIG_PATH")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = SnomedConfig::load_or_default(std::path::Path::new(&config_path))?;

    tracing::info!(
        import_directory = %config.import_directory.display(),
        "loaded configuration"
    );

    let snapshot_directory = config.snapshot_directory().to_string_lossy().to_string();
    let default_options = (&config).into();

    let graph = Arc::new(InMemoryGraph::new());
    let checkpoint_store = Arc::new(CheckpointStore::new());
    let controller = Arc::new(JobController::new(
        graph,
        checkpoint_store,
        snapshot_directory.clone(),
        default_options,
    ));

    let app = axum::Router::new().nest("/api/snomed", snomed_service::router(controller));

    let port = std::env::var("SNOMED_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!(%addr, %snapshot_directory, "starting SNOMED CT control surface");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
