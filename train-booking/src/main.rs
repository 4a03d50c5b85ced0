use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use train_booking::catalog::Catalog;
use train_booking::config::AppConfig;
use train_booking::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "train_booking=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config =
        AppConfig::from_env().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "Loading catalog");
            Catalog::from_json_file(path)
                .inspect_err(|e| error!(error = %e, "Failed to load catalog"))?
        }
        None => Catalog::builtin(),
    };
    info!(
        stations = catalog.stations().len(),
        trains = catalog.trains().len(),
        "Catalog ready"
    );

    let addr = config.addr;
    let app = create_router(AppState::new(catalog, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Train booking server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
