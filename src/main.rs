use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing::{error, info, warn};

use pointage::api::{create_app, AppState};
use pointage::clock::SystemClock;
use pointage::config::ConfigLoader;
use pointage::logging::init_logging;
use pointage::store::AirtableStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load()?;
    init_logging();

    let missing = config.store.missing_settings();
    if !missing.is_empty() {
        // Clock events will answer 500 until these are set.
        warn!(missing = %missing.join(", "), "Record store credentials missing");
    }

    let store = AirtableStore::new(config.store.clone())?;
    let state = AppState::from_parts(Arc::new(store), Arc::new(SystemClock));
    let app = create_app(state, &config.server);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        port = config.server.port,
        static_dir = %config.server.static_dir.display(),
        employees_table = %config.store.employees_table,
        presences_table = %config.store.presences_table,
        "Serveur démarré"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
