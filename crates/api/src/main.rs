use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yieldcast_api::config::ServerConfig;
use yieldcast_api::handlers::system::ENDPOINTS;
use yieldcast_api::loader;
use yieldcast_api::router::build_app_router;
use yieldcast_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;

    // --- Tracing ---
    let default_filter = if config.debug {
        "yieldcast_api=debug,yieldcast_core=debug,tower_http=debug"
    } else {
        "yieldcast_api=info,yieldcast_core=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        // Human-readable output while debugging, JSON lines otherwise.
        .with(config.debug.then(tracing_subscriber::fmt::layer))
        .with((!config.debug).then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!(
        host = %config.host,
        port = config.port,
        debug = config.debug,
        schema = %config.schema_variant,
        cors_origins = ?config.cors_origins,
        "Loaded server configuration"
    );

    // --- Models ---
    let service = loader::build_service(&config.model_dir, config.schema_variant);

    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let state = AppState::new(config, service);
    let app = build_app_router(state);

    // --- Start server ---
    for endpoint in ENDPOINTS {
        tracing::debug!(endpoint, "Available endpoint");
    }
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
