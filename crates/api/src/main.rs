use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use acfruit_api::config::ServerConfig;
use acfruit_api::router::{build_app_router, build_config_error_router};
use acfruit_api::state::AppState;
use acfruit_db::SupabaseClient;
use acfruit_store::Stores;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "acfruit_api=debug,acfruit_store=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let (host, port, app) = match ServerConfig::from_env() {
        Ok(config) => {
            tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
            let (host, port) = (config.host.clone(), config.port);
            (host, port, build_app(config).await?)
        }
        Err(error) => {
            tracing::error!(%error, "Configuration error, serving the configuration-error page only");
            let (host, port) = ServerConfig::fallback_bind();
            (host, port, build_config_error_router(error))
        }
    };

    // --- Start server ---
    let addr = SocketAddr::new(host.parse::<IpAddr>()?, port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Build the stores, run the initial load, and assemble the router.
///
/// Serving starts only once every store load has settled.
async fn build_app(config: ServerConfig) -> Result<Router, BoxError> {
    let client = Arc::new(SupabaseClient::new(&config.supabase)?);
    tracing::info!(url = %config.supabase.url, "Persistence client created");

    let stores = Arc::new(Stores::new(client.clone(), client.clone()));
    let report = stores.load_all().await;
    if report.is_clean() {
        tracing::info!("All stores loaded");
    } else {
        tracing::warn!(failures = ?report.failures, "Some stores failed to load");
    }

    let state = AppState::new(stores, client, config);
    Ok(build_app_router(state))
}

/// Wait for SIGINT or SIGTERM.
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
