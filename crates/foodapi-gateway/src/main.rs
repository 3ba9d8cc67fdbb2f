//! foodapi gateway
//!
//! - `GET /health`, `POST /orders`
//! - Prometheus scrape endpoint (default `/metrics`)
//! - Config from `foodapi.yaml` when present, defaults otherwise

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foodapi_core::error::{FoodApiError, Result};
use foodapi_gateway::{app_state::AppState, config, router};

const CONFIG_PATH: &str = "foodapi.yaml";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.client_code().as_str(), "foodapi-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_or_default(CONFIG_PATH)?;
    let listen = cfg.server.listen_addr()?;
    let metrics_path = cfg.metrics.path.clone();

    let state = AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| FoodApiError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, %metrics_path, "foodapi-gateway starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FoodApiError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
