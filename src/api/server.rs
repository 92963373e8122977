use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::{Router, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use super::{
    services::{health, preflight, resolve},
    state::AppState,
};
use crate::config::Config;
use crate::gateway::{HttpExecutor, InstanceRegistry};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the router with all routes and response-header middleware.
///
/// Every response carries permissive cross-origin headers and disables
/// caching; resolved links are time-limited upstream and must not be cached.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/download", post(resolve).options(preflight))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

pub async fn run(address: Option<SocketAddr>) -> Result<(), AnyError> {
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    let bind_addr = address.unwrap_or(config.server.bind_addr);

    // Registry is frozen here; auth keys are resolved from the environment
    // once and never re-read.
    let registry = InstanceRegistry::from_config(&config.instances);
    info!(instances = registry.len(), "Resolver registry initialized");

    let executor =
        HttpExecutor::new().map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    let state = AppState::new(config, registry, Arc::new(executor));
    let app = app(state);

    let listener = TcpListener::bind(bind_addr).await?;
    info!(%bind_addr, "linkgate server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
