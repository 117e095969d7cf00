//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Per-request timeout
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::HeaderValue;
use axum::{BoxError, Router};
use tokio::net::TcpListener;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use super::routes::frontend::FrontendAssets;
use crate::db::repos::ProductStore;

/// Origins allowed when CORS is not permissive
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:5678",
    "http://localhost:8080",
    "http://127.0.0.1:5678",
    "http://127.0.0.1:8080",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5678)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// Deadline for a single request (default: 30s)
    pub request_timeout: Duration,

    /// Built front-end bundle holding `index.html` and `static/`
    pub dist_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5678)),
            cors_permissive: false,
            request_timeout: Duration::from_secs(30),
            dist_dir: PathBuf::from("client/dist"),
        }
    }
}

/// Shared application state
///
/// Built once at startup and handed to every handler behind an `Arc`.
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub frontend: FrontendAssets,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, frontend: FrontendAssets) -> Self {
        Self { store, frontend }
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let timeout = config.request_timeout;
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::health::router())
        .merge(routes::products::router())
        .merge(routes::frontend::router(&state.frontend))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    timeout_error(err, timeout)
                }))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Map a middleware failure onto the JSON error envelope.
fn timeout_error(err: BoxError, after: Duration) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout { after }
    } else {
        ApiError::Internal {
            message: format!("middleware error: {err}"),
        }
    }
}

/// Run the HTTP server.
///
/// # Errors
///
/// Fails before serving if the landing page is missing from `dist_dir`,
/// or if the listener cannot bind.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let store = Arc::new(ProductRepo::new(pool));
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn ProductStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let frontend = FrontendAssets::load(&config.dist_dir).await?;
    let app = build_router(AppState::new(store, frontend), &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing front-end asset {}: {source}", .path.display())]
    MissingAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
