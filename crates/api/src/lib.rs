//! HTTP server publishing the AREA platform's `about.json` document.
//!
//! Serves one route, `GET /about.json`, with structured logging (tracing)
//! and optional Prometheus metrics on a separate listener.

pub mod config;
pub mod error;
pub mod routes;

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::{TcpListener, lookup_host};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::ServerError;

/// Creates the Axum application router.
///
/// The `/about.json` handler reads the peer address, so the router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_app() -> Router {
    Router::new()
        .route("/about.json", get(routes::about::get))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Resolves a `"host:port"` string the same way `TcpListener::bind` does.
pub async fn resolve_addr(addr: &str) -> Result<SocketAddr, ServerError> {
    let invalid = |source| ServerError::InvalidAddress {
        addr: addr.to_string(),
        source,
    };
    lookup_host(addr)
        .await
        .map_err(invalid)?
        .next()
        .ok_or_else(|| {
            invalid(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no addresses resolved",
            ))
        })
}

/// Installs the Prometheus recorder with its own HTTP listener on `addr`.
pub async fn install_metrics(addr: &str) -> Result<(), ServerError> {
    let socket = resolve_addr(addr).await?;
    PrometheusBuilder::new()
        .with_http_listener(socket)
        .install()?;
    tracing::info!(addr = %socket, "metrics exporter listening");
    Ok(())
}

/// Serves the application on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(
        listener,
        create_app().into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(ServerError::Serve)
}

/// Binds the configured address and serves until SIGINT or SIGTERM.
pub async fn run(config: Config) -> Result<(), ServerError> {
    if let Some(metrics_addr) = config.metrics_addr() {
        install_metrics(&metrics_addr).await?;
    }

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(%addr, "starting about.json server");

    serve(listener, shutdown_signal()).await
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}
