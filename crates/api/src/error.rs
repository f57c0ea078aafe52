//! Server startup and runtime errors.

use std::io;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

/// Errors that stop the server from starting or running.
///
/// The `/about.json` route itself has no failure modes.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not bind to the configured address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// A configured address could not be resolved to a socket address.
    #[error("invalid address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The Prometheus exporter could not be installed.
    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    /// The HTTP server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}
