//! Error types for the pixdrop web server.

use std::net::SocketAddr;
use thiserror::Error;

/// Main error type for web operations.
#[derive(Error, Debug)]
pub enum WebError {
    /// The listener could not bind its address.
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Core pixdrop error.
    #[error("Core error: {0}")]
    Core(#[from] pixdrop_core::Error),
}

/// Result alias for web operations.
pub type WebResult<T> = Result<T, WebError>;
