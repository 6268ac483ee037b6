//! WebSocket image upload and single-page app hosting for pixdrop.
//!
//! One listener carries two independent surfaces: `/ws` accepts binary image
//! messages and writes each to its own file, and every other path is served
//! from the static directory with an `index.html` fallback for client-side
//! routes.

#![deny(unsafe_code)]

/// Static file serving with single-page-app fallback.
pub mod assets;

/// Command-line arguments and configuration layering.
pub mod cli;

/// Error types for web operations.
pub mod error;

/// Router assembly.
pub mod router;

/// Listener bootstrap.
pub mod server;

/// WebSocket upload endpoint.
pub mod upload;

pub use error::{WebError, WebResult};
pub use router::build_router;
pub use server::{serve, WebServer};
