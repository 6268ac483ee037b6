//! Core types, errors, and configuration for pixdrop
//!
//! This crate holds everything that does not depend on HTTP: the server
//! configuration, the error types shared by the workspace, and the image
//! store that names and writes uploaded files.

pub mod config;
pub mod constants;
pub mod error;
pub mod storage;

// Re-exports for convenience
pub use config::ServerConfig;
pub use error::{Error, Result, StorageError};
pub use storage::{ImageStore, StoredImage};
