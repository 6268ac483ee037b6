//! Error types for pixdrop core functionality.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for pixdrop.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File system error: {0}")]
    FileSystem(String),
    #[error("Data parsing error: {0}")]
    Parse(String),
}

/// Result type for pixdrop operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failure while persisting one uploaded image.
///
/// The two variants map onto the two replies the upload channel can send, so
/// they are kept apart rather than folded into [`Error::FileSystem`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// The target file could not be created.
    #[error("could not create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was created but the payload could not be written to it.
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Path of the file the failed operation targeted.
    pub fn path(&self) -> &Path {
        match self {
            StorageError::Create { path, .. } | StorageError::Write { path, .. } => path,
        }
    }
}
