use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_MESSAGE_BYTES, DEFAULT_STATIC_DIR,
    DEFAULT_UPLOAD_DIR, FALLBACK_DOCUMENT,
};
use crate::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration for the pixdrop server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind to.
    pub bind_addr: SocketAddr,

    /// Directory holding the built single-page application.
    pub static_dir: PathBuf,

    /// Directory uploaded images are written to.
    pub upload_dir: PathBuf,

    /// Largest image accepted per message. Larger payloads are rejected
    /// with an error reply and the connection stays open.
    pub max_image_bytes: usize,

    /// Largest WebSocket message the transport will buffer. Exceeding it
    /// fails the connection.
    pub max_message_bytes: usize,

    /// Enable request logging.
    pub enable_request_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080))),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            enable_request_logging: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::FileSystem(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML document. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Path of the document served when no static file matches.
    pub fn fallback_document(&self) -> PathBuf {
        self.static_dir.join(FALLBACK_DOCUMENT)
    }

    /// Check the configuration against the filesystem before serving.
    pub fn validate(&self) -> Result<()> {
        if !self.static_dir.is_dir() {
            return Err(Error::config(format!(
                "static directory {} does not exist or is not a directory",
                self.static_dir.display()
            )));
        }

        let fallback = self.fallback_document();
        if !fallback.is_file() {
            return Err(Error::config(format!(
                "static directory {} has no {}",
                self.static_dir.display(),
                FALLBACK_DOCUMENT
            )));
        }

        if !self.upload_dir.is_dir() {
            return Err(Error::config(format!(
                "upload directory {} does not exist or is not a directory",
                self.upload_dir.display()
            )));
        }

        if self.max_image_bytes == 0 {
            return Err(Error::config("max_image_bytes must be greater than zero"));
        }

        if self.max_message_bytes < self.max_image_bytes {
            return Err(Error::config(format!(
                "max_message_bytes ({}) must be at least max_image_bytes ({})",
                self.max_message_bytes, self.max_image_bytes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_with_index() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("index.html"), "<html></html>").expect("write index");
        dir
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.static_dir, PathBuf::from("build/client"));
        assert_eq!(config.upload_dir, PathBuf::from("."));
        assert!(config.max_message_bytes >= config.max_image_bytes);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml(
            r#"
bind_addr = "127.0.0.1:9000"
static_dir = "/srv/app"
"#,
        )
        .expect("parse");
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.static_dir, PathBuf::from("/srv/app"));
        assert_eq!(config.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
        assert!(config.enable_request_logging);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ServerConfig::from_toml("bind_addr = 12").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn validate_accepts_complete_setup() {
        let site = site_with_index();
        let uploads = tempfile::tempdir().expect("tempdir");
        let config = ServerConfig {
            static_dir: site.path().to_path_buf(),
            upload_dir: uploads.path().to_path_buf(),
            ..ServerConfig::default()
        };
        config.validate().expect("valid config");
    }

    #[test]
    fn validate_rejects_static_dir_without_index() {
        let site = tempfile::tempdir().expect("tempdir");
        let config = ServerConfig {
            static_dir: site.path().to_path_buf(),
            upload_dir: site.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("index.html")));
    }

    #[test]
    fn validate_rejects_message_ceiling_below_image_limit() {
        let site = site_with_index();
        let config = ServerConfig {
            static_dir: site.path().to_path_buf(),
            upload_dir: site.path().to_path_buf(),
            max_image_bytes: 1024,
            max_message_bytes: 512,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn validate_rejects_missing_upload_dir() {
        let site = site_with_index();
        let config = ServerConfig {
            static_dir: site.path().to_path_buf(),
            upload_dir: site.path().join("missing"),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
