//! Command-line arguments for the pixdrop server.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then flags or their environment variables.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

use pixdrop_core::ServerConfig;

/// pixdrop server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logging verbosity
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "PIXDROP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "PIXDROP_BIND")]
    pub bind: Option<SocketAddr>,

    /// Directory holding the built single-page application
    #[arg(long, env = "PIXDROP_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Directory uploaded images are written to
    #[arg(long, env = "PIXDROP_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Largest accepted image in bytes
    #[arg(long, env = "PIXDROP_MAX_IMAGE_BYTES")]
    pub max_image_bytes: Option<usize>,

    /// Disable per-request logging
    #[arg(long)]
    pub no_request_log: bool,
}

impl Cli {
    /// Build the effective configuration.
    pub fn load_config(&self) -> pixdrop_core::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Apply flag and environment overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(dir) = &self.static_dir {
            config.static_dir = dir.clone();
        }
        if let Some(dir) = &self.upload_dir {
            config.upload_dir = dir.clone();
        }
        if let Some(limit) = self.max_image_bytes {
            config.max_image_bytes = limit;
            config.max_message_bytes = config.max_message_bytes.max(limit);
        }
        if self.no_request_log {
            config.enable_request_logging = false;
        }
    }

    /// Log level selected by `-v` count.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
