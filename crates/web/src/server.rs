//! HTTP server bootstrap for pixdrop.

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use pixdrop_core::ServerConfig;

use crate::error::{WebError, WebResult};
use crate::router::build_router;

/// HTTP server carrying the upload endpoint and the static assets.
pub struct WebServer {
    config: ServerConfig,
    router: Router,
}

impl WebServer {
    /// Validate the configuration and build the router.
    pub fn new(config: ServerConfig) -> WebResult<Self> {
        config.validate()?;
        let router = build_router(&config);

        Ok(Self { config, router })
    }

    /// Bind the configured address and serve until the process is killed.
    pub async fn run(self) -> WebResult<()> {
        let addr = self.config.bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| WebError::Bind { addr, source })?;

        info!("Static directory: {}", self.config.static_dir.display());
        info!("Upload directory: {}", self.config.upload_dir.display());
        info!("Server listening on http://{}", addr);

        serve(listener, self.router).await
    }
}

/// Serve `router` on an already bound listener.
///
/// Peer addresses are exposed to handlers through `ConnectInfo`.
pub async fn serve(listener: TcpListener, router: Router) -> WebResult<()> {
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(WebError::Serve)
}
