//! Axum router configuration for pixdrop.

use axum::{extract::Extension, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use pixdrop_core::ServerConfig;

use crate::assets::static_files_service;
use crate::upload::{ws_handler, UploadState};

/// Build the application router: `/ws` for uploads, static assets for the rest.
pub fn build_router(config: &ServerConfig) -> Router {
    let upload_state = Arc::new(UploadState::from_config(config));

    let mut router = Router::new()
        .route("/ws", get(ws_handler))
        .layer(Extension(upload_state))
        // Serve static files under root (catch-all for frontend)
        .merge(static_files_service(&config.static_dir));

    // Add request logging
    if config.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}
