//! WebSocket upload endpoint.
//!
//! Each connection runs a sequential loop: receive one message, persist it as
//! a new file, reply with a text status. Empty messages are skipped without a
//! reply. Persistence failures are reported to the peer and the connection
//! stays open; read failures and disconnects end the loop.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        ConnectInfo, Extension,
    },
    response::IntoResponse,
};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use pixdrop_core::{ImageStore, ServerConfig, StorageError, StoredImage};

/// Reply sent when the image file cannot be created.
pub const SAVE_FAILED_REPLY: &str = "Error: Could not save image.";

/// Reply sent when the image bytes cannot be written.
pub const WRITE_FAILED_REPLY: &str = "Error: Could not write image data.";

/// Status text sent back for one non-empty message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadReply {
    /// The payload was written to `file_name`.
    Saved { file_name: String },
    /// The target file could not be created.
    SaveFailed,
    /// The target file was created but writing failed.
    WriteFailed,
    /// The payload exceeded the per-image limit and was discarded.
    TooLarge { limit: usize },
}

impl fmt::Display for UploadReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadReply::Saved { file_name } => {
                write!(f, "Image '{}' uploaded successfully!", file_name)
            }
            UploadReply::SaveFailed => f.write_str(SAVE_FAILED_REPLY),
            UploadReply::WriteFailed => f.write_str(WRITE_FAILED_REPLY),
            UploadReply::TooLarge { limit } => write!(
                f,
                "Error: Image exceeds the maximum size of {} bytes.",
                limit
            ),
        }
    }
}

/// Shared state for upload connections.
#[derive(Debug, Clone)]
pub struct UploadState {
    store: ImageStore,
    max_image_bytes: usize,
    max_message_bytes: usize,
}

impl UploadState {
    /// Create upload state around an image store.
    pub fn new(store: ImageStore, max_image_bytes: usize, max_message_bytes: usize) -> Self {
        Self {
            store,
            max_image_bytes,
            max_message_bytes: max_message_bytes.max(max_image_bytes),
        }
    }

    /// Create upload state from server configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            ImageStore::new(config.upload_dir.clone()),
            config.max_image_bytes,
            config.max_message_bytes,
        )
    }

    /// Handle one received payload. Returns `None` when no reply is due.
    pub async fn process(&self, payload: &[u8], peer: &str) -> Option<UploadReply> {
        if payload.is_empty() {
            info!("Received empty message from {}, ignoring.", peer);
            return None;
        }

        if payload.len() > self.max_image_bytes {
            warn!(
                "Rejected {} byte message from {} (limit {} bytes)",
                payload.len(),
                peer,
                self.max_image_bytes
            );
            return Some(UploadReply::TooLarge {
                limit: self.max_image_bytes,
            });
        }

        Some(reply_for(self.store.persist(payload).await, peer))
    }
}

/// Map the outcome of one persist onto the reply sent to the peer.
fn reply_for(result: Result<StoredImage, StorageError>, peer: &str) -> UploadReply {
    match result {
        Ok(stored) => {
            info!(
                "Received and saved {} bytes to {} from {}",
                stored.bytes, stored.file_name, peer
            );
            UploadReply::Saved {
                file_name: stored.file_name,
            }
        }
        Err(err @ StorageError::Create { .. }) => {
            error!("Error creating file: {}", err);
            UploadReply::SaveFailed
        }
        Err(err @ StorageError::Write { .. }) => {
            error!("Error writing to file: {}", err);
            UploadReply::WriteFailed
        }
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Extension(state): Extension<Arc<UploadState>>,
) -> impl IntoResponse {
    let peer = connect_info
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown peer".to_string());

    ws.max_message_size(state.max_message_bytes)
        .max_frame_size(state.max_message_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state, peer))
}

/// Handle individual WebSocket connection.
async fn handle_socket(mut socket: WebSocket, state: Arc<UploadState>, peer: String) {
    info!("New upload connection from {}", peer);

    loop {
        let payload = match socket.recv().await {
            Some(Ok(Message::Binary(bytes))) => bytes,
            Some(Ok(Message::Text(text))) => text.into_bytes(),
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | None => {
                info!("Client {} disconnected.", peer);
                break;
            }
            Some(Err(err)) => {
                warn!("Error receiving message from {}: {}", peer, err);
                break;
            }
        };

        let Some(reply) = state.process(&payload, &peer).await else {
            continue;
        };

        if let Err(err) = socket.send(Message::Text(reply.to_string())).await {
            warn!("Error sending reply to {}: {}", peer, err);
            break;
        }
    }
}
