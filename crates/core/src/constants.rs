//! Application constants and configuration defaults.

/// Default HTTP listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default directory holding the built single-page application.
pub const DEFAULT_STATIC_DIR: &str = "build/client";

/// Default directory uploaded images are written to.
pub const DEFAULT_UPLOAD_DIR: &str = ".";

/// Document served when a request path matches no static file.
pub const FALLBACK_DOCUMENT: &str = "index.html";

/// Prefix of every uploaded image file name.
pub const IMAGE_FILE_PREFIX: &str = "received_image_";

/// Extension applied to uploaded images regardless of their content.
pub const IMAGE_FILE_EXTENSION: &str = "png";

/// Largest image accepted per message (32 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 32 * 1024 * 1024;

/// Largest WebSocket message the transport will buffer (64 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 64 * 1024 * 1024;

/// Number of suffixed names tried after a timestamp name is already taken.
pub const MAX_NAME_ATTEMPTS: u32 = 64;
