//! Static file serving and asset management.

use axum::{
    extract::Request,
    http::Method,
    response::{IntoResponse, Response},
    Router,
};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use pixdrop_core::constants::FALLBACK_DOCUMENT;

/// Files under the static directory, with `index.html` standing in for any
/// path that does not resolve to a file.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    files: ServeDir<ServeFile>,
}

impl StaticAssets {
    /// Serve `static_dir`, falling back to `static_dir/index.html`.
    pub fn new(static_dir: impl AsRef<Path>) -> Self {
        let static_dir = static_dir.as_ref();
        let fallback = ServeFile::new(static_dir.join(FALLBACK_DOCUMENT));

        Self {
            files: ServeDir::new(static_dir).fallback(fallback),
        }
    }

    /// Answer one request.
    ///
    /// `ServeDir` performs the existence check. Paths it rejects as invalid and
    /// lookups failing with not-found, not-a-directory or permission-denied are
    /// handed to the fallback document; other I/O errors stay with `ServeDir`
    /// and become a server error.
    pub async fn serve(&self, request: Request) -> Response {
        match self.files.clone().oneshot(as_read_request(request)).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }
}

/// Router that answers every request from the static directory.
pub fn static_files_service(static_dir: &Path) -> Router {
    let assets = StaticAssets::new(static_dir);

    Router::new().fallback(move |request: Request| {
        let assets = assets.clone();
        async move { assets.serve(request).await }
    })
}

// The file services only answer GET and HEAD; everything else is read as GET
// so the fallback document is served whatever the method.
fn as_read_request(mut request: Request) -> Request {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        *request.method_mut() = Method::GET;
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(method: Method) -> Request {
        axum::http::Request::builder()
            .method(method)
            .uri("/anything")
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn test_write_methods_are_read_as_get() {
        assert_eq!(as_read_request(request(Method::POST)).method(), Method::GET);
        assert_eq!(as_read_request(request(Method::DELETE)).method(), Method::GET);
    }

    #[test]
    fn test_head_is_preserved() {
        assert_eq!(as_read_request(request(Method::HEAD)).method(), Method::HEAD);
        assert_eq!(as_read_request(request(Method::GET)).method(), Method::GET);
    }
}
