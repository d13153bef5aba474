use axum::{
    body::Bytes,
    http::header,
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};

/// Cache duration for immutable hashed assets (1 year)
pub const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";
/// Cache duration for HTML files (no cache, always revalidate)
pub const NO_CACHE: &str = "no-cache";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Serve the SPA entry document.
#[inline]
pub fn html_response(body: Bytes) -> Response {
    (
        [
            (header::CONTENT_TYPE, HTML_CONTENT_TYPE),
            (header::CACHE_CONTROL, NO_CACHE),
        ],
        body,
    )
        .into_response()
}

/// Serve a file read from the static root.
pub fn file_response(path: &str, body: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    // Hashed assets in /assets/ are immutable, everything else is revalidated
    let cache_control = if path.starts_with("assets/") {
        IMMUTABLE_CACHE
    } else {
        NO_CACHE
    };
    (
        [
            (header::CONTENT_TYPE, mime.as_ref()),
            (header::CACHE_CONTROL, cache_control),
        ],
        body,
    )
        .into_response()
}

/// Normalize a path, defaulting to "index.html" if empty or missing
#[inline]
pub fn normalize_path(path: Option<&axum::extract::Path<String>>) -> &str {
    match path.map(|p| p.as_str()) {
        Some(p) if !p.is_empty() => p,
        _ => "index.html",
    }
}

/// Join a request path onto `root`, refusing anything that could leave it.
///
/// Returns `None` for `..`, absolute, or prefixed components.
pub fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(request_path).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}
