use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::Response,
};
use tracing::warn;

use super::config::AssetsState;
use super::response::{file_response, html_response, normalize_path, resolve_path};

/// Serve a file from the static root, or the entry document for anything that
/// is not a regular file under it (client-side routes, directories, traversal).
///
/// A path that cannot be decoded is treated like any other client route.
pub async fn spa_handler(
    State(state): State<AssetsState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let path = path.ok();
    let path = normalize_path(path.as_ref());

    if let Some(file) = resolve_path(&state.root, path) {
        let is_file = tokio::fs::metadata(&file)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);

        if is_file {
            match tokio::fs::read(&file).await {
                Ok(body) => return file_response(path, body),
                Err(e) => warn!(path = %file.display(), error = %e, "Failed to read static file"),
            }
        }
    }

    html_response(state.index_html.clone())
}
