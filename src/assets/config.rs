use axum::body::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AssetsError {
    #[error("entry document {path} could not be read: {source}")]
    MissingIndex {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Static root plus the pre-read entry document.
#[derive(Clone)]
pub struct AssetsState {
    pub root: Arc<PathBuf>,
    /// `index.html`, read once at startup and served for every SPA fallback
    pub index_html: Bytes,
}

impl AssetsState {
    /// Create a new AssetsState.
    /// Returns an error if `index.html` is missing from the static root.
    pub fn new(root: &Path) -> Result<Self, AssetsError> {
        let index_path = root.join("index.html");
        let index_html = std::fs::read(&index_path).map_err(|source| AssetsError::MissingIndex {
            path: index_path.clone(),
            source,
        })?;

        info!(root = %root.display(), bytes = index_html.len(), "Static assets ready");

        Ok(Self {
            root: Arc::new(root.to_path_buf()),
            index_html: Bytes::from(index_html),
        })
    }
}
