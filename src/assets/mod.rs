//! Static SPA bundle serving with client-side routing fallback.

mod config;
mod handlers;
mod response;

pub use config::{AssetsError, AssetsState};
pub use handlers::spa_handler;
pub use response::{IMMUTABLE_CACHE, NO_CACHE, resolve_path};
