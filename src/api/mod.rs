mod auth;
mod error;
mod health;

use axum::Router;
use std::sync::Arc;

use crate::auth::AuthService;

pub use error::{ApiError, INVALID_CREDENTIALS, LOGIN_FAILED};

/// Create the API router.
pub fn create_api_router(auth: Arc<AuthService>) -> Router {
    let auth_state = auth::AuthState { auth };

    Router::new()
        .nest("/health", health::router())
        .nest("/auth", auth::router(auth_state))
}
