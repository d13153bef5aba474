//! Shared error handling for API endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::auth::AuthError;

/// Message for any login failure that is not a credential mismatch.
pub const LOGIN_FAILED: &str = "Login failed";
/// Message for a credential mismatch, identical for unknown email and wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// API error type with automatic response conversion.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Log `e` under `context` and answer with the generic `public` message.
    pub fn internal(context: &str, e: impl std::fmt::Display, public: &str) -> Self {
        error!(error = %e, "{}", context);
        Self::Internal(public.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => Self::unauthorized(INVALID_CREDENTIALS),
            // Already logged by the auth service
            AuthError::Internal(_) => Self::Internal(LOGIN_FAILED.into()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (
            status,
            Json(ErrorResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}
