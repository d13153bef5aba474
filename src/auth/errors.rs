//! Bearer authentication errors.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Why a bearer token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    NotAuthenticated,
    MalformedHeader,
    InvalidToken,
    TokenExpired,
    AccountNotFound,
}

/// API authentication error (401 with the JSON failure envelope).
#[derive(Debug)]
pub struct ApiAuthError(pub AuthErrorKind);

impl ApiAuthError {
    pub fn kind(&self) -> AuthErrorKind {
        self.0
    }

    fn message(&self) -> &'static str {
        match self.0 {
            AuthErrorKind::NotAuthenticated => "Not authenticated",
            AuthErrorKind::MalformedHeader => "Malformed authorization header",
            AuthErrorKind::InvalidToken | AuthErrorKind::AccountNotFound => "Invalid token",
            AuthErrorKind::TokenExpired => "Token expired",
        }
    }
}

impl From<AuthErrorKind> for ApiAuthError {
    fn from(kind: AuthErrorKind) -> Self {
        Self(kind)
    }
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            success: bool,
            message: &'static str,
        }

        let mut response = (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                success: false,
                message: self.message(),
            }),
        )
            .into_response();

        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Bearer"),
        );

        response
    }
}
