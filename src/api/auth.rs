//! Login and current-user endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::error::{ApiError, LOGIN_FAILED};
use crate::accounts::PublicUser;
use crate::auth::{Auth, AuthService};
use crate::impl_has_auth_backend;

#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

impl_has_auth_backend!(AuthState);

pub fn router(state: AuthState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(state)
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Only a JSON object is a login request; serde would otherwise accept a
/// positional array for the struct.
fn parse_login_request(body: Value) -> Result<LoginRequest, ApiError> {
    if !body.is_object() {
        return Err(ApiError::internal(
            "Malformed login request",
            "body is not a JSON object",
            LOGIN_FAILED,
        ));
    }
    serde_json::from_value(body)
        .map_err(|e| ApiError::internal("Malformed login request", e, LOGIN_FAILED))
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    token: String,
    user: PublicUser,
}

async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::internal("Malformed login request", e, LOGIN_FAILED))?;
    let payload = parse_login_request(payload)?;

    let success = state.auth.login(&payload.email, &payload.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        token: success.token,
        user: success.user,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MeResponse {
    success: bool,
    user: PublicUser,
    expires_at: u64,
}

async fn me(Auth(user): Auth) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: PublicUser::from(&user.account),
        expires_at: user.claims.exp,
    })
}
