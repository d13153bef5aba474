//! Axum extractors for bearer authentication.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use super::errors::{ApiAuthError, AuthErrorKind};
use super::state::HasAuthBackend;
use crate::accounts::Account;
use crate::jwt::{Claims, JwtError};

/// Authenticated caller: verified claims plus the account they name.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: Claims,
    pub account: Account,
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(parts: &Parts) -> Result<&str, AuthErrorKind> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthErrorKind::NotAuthenticated)?
        .to_str()
        .map_err(|_| AuthErrorKind::MalformedHeader)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthErrorKind::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthErrorKind::MalformedHeader);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthErrorKind::MalformedHeader);
    }
    Ok(token)
}

async fn authenticate_request<S>(
    parts: &Parts,
    state: &S,
) -> Result<AuthenticatedUser, AuthErrorKind>
where
    S: HasAuthBackend + Send + Sync,
{
    let token = bearer_token(parts)?;

    let claims = state.auth().jwt().validate(token).map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        match e {
            JwtError::Expired => AuthErrorKind::TokenExpired,
            _ => AuthErrorKind::InvalidToken,
        }
    })?;

    let account = state
        .auth()
        .accounts()
        .find_by_email(&claims.sub)
        .ok_or(AuthErrorKind::AccountNotFound)?;

    Ok(AuthenticatedUser { claims, account })
}

/// Extractor for API endpoints that require a valid bearer token.
///
/// Only identity is checked; the role claim is not enforced.
pub struct Auth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Auth
where
    S: HasAuthBackend + Send + Sync,
{
    type Rejection = ApiAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authenticate_request(parts, state)
            .await
            .map(Auth)
            .map_err(ApiAuthError::from)
    }
}
