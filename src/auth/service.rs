//! Credential verification and token issuance.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::accounts::{AccountStore, PublicUser, normalize_email};
use crate::jwt::JwtConfig;

/// Why a login did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Anything else. The detail is logged, never returned to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub token: String,
    pub expires_at: u64,
    pub user: PublicUser,
}

/// Verifies credentials against an [`AccountStore`] and issues tokens.
pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    jwt: Arc<JwtConfig>,
    /// Verified against when the email is unknown so both branches cost one bcrypt run.
    /// Hashed at the highest cost found in the store, so it keeps pace with precomputed seeds.
    decoy_hash: String,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        jwt: Arc<JwtConfig>,
        bcrypt_cost: u32,
    ) -> Result<Self, bcrypt::BcryptError> {
        let decoy_cost = accounts.max_hash_cost().unwrap_or(bcrypt_cost);
        let decoy_hash = bcrypt::hash(uuid::Uuid::new_v4().to_string(), decoy_cost)?;
        Ok(Self {
            accounts,
            jwt,
            decoy_hash,
        })
    }

    pub fn accounts(&self) -> &dyn AccountStore {
        self.accounts.as_ref()
    }

    pub fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }

    /// Check `email`/`password` and issue a bearer token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        let email = normalize_email(email);
        info!(email = %email, "Login attempt");

        let account = self.accounts.find_by_email(&email);
        let hash = account
            .as_ref()
            .map_or_else(|| self.decoy_hash.clone(), |a| a.password_hash.clone());

        let password = password.to_owned();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| internal("Password verification task failed", &email, e))?
            .map_err(|e| internal("Password verification failed", &email, e))?;

        let Some(account) = account.filter(|_| verified) else {
            warn!(email = %email, "Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        let issued = self
            .jwt
            .issue(&account)
            .map_err(|e| internal("Failed to issue token", &email, e))?;

        info!(email = %email, role = %account.role, "Login successful");

        Ok(LoginSuccess {
            token: issued.token,
            expires_at: issued.expires_at,
            user: PublicUser::from(&account),
        })
    }
}

fn internal(context: &str, email: &str, e: impl std::fmt::Display) -> AuthError {
    error!(email = %email, error = %e, "{}", context);
    AuthError::Internal(context.to_string())
}
