//! JWT token generation and validation.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::accounts::{Account, Role};

/// Default token lifetime: 24 hours
pub const DEFAULT_TOKEN_DURATION_SECS: u64 = 24 * 60 * 60;

/// JWT claims for bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,
    /// Account role, informational only
    pub role: Role,
    /// Tenant the account belongs to
    pub tenant_id: String,
    /// JWT ID, unique per token
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Configuration for JWT operations.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    duration: u64,
}

/// Result of issuing a token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The JWT token string
    pub token: String,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: u64,
    /// Token duration in seconds
    pub duration: u64,
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secret and token lifetime.
    pub fn new(secret: &[u8], duration_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            duration: duration_secs,
        }
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Issue a token for an account, valid from now.
    pub fn issue(&self, account: &Account) -> Result<IssuedToken, JwtError> {
        self.issue_at(account, now_secs()?)
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, account: &Account, now: u64) -> Result<IssuedToken, JwtError> {
        let exp = now.checked_add(self.duration).ok_or(JwtError::TimeError)?;

        let claims = Claims {
            sub: account.email.clone(),
            role: account.role,
            tenant_id: account.tenant_id.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now,
            exp,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            token,
            expires_at: exp,
            duration: self.duration,
        })
    }

    /// Validate and decode a token against the current time.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_at(token, now_secs()?)
    }

    /// Validate and decode a token as if the current time were `now`.
    ///
    /// A token is expired once `now >= exp`. No leeway.
    pub fn validate_at(&self, token: &str, now: u64) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Expiry is checked below against the caller's clock.
        validation.validate_exp = false;

        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(JwtError::Decoding)?;

        if now >= token_data.claims.exp {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }
}

fn now_secs() -> Result<u64, JwtError> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| JwtError::TimeError)?
        .as_secs())
}

/// Errors that can occur during JWT operations.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("Failed to decode token: {0}")]
    Decoding(jsonwebtoken::errors::Error),
    #[error("Token expired")]
    Expired,
    #[error("System time error")]
    TimeError,
}
