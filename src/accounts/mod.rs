//! Account records and the lookup seam used by the auth service.

mod table;

use serde::{Deserialize, Serialize};

pub use table::{AccountSeed, AccountTable, AccountsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Officer,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Officer => "officer",
            Role::Client => "client",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A login-capable account. The email is always stored lowercase.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub email: String,
    /// bcrypt hash, only ever checked through `bcrypt::verify`
    pub password_hash: String,
    pub role: Role,
    pub tenant_id: String,
    pub tenant_name: String,
}

/// Account fields that are safe to hand to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub tenant_id: String,
    pub tenant_name: String,
}

impl From<&Account> for PublicUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            role: account.role,
            tenant_id: account.tenant_id.clone(),
            tenant_name: account.tenant_name.clone(),
        }
    }
}

/// Read-only account lookup.
///
/// Implementations receive an already-normalized (lowercase) email.
pub trait AccountStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<Account>;

    /// Highest bcrypt cost among stored hashes, if known.
    fn max_hash_cost(&self) -> Option<u32> {
        None
    }
}

/// Normalize an email for lookup: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
