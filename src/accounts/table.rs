//! In-memory account table loaded from a JSON seed file.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{Account, AccountStore, Role, normalize_email};

#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    #[error("failed to read accounts file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse accounts file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("account {id} has an empty email")]
    EmptyEmail { id: String },
    #[error("duplicate account email: {0}")]
    DuplicateEmail(String),
    #[error("account {0} must set exactly one of `password` or `password_hash`")]
    AmbiguousSecret(String),
    #[error("account {email} has an invalid password hash: {source}")]
    InvalidHash {
        email: String,
        source: bcrypt::BcryptError,
    },
    #[error("failed to hash password for {email}: {source}")]
    Hash {
        email: String,
        source: bcrypt::BcryptError,
    },
}

/// One entry of the accounts file.
///
/// A seed carries either a precomputed bcrypt `password_hash` or a plaintext
/// `password` that is hashed at load time.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSeed {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
    pub role: Role,
    pub tenant_id: String,
    pub tenant_name: String,
}

/// Fixed account table keyed by lowercase email.
#[derive(Debug, Clone, Default)]
pub struct AccountTable {
    accounts: HashMap<String, Account>,
}

impl AccountTable {
    /// Build a table from seeds, hashing plaintext passwords with `bcrypt_cost`.
    pub fn from_seeds(seeds: Vec<AccountSeed>, bcrypt_cost: u32) -> Result<Self, AccountsError> {
        let mut accounts = HashMap::with_capacity(seeds.len());

        for seed in seeds {
            let email = normalize_email(&seed.email);
            if email.is_empty() {
                return Err(AccountsError::EmptyEmail { id: seed.id });
            }
            if accounts.contains_key(&email) {
                return Err(AccountsError::DuplicateEmail(email));
            }

            let password_hash = match (seed.password, seed.password_hash) {
                (Some(password), None) => {
                    bcrypt::hash(password, bcrypt_cost).map_err(|source| AccountsError::Hash {
                        email: email.clone(),
                        source,
                    })?
                }
                (None, Some(hash)) => {
                    hash.parse::<bcrypt::HashParts>()
                        .map_err(|source| AccountsError::InvalidHash {
                            email: email.clone(),
                            source,
                        })?;
                    hash
                }
                _ => return Err(AccountsError::AmbiguousSecret(email)),
            };

            accounts.insert(
                email.clone(),
                Account {
                    id: seed.id,
                    email,
                    password_hash,
                    role: seed.role,
                    tenant_id: seed.tenant_id,
                    tenant_name: seed.tenant_name,
                },
            );
        }

        Ok(Self { accounts })
    }

    /// Parse a JSON array of seeds.
    pub fn from_json(json: &str, bcrypt_cost: u32) -> Result<Self, AccountsError> {
        let seeds: Vec<AccountSeed> = serde_json::from_str(json)?;
        Self::from_seeds(seeds, bcrypt_cost)
    }

    /// Load the accounts file at `path`.
    pub fn load(path: &Path, bcrypt_cost: u32) -> Result<Self, AccountsError> {
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json, bcrypt_cost)?;
        info!(path = %path.display(), count = table.len(), "Accounts loaded");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for AccountTable {
    fn find_by_email(&self, email: &str) -> Option<Account> {
        self.accounts.get(email).cloned()
    }

    fn max_hash_cost(&self) -> Option<u32> {
        self.accounts
            .values()
            .filter_map(|account| account.password_hash.parse::<bcrypt::HashParts>().ok())
            .map(|parts| parts.get_cost())
            .max()
    }
}
