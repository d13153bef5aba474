//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use crate::accounts::AccountTable;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Ten years.
const MAX_TOKEN_TTL_HOURS: u64 = 87_600;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "gatehouse",
    about = "Serves a single-page app and issues bearer tokens for demo accounts"
)]
pub struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Directory holding the built frontend (must contain index.html)
    #[arg(short, long, env = "STATIC_DIR", default_value = "frontend/build")]
    pub static_dir: PathBuf,

    /// JSON file with the account table
    #[arg(short, long, env = "ACCOUNTS_FILE", default_value = "demo/accounts.json")]
    pub accounts: PathBuf,

    /// Lifetime of issued tokens in hours
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value = "24",
        value_parser = clap::value_parser!(u64).range(1..=MAX_TOKEN_TTL_HOURS))]
    pub token_ttl_hours: u64,

    /// bcrypt cost used when hashing plaintext account passwords
    #[arg(long, env = "BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST,
        value_parser = clap::value_parser!(u32).range(4..=31))]
    pub bcrypt_cost: u32,

    /// Path to file containing JWT secret. Prefer using JWT_SECRET env var instead
    #[arg(long)]
    pub jwt_secret_file: Option<String>,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Initialize logging based on the specified format.
/// The level comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Load JWT secret from environment variable or file.
/// Returns None and logs an error if the secret cannot be loaded.
pub fn load_jwt_secret(jwt_secret_file: Option<&str>) -> Option<String> {
    let secret = if let Ok(secret) = std::env::var("JWT_SECRET") {
        // Clear the environment variable to prevent leaking
        // SAFETY: We're single-threaded at this point during startup,
        // and no other code is reading this environment variable.
        unsafe { std::env::remove_var("JWT_SECRET") };
        secret
    } else if let Some(path) = jwt_secret_file {
        match std::fs::read_to_string(path) {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                error!(path = %path, error = %e, "Failed to read JWT secret file");
                return None;
            }
        }
    } else {
        error!(
            "JWT secret is required. Set JWT_SECRET environment variable (recommended) or use --jwt-secret-file"
        );
        return None;
    };

    if !secret_long_enough(&secret) {
        error!(
            "JWT secret is shorter than {} characters. Use a longer secret",
            MIN_JWT_SECRET_LENGTH
        );
        return None;
    }

    Some(secret)
}

fn secret_long_enough(secret: &str) -> bool {
    secret.len() >= MIN_JWT_SECRET_LENGTH
}

/// Load the account table, logging errors if it fails.
pub fn load_accounts(path: &Path, bcrypt_cost: u32) -> Option<AccountTable> {
    match AccountTable::load(path, bcrypt_cost) {
        Ok(table) if table.is_empty() => {
            error!(path = %path.display(), "Accounts file contains no accounts");
            None
        }
        Ok(table) => Some(table),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to load accounts");
            None
        }
    }
}

/// Build ServerConfig from validated arguments.
pub fn build_config(args: &Args, accounts: AccountTable, jwt_secret: String) -> ServerConfig {
    let token_ttl_secs = args.token_ttl_hours * 60 * 60;
    info!(
        static_dir = %args.static_dir.display(),
        token_ttl_hours = args.token_ttl_hours,
        "Configuration loaded"
    );

    ServerConfig {
        static_dir: args.static_dir.clone(),
        accounts: Arc::new(accounts),
        jwt_secret: jwt_secret.into_bytes(),
        token_ttl_secs,
        bcrypt_cost: args.bcrypt_cost,
    }
}
