pub mod accounts;
pub mod api;
pub mod assets;
pub mod auth;
pub mod cli;
pub mod jwt;

use accounts::AccountStore;
use api::create_api_router;
use assets::{AssetsError, AssetsState, spa_handler};
use auth::AuthService;
use axum::{Router, routing::get};
use jwt::JwtConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ServerConfig {
    /// Root of the pre-built frontend bundle (must contain index.html)
    pub static_dir: PathBuf,
    /// Account lookup used by login
    pub accounts: Arc<dyn AccountStore>,
    /// JWT secret for signing tokens
    pub jwt_secret: Vec<u8>,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    /// bcrypt cost for plaintext seeds, and for the decoy hash when the store reports none
    pub bcrypt_cost: u32,
}

/// Errors that prevent the application from being assembled.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Assets(#[from] AssetsError),
    #[error("failed to prepare password verifier: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Create the application router with the given configuration.
pub fn create_app(config: &ServerConfig) -> Result<Router, StartupError> {
    let jwt = Arc::new(JwtConfig::new(&config.jwt_secret, config.token_ttl_secs));
    let auth = Arc::new(AuthService::new(
        config.accounts.clone(),
        jwt,
        config.bcrypt_cost,
    )?);

    let assets = AssetsState::new(&config.static_dir)?;

    // Any route not claimed by the API falls through to the SPA
    let spa_routes = Router::new()
        .route("/", get(spa_handler))
        .route("/{*path}", get(spa_handler))
        .with_state(assets);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", create_api_router(auth))
        .merge(spa_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Run the server on the given listener. This function blocks until the server exits.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let app = create_app(&config).map_err(std::io::Error::other)?;
    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, make_service).await
}

/// Start the server on the given port in a background task. Use port 0 to let the OS choose a random port.
/// Returns the actual address the server is listening on.
/// Note: For production use, prefer `run_server` directly in main.
pub async fn start_server(
    config: ServerConfig,
    port: u16,
) -> Result<(tokio::task::JoinHandle<()>, SocketAddr), std::io::Error> {
    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    let local_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = run_server(config, listener).await {
            tracing::error!(error = %e, "Server error");
        }
    });

    Ok((handle, local_addr))
}
