#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use gatehouse::{ServerConfig, accounts::AccountTable, create_app, jwt::JwtConfig};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-jwt-secret-for-testing-only";
pub const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"root\"></div></body></html>";
pub const APP_JS: &str = "console.log('app');";
pub const OUTSIDE_SECRET: &str = "outside-the-static-root";

/// Lowest cost bcrypt accepts, keeps the suite fast
pub const BCRYPT_COST: u32 = 4;

/// Test application plus the temp directory backing its static root.
pub struct TestApp {
    pub app: Router,
    pub jwt: JwtConfig,
    _dir: TempDir,
}

/// Lay out a small frontend bundle:
///
/// ```text
/// <tmp>/secret.txt            (outside the root)
/// <tmp>/build/index.html
/// <tmp>/build/robots.txt
/// <tmp>/build/assets/app-3f2a1c.js
/// <tmp>/build/docs/           (directory only)
/// ```
fn write_bundle(dir: &Path) -> std::path::PathBuf {
    let root = dir.join("build");
    std::fs::create_dir_all(root.join("assets")).unwrap();
    std::fs::create_dir_all(root.join("docs")).unwrap();
    std::fs::write(root.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(root.join("robots.txt"), "User-agent: *").unwrap();
    std::fs::write(root.join("assets/app-3f2a1c.js"), APP_JS).unwrap();
    std::fs::write(dir.join("secret.txt"), OUTSIDE_SECRET).unwrap();
    root
}

pub fn demo_accounts() -> AccountTable {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demo/accounts.json");
    AccountTable::load(&path, BCRYPT_COST).expect("Failed to load demo accounts")
}

pub fn test_config(static_dir: &Path) -> ServerConfig {
    ServerConfig {
        static_dir: static_dir.to_path_buf(),
        accounts: Arc::new(demo_accounts()),
        jwt_secret: JWT_SECRET.to_vec(),
        token_ttl_secs: gatehouse::jwt::DEFAULT_TOKEN_DURATION_SECS,
        bcrypt_cost: BCRYPT_COST,
    }
}

pub fn create_test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = write_bundle(dir.path());
    let app = create_app(&test_config(&root)).expect("Failed to create app");

    TestApp {
        app,
        jwt: JwtConfig::new(JWT_SECRET, gatehouse::jwt::DEFAULT_TOKEN_DURATION_SECS),
        _dir: dir,
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    let body = serde_json::json!({ "email": email, "password": password }).to_string();
    post_json(app, "/api/auth/login", &body).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Log in and return the issued token.
pub async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let response = login(app, email, password).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .expect("token missing")
        .to_string()
}
