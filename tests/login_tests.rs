mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_app, get, login, login_token, post_json};

const DEMO_ACCOUNTS: [(&str, &str, &str); 3] = [
    ("admin@securetech.com", "admin123", "admin"),
    ("officer@securetech.com", "officer123", "officer"),
    ("client@securetech.com", "client123", "client"),
];

#[tokio::test]
async fn test_admin_login_success() {
    let ctx = create_test_app();

    let response = login(&ctx.app, "admin@securetech.com", "admin123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["user"]["id"], "1");
    assert_eq!(json["user"]["email"], "admin@securetech.com");
    assert_eq!(json["user"]["role"], "admin");
    assert_eq!(json["user"]["tenantId"], "1");
    assert_eq!(json["user"]["tenantName"], "SecureTech Demo Company");
}

#[tokio::test]
async fn test_every_account_gets_token_for_its_email() {
    let ctx = create_test_app();

    for (email, password, role) in DEMO_ACCOUNTS {
        let response = login(&ctx.app, email, password).await;
        assert_eq!(response.status(), StatusCode::OK, "login failed for {email}");

        let json = body_json(response).await;
        assert_eq!(json["user"]["role"], role);

        let claims = ctx.jwt.validate(json["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.sub, email);
        assert_eq!(claims.role.as_str(), role);
    }
}

#[tokio::test]
async fn test_every_account_rejects_wrong_password() {
    let ctx = create_test_app();

    for (email, _, _) in DEMO_ACCOUNTS {
        let response = login(&ctx.app, email, "wrong").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_unknown_email_matches_wrong_password_response() {
    let ctx = create_test_app();

    let wrong = login(&ctx.app, "admin@securetech.com", "wrong").await;
    let unknown = login(&ctx.app, "nobody@securetech.com", "admin123").await;

    assert_eq!(wrong.status(), unknown.status());
    assert_eq!(body_json(wrong).await, body_json(unknown).await);
}

#[tokio::test]
async fn test_email_lookup_is_case_insensitive() {
    let ctx = create_test_app();

    let response = login(&ctx.app, "ADMIN@securetech.com", "admin123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "admin@securetech.com");
    let claims = ctx.jwt.validate(json["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, "admin@securetech.com");
}

#[tokio::test]
async fn test_response_never_contains_password_hash() {
    let ctx = create_test_app();

    let response = login(&ctx.app, "officer@securetech.com", "officer123").await;
    let text = common::body_string(response).await;

    assert!(!text.contains("$2"), "bcrypt hash leaked: {text}");
    assert!(!text.contains("password"));
}

#[tokio::test]
async fn test_token_expires_in_24_hours() {
    let ctx = create_test_app();

    let token = login_token(&ctx.app, "client@securetech.com", "client123").await;
    let claims = ctx.jwt.validate(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    assert!(ctx.jwt.validate_at(&token, claims.iat + 60 * 60).is_ok());
    assert!(ctx.jwt.validate_at(&token, claims.iat + 25 * 60 * 60).is_err());
}

#[tokio::test]
async fn test_missing_fields_are_invalid_credentials() {
    let ctx = create_test_app();

    let response = post_json(&ctx.app, "/api/auth/login", "{}").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_malformed_body_is_generic_failure() {
    let ctx = create_test_app();

    for body in [
        "not json",
        "42",
        "null",
        "[]",
        r#"["admin@securetech.com", "admin123"]"#,
        r#"{"email": null, "password": "x"}"#,
    ] {
        let response = post_json(&ctx.app, "/api/auth/login", body).await;
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "body: {body}"
        );

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Login failed");
    }
}

#[tokio::test]
async fn test_missing_content_type_is_generic_failure() {
    let ctx = create_test_app();

    let response = tower::ServiceExt::oneshot(
        ctx.app.clone(),
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .body(axum::body::Body::from(
                r#"{"email":"admin@securetech.com","password":"admin123"}"#,
            ))
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["message"], "Login failed");
}

#[tokio::test]
async fn test_login_requires_post() {
    let ctx = create_test_app();

    let response = get(&ctx.app, "/api/auth/login").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
