mod common;

use alumease::auth::TokenClaims;
use common::{read, spawn_app, ADMIN_EMAIL, ADMIN_PASSWORD};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_then_login() {
    let app = spawn_app().await;

    let (status, body) = read(
        app.post(
            "/api/user/register",
            None,
            json!({ "name": "A", "email": "a@x.com", "password": "password1" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = read(
        app.post(
            "/api/user/login",
            None,
            json!({ "email": "a@x.com", "password": "password1" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"], json!({ "name": "A", "email": "a@x.com" }));

    let token = body["token"].as_str().unwrap();
    match app.state.tokens.decode(token).unwrap() {
        TokenClaims::User(claims) => assert_eq!(claims.exp - claims.iat, 28 * 24 * 60 * 60),
        other => panic!("expected a user token, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_email_is_refused_without_overwriting() {
    let app = spawn_app().await;
    app.register("A", "a@x.com", "password1").await;

    let (status, body) = read(
        app.post(
            "/api/user/register",
            None,
            json!({ "name": "Impostor", "email": "A@X.com", "password": "password2" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already exists");

    let (status, body) = read(
        app.post(
            "/api/user/login",
            None,
            json!({ "email": "a@x.com", "password": "password1" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "A");
}

#[tokio::test]
async fn password_length_boundary() {
    let app = spawn_app().await;

    let (status, body) = read(
        app.post(
            "/api/user/register",
            None,
            json!({ "name": "B", "email": "b@x.com", "password": "1234567" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password length should be atleast 8");

    let (status, _) = read(
        app.post(
            "/api/user/register",
            None,
            json!({ "name": "B", "email": "b@x.com", "password": "12345678" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn registration_reports_first_failed_check() {
    let app = spawn_app().await;

    let (status, body) = read(
        app.post("/api/user/register", None, json!({ "email": "nope" }))
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "message": "Missing Detail" }));

    let (_, body) = read(
        app.post(
            "/api/user/register",
            None,
            json!({ "name": "C", "email": "nope", "password": "x" }),
        )
        .await,
    )
    .await;
    assert_eq!(body["message"], "Enter a valid email");
}

#[tokio::test]
async fn user_login_failures_are_distinguished() {
    let app = spawn_app().await;
    app.register("A", "a@x.com", "password1").await;

    let (status, body) = read(
        app.post("/api/user/login", None, json!({ "email": "a@x.com" }))
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing details");

    let (status, body) = read(
        app.post(
            "/api/user/login",
            None,
            json!({ "email": "ghost@x.com", "password": "password1" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = read(
        app.post(
            "/api/user/login",
            None,
            json!({ "email": "a@x.com", "password": "password2" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn admin_login_issues_token_for_configured_email() {
    let app = spawn_app().await;

    let (status, body) = read(
        app.post(
            "/api/admin/login",
            None,
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let token = body["token"].as_str().unwrap();
    assert_eq!(body["authHeader"], format!("Bearer {token}"));
    match app.state.tokens.decode(token).unwrap() {
        TokenClaims::Admin(claims) => {
            assert_eq!(claims.email, ADMIN_EMAIL);
            assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        }
        other => panic!("expected an admin token, got {other:?}"),
    }
}

#[tokio::test]
async fn admin_login_failures_look_identical() {
    let app = spawn_app().await;
    let attempts = [
        json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        json!({ "email": "someone@else.dev", "password": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL.to_uppercase(), "password": ADMIN_PASSWORD }),
        json!({}),
    ];

    for attempt in attempts {
        let (status, body) = read(app.post("/api/admin/login", None, attempt).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Invalid Credentials" })
        );
    }
}

#[tokio::test]
async fn admin_login_hides_body_shape_errors() {
    let app = spawn_app().await;
    let attempts = [
        json!({ "email": null, "password": "x" }),
        json!({ "email": 5, "password": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL, "password": 12345678 }),
        json!(["not", "an", "object"]),
    ];

    for attempt in attempts {
        let (status, body) = read(app.post("/api/admin/login", None, attempt).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Invalid Credentials" })
        );
    }

    let response = app
        .http
        .post(app.url("/api/admin/login"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid Credentials");
}

#[tokio::test]
async fn guards_keep_roles_apart() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let user = app.register("A", "a@x.com", "password1").await;

    assert_eq!(
        app.get("/api/admin/profile", Some(&admin)).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        app.get("/api/user/profile", Some(&user)).await.status(),
        StatusCode::OK
    );

    let (status, body) = read(app.get("/api/admin/profile", Some(&user)).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized");

    let (status, body) = read(app.get("/api/user/profile", Some(&admin)).await).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid or expired token.");
}

#[tokio::test]
async fn guards_reject_missing_and_forged_tokens() {
    let app = spawn_app().await;

    let (status, body) = read(app.get("/api/admin/profile", None).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token, authorization denied");

    let (status, body) = read(app.get("/api/user/profile", None).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access denied. No token provided.");

    let (status, body) = read(app.get("/api/admin/profile", Some("not.a.jwt")).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, token failed");

    let (status, _) = read(app.get("/api/user/profile", Some("not.a.jwt")).await).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_guard_checks_the_configured_email() {
    let app = spawn_app().await;
    let token = app
        .state
        .tokens
        .issue_admin_token("someone@else.dev")
        .unwrap();

    let (status, body) = read(app.get("/api/admin/profile", Some(&token)).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized");
}

#[tokio::test]
async fn user_guard_trusts_the_token_without_a_lookup() {
    let app = spawn_app().await;
    let token = app.state.tokens.issue_user_token("no-such-user").unwrap();

    // The guard lets it through; the handler is what finds nothing.
    let (status, body) = read(app.get("/api/user/profile", Some(&token)).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found.");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = spawn_app().await;
    let response = app
        .http
        .post(app.url("/api/user/login"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
