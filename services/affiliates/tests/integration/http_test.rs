use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::TestServer;
use serde_json::{Value, json};

use betengine_auth_types::token::validate_credential;
use betengine_domain::id::UserId;
use betengine_testing::auth::MockAuth;

use crate::helpers::{BOOTSTRAP_ADMIN_EMAIL, test_server};

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

fn registration(email: &str) -> Value {
    json!({
        "name": "Diego",
        "email": email,
        "password": "s3nha-forte",
        "whatsapp": "+55 11 91234-5678",
        "pix_key": "diego@pix",
    })
}

async fn register_admin(server: &TestServer) -> String {
    let resp = server
        .post("/api/auth/register")
        .json(&registration(BOOTSTRAP_ADMIN_EMAIL))
        .await;
    resp.assert_status(StatusCode::OK);
    resp.json::<Value>()["token"].as_str().unwrap().to_owned()
}

/// Register a pending affiliate and return its id (read back through the admin directory).
async fn register_pending(server: &TestServer, admin_token: &str, email: &str) -> i64 {
    let resp = server
        .post("/api/auth/register")
        .json(&registration(email))
        .await;
    resp.assert_status(StatusCode::CREATED);

    let (name, value) = bearer(admin_token);
    let users = server
        .get("/api/admin/users")
        .add_header(name, value)
        .await
        .json::<Value>();
    users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == email)
        .and_then(|u| u["id"].as_i64())
        .unwrap()
}

async fn approve(server: &TestServer, admin_token: &str, id: i64) {
    let (name, value) = bearer(admin_token);
    let resp = server
        .post(&format!("/api/admin/users/{id}/approve"))
        .add_header(name, value)
        .await;
    resp.assert_status(StatusCode::OK);
    assert_eq!(resp.json::<Value>(), json!({ "success": true }));
}

async fn login(server: &TestServer, email: &str, password: &str) -> axum_test::TestResponse {
    server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await
}

// ── Health / fallback ────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    let (server, _db) = test_server().await;
    let resp = server.get("/api/health").await;
    resp.assert_status(StatusCode::OK);
    let body = resp.json::<Value>();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn unknown_api_path_returns_json_404() {
    let (server, _db) = test_server().await;
    let resp = server.get("/api/does-not-exist").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["error"], "endpoint not found");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (server, _db) = test_server().await;
    let resp = server.get("/api/health").await;
    assert!(resp.headers().contains_key("x-request-id"));
}

// ── Registration ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn bootstrap_admin_registration_returns_credential() {
    let (server, _db) = test_server().await;
    let resp = server
        .post("/api/auth/register")
        .json(&registration("  OWNER@example.com "))
        .await;
    resp.assert_status(StatusCode::OK);

    let body = resp.json::<Value>();
    assert_eq!(body["user"]["email"], BOOTSTRAP_ADMIN_EMAIL);
    assert_eq!(body["user"]["status"], "approved");
    assert_eq!(body["user"]["is_admin"], true);
    assert!(body["user"].get("password_hash").is_none());

    let claims = validate_credential(body["token"].as_str().unwrap(), &MockAuth::secret()).unwrap();
    assert!(claims.is_admin);
    assert_eq!(claims.email, BOOTSTRAP_ADMIN_EMAIL);
}

#[tokio::test]
async fn regular_registration_is_pending_without_credential() {
    let (server, _db) = test_server().await;
    let resp = server
        .post("/api/auth/register")
        .json(&registration("diego@example.com"))
        .await;
    resp.assert_status(StatusCode::CREATED);

    let body = resp.json::<Value>();
    assert_eq!(body["code"], "PENDING_APPROVAL");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn registration_requires_every_field() {
    let (server, _db) = test_server().await;
    let resp = server
        .post("/api/auth/register")
        .json(&json!({ "name": "Diego", "email": "diego@example.com", "password": "x" }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["code"], "MISSING_FIELDS");
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (server, _db) = test_server().await;
    server
        .post("/api/auth/register")
        .json(&registration("diego@example.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let resp = server
        .post("/api/auth/register")
        .json(&registration("Diego@Example.com"))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = resp.json::<Value>();
    assert_eq!(body["code"], "EMAIL_TAKEN");
    assert_eq!(body["error"], "this email is already registered");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let (server, _db) = test_server().await;
    let resp = server
        .post("/api/auth/register")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["code"], "INVALID_BODY");
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let (server, _db) = test_server().await;
    register_admin(&server).await;

    let wrong_password = login(&server, BOOTSTRAP_ADMIN_EMAIL, "wrong").await;
    let unknown_email = login(&server, "nobody@example.com", "s3nha-forte").await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_email.text());
}

#[tokio::test]
async fn pending_user_can_log_in_after_approval() {
    let (server, _db) = test_server().await;
    let admin_token = register_admin(&server).await;
    let id = register_pending(&server, &admin_token, "diego@example.com").await;

    let pending = login(&server, "diego@example.com", "s3nha-forte").await;
    pending.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(pending.json::<Value>()["code"], "PENDING_APPROVAL");

    approve(&server, &admin_token, id).await;

    let resp = login(&server, "  DIEGO@example.com ", " s3nha-forte ").await;
    resp.assert_status(StatusCode::OK);
    let body = resp.json::<Value>();
    assert_eq!(body["user"]["id"], id);
    assert_eq!(body["user"]["status"], "approved");
}

#[tokio::test]
async fn rejected_user_cannot_log_in() {
    let (server, _db) = test_server().await;
    let admin_token = register_admin(&server).await;
    let id = register_pending(&server, &admin_token, "diego@example.com").await;

    let (name, value) = bearer(&admin_token);
    server
        .post(&format!("/api/admin/users/{id}/reject"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::OK);

    let resp = login(&server, "diego@example.com", "s3nha-forte").await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(resp.json::<Value>()["code"], "ACCOUNT_REJECTED");
}

// ── Credentials ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_credential_is_401_and_invalid_is_403() {
    let (server, _db) = test_server().await;

    let missing = server.get("/api/user/metrics").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = bearer("garbage");
    let invalid = server.get("/api/user/metrics").add_header(name, value).await;
    invalid.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn non_admin_is_forbidden_on_admin_routes() {
    let (server, _db) = test_server().await;
    let (name, value) = MockAuth::affiliate(1).header();

    let paths = [
        "/api/admin/users/1/approve",
        "/api/admin/users/1/reject",
        "/api/admin/impersonate/1",
    ];
    for path in paths {
        let resp = server
            .post(path)
            .add_header(name.clone(), value.clone())
            .await;
        resp.assert_status(StatusCode::FORBIDDEN);
    }

    let writes = [
        ("/api/admin/users/1/link", json!({ "custom_link": "https://go.example.com/x" })),
        ("/api/admin/users/1/metrics", json!({ "ftds": 1, "cpa": 10.0 })),
    ];
    for (path, body) in writes {
        let resp = server
            .post(path)
            .add_header(name.clone(), value.clone())
            .json(&body)
            .await;
        resp.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(resp.json::<Value>()["code"], "FORBIDDEN");
    }

    let resp = server
        .get("/api/admin/users")
        .add_header(name.clone(), value.clone())
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
}

// ── Own metrics ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn affiliate_reads_and_overwrites_own_metrics() {
    let (server, _db) = test_server().await;
    let admin_token = register_admin(&server).await;
    let id = register_pending(&server, &admin_token, "diego@example.com").await;
    approve(&server, &admin_token, id).await;

    let token = login(&server, "diego@example.com", "s3nha-forte").await.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_owned();

    let (name, value) = bearer(&token);
    let resp = server
        .post("/api/user/metrics")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "leads": 7, "balance": 12.5 }))
        .await;
    resp.assert_status(StatusCode::OK);
    assert_eq!(resp.json::<Value>(), json!({ "message": "metrics updated" }));

    let metrics = server
        .get("/api/user/metrics")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(metrics["user_id"], id);
    assert_eq!(metrics["leads"], 7);
    assert_eq!(metrics["balance"], 12.5);
    assert_eq!(metrics["ftds"], 0);
    assert_eq!(metrics["status"], "approved");
    assert!(metrics["custom_link"].is_null());
}

#[tokio::test]
async fn own_metrics_for_unknown_user_is_404() {
    let (server, _db) = test_server().await;
    let (name, value) = MockAuth::affiliate(42).header();
    let resp = server.get("/api/user/metrics").add_header(name, value).await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

// ── Admin directory ──────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_metrics_update_derives_balance() {
    let (server, _db) = test_server().await;
    let admin_token = register_admin(&server).await;
    let id = register_pending(&server, &admin_token, "diego@example.com").await;
    let (name, value) = bearer(&admin_token);

    let resp = server
        .post(&format!("/api/admin/users/{id}/metrics"))
        .add_header(name.clone(), value.clone())
        .json(&json!({ "ftds": 10, "cpa": 50.0, "balance": 1 }))
        .await;
    resp.assert_status(StatusCode::OK);
    assert_eq!(resp.json::<Value>(), json!({ "success": true }));

    let users = server
        .get("/api/admin/users")
        .add_header(name, value)
        .await
        .json::<Value>();
    let row = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"] == id)
        .unwrap()
        .clone();
    assert_eq!(row["ftds"], 10);
    assert_eq!(row["cpa"], 50.0);
    assert_eq!(row["balance"], 500.0);
}

#[tokio::test]
async fn admin_metrics_update_for_unknown_user_is_404() {
    let (server, _db) = test_server().await;
    let (name, value) = MockAuth::admin(1).header();
    let resp = server
        .post("/api/admin/users/777/metrics")
        .add_header(name, value)
        .json(&json!({ "leads": 1 }))
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_user_id_is_400() {
    let (server, _db) = test_server().await;
    let (name, value) = MockAuth::admin(1).header();
    let resp = server
        .post("/api/admin/users/abc/approve")
        .add_header(name, value)
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["code"], "INVALID_USER_ID");
}

#[tokio::test]
async fn approving_unknown_user_succeeds_silently() {
    let (server, _db) = test_server().await;
    let (name, value) = MockAuth::admin(1).header();
    let resp = server
        .post("/api/admin/users/9999/approve")
        .add_header(name, value)
        .await;
    resp.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn admin_sets_and_clears_custom_link() {
    let (server, _db) = test_server().await;
    let admin_token = register_admin(&server).await;
    let id = register_pending(&server, &admin_token, "diego@example.com").await;
    let (name, value) = bearer(&admin_token);

    server
        .post(&format!("/api/admin/users/{id}/link"))
        .add_header(name.clone(), value.clone())
        .json(&json!({ "custom_link": "https://go.example.com/diego" }))
        .await
        .assert_status(StatusCode::OK);

    let users = server
        .get("/api/admin/users")
        .add_header(name.clone(), value.clone())
        .await
        .json::<Value>();
    let row = users.as_array().unwrap().iter().find(|u| u["id"] == id).unwrap().clone();
    assert_eq!(row["custom_link"], "https://go.example.com/diego");

    server
        .post(&format!("/api/admin/users/{id}/link"))
        .add_header(name.clone(), value.clone())
        .json(&json!({}))
        .await
        .assert_status(StatusCode::OK);

    let users = server
        .get("/api/admin/users")
        .add_header(name, value)
        .await
        .json::<Value>();
    let row = users.as_array().unwrap().iter().find(|u| u["id"] == id).unwrap().clone();
    assert!(row["custom_link"].is_null());
}

#[tokio::test]
async fn admin_list_is_id_descending_with_metrics() {
    let (server, _db) = test_server().await;
    let admin_token = register_admin(&server).await;
    register_pending(&server, &admin_token, "first@example.com").await;
    register_pending(&server, &admin_token, "second@example.com").await;

    let (name, value) = bearer(&admin_token);
    let users = server
        .get("/api/admin/users")
        .add_header(name, value)
        .await
        .json::<Value>();
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 3);

    let ids: Vec<i64> = users.iter().map(|u| u["id"].as_i64().unwrap()).collect();
    let mut sorted = ids.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);

    assert_eq!(users[0]["email"], "second@example.com");
    assert!(users.iter().all(|u| u["balance"] == 0.0));
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn impersonation_issues_target_credential() {
    let (server, _db) = test_server().await;
    let admin_token = register_admin(&server).await;
    let id = register_pending(&server, &admin_token, "diego@example.com").await;
    let (name, value) = bearer(&admin_token);

    let resp = server
        .post(&format!("/api/admin/impersonate/{id}"))
        .add_header(name.clone(), value.clone())
        .await;
    resp.assert_status(StatusCode::OK);
    let body = resp.json::<Value>();
    assert_eq!(body["user"]["email"], "diego@example.com");

    let claims = validate_credential(body["token"].as_str().unwrap(), &MockAuth::secret()).unwrap();
    assert_eq!(claims.id, UserId(id as i32));
    assert_eq!(claims.email, "diego@example.com");
    assert_eq!(claims.name, "Diego");
    assert!(!claims.is_admin);

    let missing = server
        .post("/api/admin/impersonate/4242")
        .add_header(name, value)
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}
