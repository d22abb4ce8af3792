//! Integration tests for API endpoints.
//!
//! The router runs over real services backed by the in-memory store, so no
//! database is needed.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use account_service_lib::repository::{InMemoryStore, StoreCounts};
use account_service_lib::service::{JwtTokenIssuer, Services};
use common::JwtConfig;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// Helpers
// =============================================================================

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens = Arc::new(JwtTokenIssuer::new(JwtConfig::new(SECRET).unwrap()));
        let services = Services::new(store.clone(), store.clone(), tokens);
        let router = create_router(AppState::new(services, None));
        Self { router, store }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Register an account and return its access token and id.
    async fn register(&self, email: &str, role: &str) -> (String, i64) {
        let (status, body) = self
            .send(
                Method::POST,
                "/auth/register",
                None,
                Some(registration(email, "p1", "p1", role)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        (
            body["access"].as_str().unwrap().to_string(),
            body["user"]["id"].as_i64().unwrap(),
        )
    }
}

fn registration(email: &str, password: &str, confirm: &str, role: &str) -> Value {
    json!({
        "email": email,
        "password": password,
        "password_confirm": confirm,
        "first_name": "Test",
        "last_name": "User",
        "role": role,
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_without_database() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_returns_created_with_tokens() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(registration("ana@Hotel.TEST", "p1", "p1", "receptionist")),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "ana@hotel.test");
    assert_eq!(body["user"]["role"], "receptionist");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["access"].is_string());
    assert!(body["refresh"].is_string());
    assert_eq!(app.store.counts().staff_profiles, 1);
}

#[tokio::test]
async fn test_register_defaults_to_guest() {
    let app = TestApp::new();
    let mut payload = registration("g@x.com", "p1", "p1", "guest");
    payload.as_object_mut().unwrap().remove("role");

    let (status, body) = app
        .send(Method::POST, "/auth/register", None, Some(payload))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["role"], "guest");
    assert_eq!(app.store.counts().guest_profiles, 1);
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(registration("a@x.com", "a", "b", "guest")),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "password_confirm");
    assert_eq!(app.store.counts(), StoreCounts::default());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register("dup@x.com", "guest").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(registration("dup@x.com", "p1", "p1", "manager")),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "email");
    assert_eq!(body["error"]["message"], "An account with this email already exists");
}

#[tokio::test]
async fn test_register_invalid_email_and_unknown_role() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(registration("", "p1", "p1", "guest")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "email");

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(registration("a@x.com", "p1", "p1", "bellboy")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.counts(), StoreCounts::default());
}

#[tokio::test]
async fn test_login_and_refresh() {
    let app = TestApp::new();
    app.register("a@x.com", "guest").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "p1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let refresh = body["refresh"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/refresh",
            None,
            Some(json!({ "refresh": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access"].as_str().unwrap().to_string();

    let (status, body) = app.send(Method::GET, "/users/me", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.register("a@x.com", "guest").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_missing_and_invalid_tokens() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = app
        .send(Method::GET, "/users/me", Some("not.a.jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new();
    let (_, body) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(registration("a@x.com", "p1", "p1", "guest")),
        )
        .await;
    let refresh = body["refresh"].as_str().unwrap();

    let (status, _) = app.send(Method::GET, "/users/me", Some(refresh), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_list_users_requires_admin_or_manager() {
    let app = TestApp::new();
    let (guest, _) = app.register("g@x.com", "guest").await;
    let (manager, _) = app.register("m@x.com", "manager").await;

    let (status, body) = app.send(Method::GET, "/users", Some(&guest), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, body) = app.send(Method::GET, "/users", Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_other_account_is_forbidden() {
    let app = TestApp::new();
    let (_, other_id) = app.register("other@x.com", "guest").await;
    let (token, own_id) = app.register("me@x.com", "housekeeping").await;

    let (status, _) = app
        .send(Method::GET, &format!("/users/{}", own_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::GET, &format!("/users/{}", other_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_account_validates_phone_length() {
    let app = TestApp::new();
    let (token, id) = app.register("a@x.com", "guest").await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/users/{}", id),
            Some(&token),
            Some(json!({ "phone": "1234567890123456" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "phone");

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/users/{}", id),
            Some(&token),
            Some(json!({ "phone": "+351 912", "address": "Rua 1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "+351 912");
    assert_eq!(body["address"], "Rua 1");
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = TestApp::new();
    let (token, id) = app.register("a@x.com", "guest").await;
    let uri = format!("/users/{}/change-password", id);

    let (status, body) = app
        .send(
            Method::POST,
            &uri,
            Some(&token),
            Some(json!({
                "old_password": "wrong",
                "new_password": "p2",
                "new_password_confirm": "p2",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Old password is incorrect");

    let (status, body) = app
        .send(
            Method::POST,
            &uri,
            Some(&token),
            Some(json!({
                "old_password": "p1",
                "new_password": "p2",
                "new_password_confirm": "p2",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "password changed");

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "p2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_account() {
    let app = TestApp::new();
    let (_, guest_id) = app.register("g@x.com", "guest").await;
    let (admin, admin_id) = app.register("admin@x.com", "admin").await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/users/{}", admin_id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(Method::DELETE, &format!("/users/{}", guest_id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(app.store.counts().guest_profiles, 0);
}

// =============================================================================
// Profiles
// =============================================================================

#[tokio::test]
async fn test_guest_profile_me_roundtrip() {
    let app = TestApp::new();
    let (token, _) = app.register("g@x.com", "guest").await;

    let (status, body) = app
        .send(Method::GET, "/guest-profiles/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nationality"], "");
    assert_eq!(body["preferences"], json!({}));

    let (status, body) = app
        .send(
            Method::PATCH,
            "/guest-profiles/me",
            Some(&token),
            Some(json!({
                "first_name": "Ana",
                "nationality": "PT",
                "date_of_birth": "1990-05-01",
                "preferences": { "floor": 3, "quiet": true },
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Ana");
    assert_eq!(body["nationality"], "PT");
    assert_eq!(body["date_of_birth"], "1990-05-01");
    assert_eq!(body["preferences"]["floor"], 3);

    let (status, body) = app
        .send(
            Method::PUT,
            "/guest-profiles/me",
            Some(&token),
            Some(json!({ "passport_number": "X123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passport_number"], "X123");
    assert_eq!(body["nationality"], "PT");
}

#[tokio::test]
async fn test_null_clears_birth_date_and_picture() {
    let app = TestApp::new();
    let (token, id) = app.register("g@x.com", "guest").await;

    let (status, _) = app
        .send(
            Method::PATCH,
            "/guest-profiles/me",
            Some(&token),
            Some(json!({ "date_of_birth": "1990-05-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .send(
            Method::PATCH,
            "/guest-profiles/me",
            Some(&token),
            Some(json!({ "nationality": "PT" })),
        )
        .await;
    assert_eq!(body["date_of_birth"], "1990-05-01");

    let (status, body) = app
        .send(
            Method::PATCH,
            "/guest-profiles/me",
            Some(&token),
            Some(json!({ "date_of_birth": null })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["date_of_birth"].is_null());
    assert_eq!(body["nationality"], "PT");

    let uri = format!("/users/{}", id);
    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "profile_picture": "pictures/g.png" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile_picture"], "pictures/g.png");

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "profile_picture": null })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["profile_picture"].is_null());
}

#[tokio::test]
async fn test_staff_on_guest_me_is_role_validation_error() {
    let app = TestApp::new();
    let (token, _) = app.register("desk@x.com", "receptionist").await;

    let (status, body) = app
        .send(Method::GET, "/guest-profiles/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "role");
    assert_eq!(body["error"]["message"], "Not a guest");
}

#[tokio::test]
async fn test_staff_profile_me_and_admin_update() {
    let app = TestApp::new();
    let (staff, staff_id) = app.register("hk@x.com", "housekeeping").await;
    let (manager, _) = app.register("boss@x.com", "manager").await;

    let (status, body) = app
        .send(Method::GET, "/staff-profiles/me", Some(&staff), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employee_id"], format!("EMP{:06}", staff_id));
    assert_eq!(body["department"], "Housekeeping");
    let profile_id = body["id"].as_i64().unwrap();
    let hire_date = body["hire_date"].clone();

    let (status, body) = app
        .send(
            Method::PATCH,
            "/staff-profiles/me",
            Some(&staff),
            Some(json!({ "position": "Supervisor", "hire_date": "2000-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position"], "Supervisor");
    assert_eq!(body["hire_date"], hire_date);

    let uri = format!("/staff-profiles/{}", profile_id);
    let (status, _) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&staff),
            Some(json!({ "hire_date": "2000-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&manager),
            Some(json!({ "hire_date": "2000-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hire_date"], "2000-01-01");
    assert_eq!(body["user"]["email"], "hk@x.com");
}

#[tokio::test]
async fn test_profile_lists_and_missing_profile() {
    let app = TestApp::new();
    app.register("g@x.com", "guest").await;
    let (admin, _) = app.register("admin@x.com", "admin").await;

    let (status, body) = app
        .send(Method::GET, "/guest-profiles", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["user"]["email"], "g@x.com");

    let (status, body) = app
        .send(Method::GET, "/staff-profiles", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app
        .send(Method::GET, "/guest-profiles/999", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = app.send(Method::GET, "/guest-profiles", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
