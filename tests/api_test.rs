use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use budget_back_end::api::{self, config::ApiConfig};
use budget_back_end::budget::db_types::{BudgetEntryRecord, CreateBudgetEntry};
use budget_back_end::store::memory::MemoryStore;
use budget_back_end::store::{BudgetStore, Store, StoreResult, UserLookup, UserStore};
use budget_back_end::users::config::PasswordSettings;
use budget_back_end::users::db_types::{CreateUserAccount, UserAccountRecord};
use budget_back_end::utils::app_config::AppConfig;

fn cheap_password_settings() -> PasswordSettings {
    PasswordSettings {
        argon2_memory_kib: 256,
        argon2_iterations: 1,
        argon2_parallelism: 1,
    }
}

fn memory_config() -> AppConfig {
    AppConfig::new(
        Arc::new(MemoryStore::new()),
        Duration::from_secs(5),
        cheap_password_settings(),
    )
}

fn app() -> Router {
    api::router(memory_config(), &ApiConfig::default())
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

#[tokio::test]
async fn test_create_then_list_budget() {
    let router = app();

    let (status, body) = send(
        &router,
        "POST",
        "/budget",
        Some(json!({ "title": "  Rent ", "budget": 604, "color": "#4ecdc4" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Budget item created successfully");
    assert_eq!(body["data"]["title"], "Rent");
    assert_eq!(body["data"]["budget"], 604.0);
    assert_eq!(body["data"]["color"], "#4ECDC4");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["createdAt"].is_string());

    send(
        &router,
        "POST",
        "/budget",
        Some(json!({ "title": "Grocery", "budget": "156", "color": "#45B7D1" })),
    )
    .await;

    let (status, body) = send(&router, "GET", "/budget", None).await;
    assert_eq!(status, StatusCode::OK);

    let items = body["myBudget"].as_array().unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Rent", "Grocery"]);
    assert_eq!(items[1]["budget"], 156.0);
}

#[tokio::test]
async fn test_empty_budget_list() {
    let (status, body) = send(&app(), "GET", "/budget", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "myBudget": [] }));
}

#[tokio::test]
async fn test_duplicate_title_after_trimming_conflicts() {
    let router = app();
    send(
        &router,
        "POST",
        "/budget",
        Some(json!({ "title": "Rent", "budget": 604, "color": "#4ECDC4" })),
    )
    .await;

    let (status, body) = send(
        &router,
        "POST",
        "/budget",
        Some(json!({ "title": " Rent ", "budget": 1, "color": "#000000" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate-title");

    let (_, body) = send(&router, "GET", "/budget", None).await;
    assert_eq!(body["myBudget"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_budget_input_is_rejected() {
    let router = app();

    let cases = [
        (json!({ "title": "Rent", "budget": -1, "color": "#4ECDC4" }), "invalid-amount"),
        (json!({ "budget": 10, "color": "#4ECDC4" }), "missing-field"),
        (json!({ "title": "Rent", "budget": 10, "color": "red" }), "invalid-color"),
        (json!({ "title": "Rent", "budget": "ten", "color": "#4ECDC4" }), "invalid-amount"),
    ];

    for (payload, code) in cases {
        let (status, body) = send(&router, "POST", "/budget", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], code);
        assert!(body["message"].is_string());
    }

    let (_, body) = send(&router, "GET", "/budget", None).await;
    assert!(body["myBudget"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/budget")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid-body");
}

#[tokio::test]
async fn test_signup_then_login() {
    let router = app();

    let (status, body) = send(
        &router,
        "POST",
        "/signup",
        Some(json!({
            "username": " alice ",
            "password": "hunter22",
            "email": "alice@example.com",
            "first_name": "Alice",
            "last_name": "Smith"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["firstName"], "Alice");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("passwordHash").is_none());
    assert!(!body.to_string().contains("argon2"));

    let (status, body) = send(
        &router,
        "POST",
        "/login",
        Some(json!({ "username": "alice", "password": "hunter22" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_signup_validation_and_conflicts() {
    let router = app();

    let (status, body) = send(
        &router,
        "POST",
        "/signup",
        Some(json!({ "username": "al", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid-username");

    let (status, body) = send(
        &router,
        "POST",
        "/signup",
        Some(json!({ "username": "alice", "password": "12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid-password");

    let (status, body) = send(
        &router,
        "POST",
        "/signup",
        Some(json!({ "username": "alice", "password": "hunter22", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid-email");

    let (status, _) = send(
        &router,
        "POST",
        "/signup",
        Some(json!({ "username": "alice", "password": "hunter22", "email": "a@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &router,
        "POST",
        "/signup",
        Some(json!({ "username": "alice", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate-username");

    let (status, body) = send(
        &router,
        "POST",
        "/signup",
        Some(json!({ "username": "bob", "password": "hunter22", "email": "a@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate-email");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let router = app();
    send(
        &router,
        "POST",
        "/signup",
        Some(json!({ "username": "alice", "password": "hunter22" })),
    )
    .await;

    let wrong_password = send(
        &router,
        "POST",
        "/login",
        Some(json!({ "username": "alice", "password": "hunter23" })),
    )
    .await;
    let unknown_user = send(
        &router,
        "POST",
        "/login",
        Some(json!({ "username": "mallory", "password": "hunter22" })),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password.1["error"], "invalid-credentials");
}

#[tokio::test]
async fn test_login_with_missing_field_looks_like_bad_credentials() {
    let router = app();
    send(
        &router,
        "POST",
        "/signup",
        Some(json!({ "username": "alice", "password": "hunter22" })),
    )
    .await;

    let missing_password = send(&router, "POST", "/login", Some(json!({ "username": "nouser" }))).await;
    let missing_username = send(&router, "POST", "/login", Some(json!({ "password": "hunter22" }))).await;
    let unknown_user = send(
        &router,
        "POST",
        "/login",
        Some(json!({ "username": "nouser", "password": "x" })),
    )
    .await;

    assert_eq!(missing_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(missing_password.1["error"], "invalid-credentials");
    assert_eq!(missing_password, unknown_user);
    assert_eq!(missing_username, unknown_user);
}

#[tokio::test]
async fn test_concurrent_signups_create_one_account() {
    let router = app();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            send(
                &router,
                "POST",
                "/signup",
                Some(json!({ "username": "racer", "password": "hunter22" })),
            )
            .await
            .0
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 1);
    assert!(statuses
        .iter()
        .all(|s| *s == StatusCode::CREATED || *s == StatusCode::CONFLICT));

    let (_, body) = send(&router, "GET", "/users", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_users_listing_respects_admin_token() {
    let api_config = ApiConfig {
        admin_token: Some("s3cret".to_string()),
        ..ApiConfig::default()
    };
    let router = api::router(memory_config(), &api_config);

    let (status, body) = send(&router, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let request = Request::builder()
        .uri("/users")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The guard only covers the user listing.
    let (status, _) = send(&router, "GET", "/budget", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_info_and_health() {
    let router = app();

    let (status, body) = send(&router, "GET", "/api/info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].as_array().unwrap().len() >= 5);

    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["store"], "memory");
}

/// Backend that never answers within the configured timeout.
struct StalledStore;

impl StalledStore {
    async fn stall<T>() -> StoreResult<T> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        unreachable!("the store timeout fires first")
    }
}

#[async_trait]
impl BudgetStore for StalledStore {
    async fn insert_budget(&self, _entry: CreateBudgetEntry) -> StoreResult<BudgetEntryRecord> {
        Self::stall().await
    }

    async fn find_budget_by_title(&self, _title: &str) -> StoreResult<Option<BudgetEntryRecord>> {
        Self::stall().await
    }

    async fn list_budgets(&self) -> StoreResult<Vec<BudgetEntryRecord>> {
        Self::stall().await
    }
}

#[async_trait]
impl UserStore for StalledStore {
    async fn insert_user(&self, _user: CreateUserAccount) -> StoreResult<UserAccountRecord> {
        Self::stall().await
    }

    async fn find_user(&self, _lookup: UserLookup<'_>) -> StoreResult<Option<UserAccountRecord>> {
        Self::stall().await
    }

    async fn list_users(&self) -> StoreResult<Vec<UserAccountRecord>> {
        Self::stall().await
    }
}

impl Store for StalledStore {
    fn backend_name(&self) -> &'static str {
        "stalled"
    }
}

#[tokio::test]
async fn test_stalled_store_reports_timeout() {
    let app_config = AppConfig::new(
        Arc::new(StalledStore),
        Duration::from_millis(50),
        cheap_password_settings(),
    );
    let router = api::router(app_config, &ApiConfig::default());

    let (status, body) = send(&router, "GET", "/budget", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store-timeout");

    let (status, body) = send(
        &router,
        "POST",
        "/budget",
        Some(json!({ "title": "Rent", "budget": 604, "color": "#4ECDC4" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store-timeout");
}

#[tokio::test]
async fn test_static_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>budget</h1>").unwrap();

    let api_config = ApiConfig {
        static_dir: Some(dir.path().to_path_buf()),
        ..ApiConfig::default()
    };
    let router = api::router(memory_config(), &api_config);

    let (status, body) = send(&router, "GET", "/index.html", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("<h1>budget</h1>".to_string()));

    let (status, _) = send(&router, "GET", "/missing.css", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, "GET", "/budget", None).await;
    assert_eq!(status, StatusCode::OK);
}
