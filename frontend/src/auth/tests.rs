use super::*;
use crate::session::{KEY_REFRESH_TOKEN, KEY_TOKEN, KEY_USER};
use crate::web::http::HttpError;
use crate::web::http::tests::MockHttpClient;
use crate::web::storage::tests::MockStorage;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "https://api.test";

fn manager(
    client: MockHttpClient,
    storage: MockStorage,
) -> SessionManager<MockHttpClient, MockStorage> {
    SessionManager::new(TabletalkApi::new(BASE, client, SessionStore::new(storage)))
}

fn profile_json() -> serde_json::Value {
    json!({
        "id": 1,
        "email": "owner@tabletalk.app",
        "first_name": "Ada",
        "last_name": "Wong",
        "businesses": [{
            "id": 9,
            "name": "Golden Wok",
            "url": "https://maps.example/golden-wok",
            "location": "Springfield",
            "business_type": "restaurant",
            "created_at": "2024-11-02T10:00:00Z"
        }]
    })
}

fn seed_session(storage: &MockStorage, token: &str) {
    storage.set(KEY_TOKEN, token);
    storage.set(KEY_REFRESH_TOKEN, "refresh-1");
    storage.set(KEY_USER, "{\"stale\":true}");
}

// =========================================================
// token 结构校验
// =========================================================

#[test]
fn well_formed_tokens_have_three_nonempty_segments() {
    assert!(is_well_formed_token("a.b.c"));
    assert!(is_well_formed_token("header.payload.signature"));

    assert!(!is_well_formed_token(""));
    assert!(!is_well_formed_token("abc"));
    assert!(!is_well_formed_token("a.b"));
    assert!(!is_well_formed_token("a.b.c.d"));
    assert!(!is_well_formed_token("a..c"));
    assert!(!is_well_formed_token(".b.c"));
}

// =========================================================
// check_auth_status
// =========================================================

#[tokio::test]
async fn malformed_tokens_short_circuit_without_network_call() {
    for bad in ["", "abc", "a.b", "a.b.c.d", "a..c"] {
        let client = MockHttpClient::new();
        let storage = MockStorage::new();
        seed_session(&storage, bad);

        let mgr = manager(client.clone(), storage.clone());
        assert!(mgr.check_auth_status().await.is_none(), "token: {bad:?}");
        assert_eq!(client.request_count(), 0, "token: {bad:?}");
        assert!(storage.is_empty(), "stale session must be cleared: {bad:?}");
    }
}

#[tokio::test]
async fn absent_token_short_circuits_and_clears_leftovers() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    storage.set(KEY_USER, "{\"stale\":true}");

    let mgr = manager(client.clone(), storage.clone());
    assert!(mgr.check_auth_status().await.is_none());
    assert_eq!(client.request_count(), 0);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn valid_token_fetches_fresh_profile() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    seed_session(&storage, "a.b.c");
    client.mock_response(&format!("{BASE}/api/auth/user"), 200, profile_json());

    let mgr = manager(client.clone(), storage.clone());
    let profile = mgr.check_auth_status().await.unwrap();
    assert_eq!(profile.email, "owner@tabletalk.app");
    assert_eq!(profile.active_business().unwrap().name, "Golden Wok");

    // 档案缓存被刷新，而不是沿用旧 blob
    let cached = storage.get(KEY_USER).unwrap();
    assert!(cached.contains("Golden Wok"));

    // 请求带上了 bearer
    let requests = client.requests.borrow();
    assert_eq!(requests[0].header("Authorization"), Some("Bearer a.b.c"));
}

#[tokio::test]
async fn rejected_token_clears_session() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    seed_session(&storage, "a.b.c");
    client.mock_response(
        &format!("{BASE}/api/auth/user"),
        401,
        json!({"error": "Token has expired"}),
    );

    let mgr = manager(client, storage.clone());
    assert!(mgr.check_auth_status().await.is_none());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn network_failure_during_check_clears_session() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    seed_session(&storage, "a.b.c");
    client.mock_failure(
        &format!("{BASE}/api/auth/user"),
        HttpError::Network("connection refused".to_string()),
    );

    let mgr = manager(client, storage.clone());
    assert!(mgr.check_auth_status().await.is_none());
    assert!(storage.is_empty());
}

// =========================================================
// login / logout
// =========================================================

#[tokio::test]
async fn login_persists_the_full_session() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    client.mock_response(
        &format!("{BASE}/api/auth/login"),
        200,
        json!({
            "token": "h.p.s",
            "refresh_token": "refresh-9",
            "user": profile_json()
        }),
    );

    let mgr = manager(client, storage.clone());
    let user = mgr.login("owner@tabletalk.app", "hunter2").await.unwrap();
    assert_eq!(user.id, 1);

    assert_eq!(storage.get(KEY_TOKEN).as_deref(), Some("h.p.s"));
    assert_eq!(storage.get(KEY_REFRESH_TOKEN).as_deref(), Some("refresh-9"));
    assert!(storage.get(KEY_USER).is_some());
}

#[tokio::test]
async fn failed_login_stores_nothing() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    client.mock_response(
        &format!("{BASE}/api/auth/login"),
        401,
        json!({"error": "Invalid email or password"}),
    );

    let mgr = manager(client, storage.clone());
    let err = mgr.login("owner@tabletalk.app", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(storage.is_empty());
}

#[tokio::test]
async fn logout_clears_storage_even_when_the_server_call_fails() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    seed_session(&storage, "a.b.c");
    client.mock_failure(
        &format!("{BASE}/api/auth/logout"),
        HttpError::Network("connection reset".to_string()),
    );

    let mgr = manager(client, storage.clone());
    assert!(!mgr.logout().await);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn logout_reports_server_success() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    seed_session(&storage, "a.b.c");
    client.mock_response(&format!("{BASE}/api/auth/logout"), 200, json!({}));

    let mgr = manager(client, storage.clone());
    assert!(mgr.logout().await);
    assert!(storage.is_empty());
}

// =========================================================
// refresh_token
// =========================================================

#[tokio::test]
async fn refresh_without_stored_token_issues_no_request() {
    let client = MockHttpClient::new();
    let mgr = manager(client.clone(), MockStorage::new());

    assert!(mgr.refresh_token().await.is_none());
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn refresh_replaces_only_the_access_token() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    seed_session(&storage, "a.b.c");
    client.mock_response(
        &format!("{BASE}/api/auth/refresh"),
        200,
        json!({"token": "n.e.w"}),
    );

    let mgr = manager(client, storage.clone());
    assert_eq!(mgr.refresh_token().await.as_deref(), Some("n.e.w"));
    assert_eq!(storage.get(KEY_TOKEN).as_deref(), Some("n.e.w"));
    assert_eq!(storage.get(KEY_REFRESH_TOKEN).as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn failed_refresh_clears_the_entire_session() {
    let client = MockHttpClient::new();
    let storage = MockStorage::new();
    seed_session(&storage, "a.b.c");
    client.mock_response(
        &format!("{BASE}/api/auth/refresh"),
        401,
        json!({"error": "Invalid refresh token"}),
    );

    let mgr = manager(client, storage.clone());
    assert!(mgr.refresh_token().await.is_none());
    assert!(storage.is_empty());
}
