use super::*;
use crate::web::storage::tests::MockStorage;
use tabletalk_shared::UserProfile;

fn profile() -> UserProfile {
    UserProfile {
        id: 7,
        email: "owner@tabletalk.app".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Wong".to_string(),
        businesses: Vec::new(),
    }
}

#[test]
fn save_then_read_back() {
    let storage = MockStorage::new();
    let store = SessionStore::new(storage.clone());

    store.save("a.b.c", "refresh-1", &profile());

    assert_eq!(store.access_token().as_deref(), Some("a.b.c"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    assert_eq!(store.cached_user().unwrap().email, "owner@tabletalk.app");
}

#[test]
fn set_access_token_keeps_refresh_and_user() {
    let store = SessionStore::new(MockStorage::new());
    store.save("a.b.c", "refresh-1", &profile());

    store.set_access_token("d.e.f");

    assert_eq!(store.access_token().as_deref(), Some("d.e.f"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    assert!(store.cached_user().is_some());
}

#[test]
fn clear_removes_all_three_keys() {
    let storage = MockStorage::new();
    let store = SessionStore::new(storage.clone());
    store.save("a.b.c", "refresh-1", &profile());
    assert_eq!(storage.len(), 3);

    store.clear();

    assert!(storage.is_empty());
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert!(store.cached_user().is_none());
}

#[test]
fn corrupt_user_blob_reads_as_absent() {
    let storage = MockStorage::new();
    storage.set(KEY_USER, "{not json");
    let store = SessionStore::new(storage);

    assert!(store.cached_user().is_none());
}
