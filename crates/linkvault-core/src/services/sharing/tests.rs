//! Sharing module tests

use super::service::{disable_sharing, enable_sharing, resolve_share};
use crate::error::Status;
use crate::models::CreateContent;
use crate::services::content::{create_content, set_visibility, RawTags};
use crate::services::mock::{identity, MockStore};

fn link(title: &str) -> CreateContent {
    CreateContent {
        link: Some(format!("https://example.com/{}", title)),
        title: Some(title.to_string()),
        content_type: Some("link".to_string()),
        tags: RawTags::Other,
    }
}

#[tokio::test]
async fn test_enable_sharing_is_idempotent() {
    let store = MockStore::new().with_user("u1", "alice");
    let alice = identity("u1");

    let first = enable_sharing(&store, &alice).await.unwrap();
    let second = enable_sharing(&store, &alice).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.hash, second.hash);
    assert_eq!(first.hash.len(), 10);
    assert_eq!(store.share_count("u1"), 1);
}

#[tokio::test]
async fn test_disable_sharing() {
    let store = MockStore::new().with_user("u1", "alice");
    let alice = identity("u1");
    enable_sharing(&store, &alice).await.unwrap();

    disable_sharing(&store, &alice).await.unwrap();
    assert_eq!(store.share_count("u1"), 0);

    let err = disable_sharing(&store, &alice).await.unwrap_err();
    assert_eq!(err.status(), Status::NotFound);
}

#[tokio::test]
async fn test_reenable_issues_fresh_hash() {
    let store = MockStore::new().with_user("u1", "alice");
    let alice = identity("u1");
    let old = enable_sharing(&store, &alice).await.unwrap();
    disable_sharing(&store, &alice).await.unwrap();

    let new = enable_sharing(&store, &alice).await.unwrap();

    assert!(new.created);
    let err = resolve_share(&store, &store, &store, &old.hash).await;
    // Two random 10-char hashes colliding is not a realistic outcome
    assert_ne!(old.hash, new.hash);
    assert_eq!(err.unwrap_err().status(), Status::NotFound);
}

#[tokio::test]
async fn test_resolve_returns_only_public_items_newest_first() {
    let store = MockStore::new().with_user("u1", "alice");
    let alice = identity("u1");
    create_content(&store, &alice, link("first")).await.unwrap();
    let hidden = create_content(&store, &alice, link("hidden")).await.unwrap();
    create_content(&store, &alice, link("last")).await.unwrap();
    set_visibility(&store, &alice, &hidden.id, false).await.unwrap();
    let grant = enable_sharing(&store, &alice).await.unwrap();

    let vault = resolve_share(&store, &store, &store, &grant.hash).await.unwrap();

    assert_eq!(vault.username, "alice");
    let titles: Vec<&str> = vault.content.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["last", "first"]);
}

#[tokio::test]
async fn test_resolve_does_not_leak_other_users_items() {
    let store = MockStore::new()
        .with_user("u1", "alice")
        .with_user("u2", "bob");
    create_content(&store, &identity("u2"), link("bobs")).await.unwrap();
    let grant = enable_sharing(&store, &identity("u1")).await.unwrap();

    let vault = resolve_share(&store, &store, &store, &grant.hash).await.unwrap();

    assert!(vault.content.is_empty());
}

#[tokio::test]
async fn test_resolve_unknown_and_malformed_hashes_look_the_same() {
    let store = MockStore::new().with_user("u1", "alice");

    let unknown = resolve_share(&store, &store, &store, "abcdefghij").await.unwrap_err();
    let malformed = resolve_share(&store, &store, &store, "../etc").await.unwrap_err();

    assert_eq!(unknown.status(), Status::NotFound);
    assert_eq!(malformed.status(), Status::NotFound);
    assert_eq!(unknown.public_message(), malformed.public_message());
    assert_eq!(
        unknown.public_message(),
        "The share link is invalid or has expired"
    );
}

#[tokio::test]
async fn test_resolve_with_missing_owner() {
    let store = MockStore::new().with_user("u1", "alice");
    let grant = enable_sharing(&store, &identity("u1")).await.unwrap();
    store.remove_user("u1");

    let err = resolve_share(&store, &store, &store, &grant.hash).await.unwrap_err();

    assert_eq!(err.status(), Status::NotFound);
    assert_eq!(
        err.public_message(),
        "The owner of this content could not be found"
    );
}

#[tokio::test]
async fn test_enable_sharing_store_fault() {
    let store = MockStore::new().with_user("u1", "alice");
    store.fail_all();

    let err = enable_sharing(&store, &identity("u1")).await.unwrap_err();

    assert_eq!(err.status(), Status::Internal);
}
