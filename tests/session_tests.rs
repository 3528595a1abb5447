use std::time::Duration;

use quote_summary::core::models::Goal;
use quote_summary::core::session::{DEFAULT_SESSION_IDLE, SessionState, SessionStore};
use uuid::Uuid;

async fn stored_session(store: &SessionStore, client_name: &str) -> Uuid {
    let mut session = store.acquire(None).await;
    session.client_name = client_name.to_string();
    let id = session.id();
    store.release(session).await;
    id
}

#[tokio::test]
async fn test_acquire_without_id_starts_fresh_session() {
    let store = SessionStore::new();
    let session = store.acquire(None).await;

    assert_eq!(*session, SessionState::default());
    assert!(!session.preview_visible);
    store.release(session).await;

    // Default state is never kept
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_saved_state_is_returned_for_same_id_only() {
    let store = SessionStore::new();
    let mut session = store.acquire(None).await;
    session.preview_visible = true;
    session.client_name = "Riley".to_string();
    session.goal = Goal::BalancedValue;
    let id = session.id();
    let expected = (*session).clone();
    store.release(session).await;

    let reloaded = store.acquire(Some(id)).await;
    assert_eq!(reloaded.id(), id);
    assert_eq!(*reloaded, expected);
    store.release(reloaded).await;

    let other = store.acquire(None).await;
    assert_ne!(other.id(), id);
    assert!(!other.preview_visible);
    store.release(other).await;

    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_unknown_ids_are_replaced_not_adopted() {
    let store = SessionStore::new();
    let forged = Uuid::new_v4();

    let session = store.acquire(Some(forged)).await;
    assert_ne!(session.id(), forged);
    assert_eq!(*session, SessionState::default());
    store.release(session).await;
}

#[tokio::test]
async fn test_cookieless_and_forged_requests_do_not_grow_store() {
    let store = SessionStore::new();

    for _ in 0..1_000 {
        let session = store.acquire(None).await;
        store.release(session).await;
        let session = store.acquire(Some(Uuid::new_v4())).await;
        store.release(session).await;
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_returning_to_default_state_drops_session() {
    let store = SessionStore::new();
    let mut session = store.acquire(None).await;
    session.preview_visible = true;
    let id = session.id();
    store.release(session).await;
    assert_eq!(store.len().await, 1);

    let mut session = store.acquire(Some(id)).await;
    session.preview_visible = false;
    store.release(session).await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_store_is_capped_by_least_recently_seen() {
    let store = SessionStore::with_limits(2, DEFAULT_SESSION_IDLE);

    let oldest = stored_session(&store, "Ada").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let middle = stored_session(&store, "Brook").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let newest = stored_session(&store, "Casey").await;

    assert_eq!(store.len().await, 2);

    let evicted = store.acquire(Some(oldest)).await;
    assert_ne!(evicted.id(), oldest);
    store.release(evicted).await;

    for id in [middle, newest] {
        let kept = store.acquire(Some(id)).await;
        assert_eq!(kept.id(), id);
        store.release(kept).await;
    }
}

#[tokio::test]
async fn test_idle_sessions_expire() {
    let store = SessionStore::with_limits(10, Duration::from_millis(20));
    let id = stored_session(&store, "Riley").await;

    tokio::time::sleep(Duration::from_millis(50)).await;

    let session = store.acquire(Some(id)).await;
    assert_ne!(session.id(), id);
    assert!(session.client_name.is_empty());
    store.release(session).await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_second_acquire_waits_for_release() {
    let store = SessionStore::new();
    let id = stored_session(&store, "Riley").await;

    let mut first = store.acquire(Some(id)).await;

    let waiter_store = store.clone();
    let waiter = tokio::spawn(async move {
        let mut second = waiter_store.acquire(Some(id)).await;
        let seen = second.preview_visible;
        second.goal = Goal::BestCoverage;
        waiter_store.release(second).await;
        seen
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!waiter.is_finished());

    first.preview_visible = true;
    store.release(first).await;

    // The waiter sees the first interaction's change and keeps it
    assert!(waiter.await.unwrap());
    let last = store.acquire(Some(id)).await;
    assert!(last.preview_visible);
    assert_eq!(last.goal, Goal::BestCoverage);
    store.release(last).await;
}
