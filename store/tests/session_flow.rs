//! End-to-end flows: a `ListSession` driving a `LocalTaskStore`, with the
//! persisted rows checked directly after every mutation.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use uuid::Uuid;

use taskchain_core::session::ListSession;
use taskchain_core::task::{OwnerId, TaskId, TaskStatus};
use taskchain_store::LocalTaskStore;

fn owner() -> OwnerId {
    OwnerId(Uuid::from_u128(0x0123))
}

fn new_session(store: &Arc<LocalTaskStore>) -> ListSession {
    ListSession::new(store.clone(), owner())
}

fn forward_ids(s: &ListSession) -> Vec<TaskId> {
    s.list().iter().map(|n| n.id).collect()
}

fn assert_doubly_linked(s: &ListSession) {
    let forward = forward_ids(s);
    let mut backward: Vec<_> = s.list().iter_back().map(|n| n.id).collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[tokio::test]
async fn first_insert_creates_detached_row() {
    let store = Arc::new(LocalTaskStore::new());
    let mut s = new_session(&store);

    let created = s.insert_front("only").await.unwrap();

    let row = store.row(created.id).await.unwrap();
    assert!(row.prev_id.is_none());
    assert!(row.next_id.is_none());
    assert_eq!(row.status, TaskStatus::Pending);
    assert_eq!(row.owner_id, Some(owner()));

    assert_eq!(s.list().head_id(), Some(created.id));
    assert_eq!(s.list().tail_id(), Some(created.id));
}

#[tokio::test]
async fn insert_back_links_off_existing_head() {
    let store = Arc::new(LocalTaskStore::new());
    let mut s = new_session(&store);

    let a = s.insert_back("a").await.unwrap();
    let b = s.insert_back("b").await.unwrap();

    assert_eq!(store.row(b.id).await.unwrap().prev_id, Some(a.id));
    assert_eq!(store.row(a.id).await.unwrap().next_id, Some(b.id));
    assert_eq!(s.list().tail_id(), Some(b.id));
    assert_doubly_linked(&s);
}

#[tokio::test]
async fn persisted_chain_round_trips_through_reload() {
    let store = Arc::new(LocalTaskStore::new());
    let mut s = new_session(&store);

    let c = s.insert_front("c").await.unwrap();
    let a = s.insert_back("a").await.unwrap();
    let b = s.insert_back("b").await.unwrap();
    assert_eq!(forward_ids(&s), vec![c.id, a.id, b.id]);

    let mut fresh = new_session(&store);
    fresh.load().await.unwrap();
    assert_eq!(forward_ids(&fresh), vec![c.id, a.id, b.id]);
    assert_doubly_linked(&fresh);
}

#[tokio::test]
async fn delete_middle_relinks_persisted_neighbors() {
    let store = Arc::new(LocalTaskStore::new());
    let mut s = new_session(&store);

    let a = s.insert_back("a").await.unwrap();
    let b = s.insert_back("b").await.unwrap();
    let c = s.insert_back("c").await.unwrap();

    assert!(s.remove(b.id).await.unwrap());

    assert_eq!(store.row(a.id).await.unwrap().next_id, Some(c.id));
    assert_eq!(store.row(c.id).await.unwrap().prev_id, Some(a.id));
    assert!(store.row(b.id).await.is_none());
    assert_eq!(forward_ids(&s), vec![a.id, c.id]);
    assert_doubly_linked(&s);

    // A reload sees the same repaired chain.
    let mut fresh = new_session(&store);
    fresh.load().await.unwrap();
    assert_eq!(forward_ids(&fresh), vec![a.id, c.id]);
}

#[tokio::test]
async fn delete_last_row_leaves_empty_store_and_cursors() {
    let store = Arc::new(LocalTaskStore::new());
    let mut s = new_session(&store);

    let a = s.insert_front("a").await.unwrap();
    assert!(s.remove(a.id).await.unwrap());

    assert_eq!(store.row_count().await, 0);
    assert!(s.list().is_empty());
    assert_eq!(s.list().head_id(), None);
    assert_eq!(s.list().tail_id(), None);
}

#[tokio::test]
async fn status_change_survives_reload() {
    let store = Arc::new(LocalTaskStore::new());
    let mut s = new_session(&store);

    let a = s.insert_back("a").await.unwrap();
    s.set_status(a.id, TaskStatus::InProgress).await.unwrap();

    let mut fresh = new_session(&store);
    fresh.load().await.unwrap();
    assert_eq!(fresh.get(a.id).unwrap().status, TaskStatus::InProgress);
}

#[tokio::test]
async fn long_mixed_sequence_keeps_both_sides_consistent() {
    let store = Arc::new(LocalTaskStore::new());
    let mut s = new_session(&store);

    let mut ids = Vec::new();
    for i in 0..6 {
        let rec = if i % 2 == 0 {
            s.insert_back(&format!("back {i}")).await.unwrap()
        } else {
            s.insert_front(&format!("front {i}")).await.unwrap()
        };
        ids.push(rec.id);
        assert_doubly_linked(&s);
    }

    // Drop every other one.
    for id in ids.iter().step_by(2) {
        assert!(s.remove(*id).await.unwrap());
        assert_doubly_linked(&s);
    }

    // In-memory order and persisted order must agree.
    let expected = forward_ids(&s);
    let mut fresh = new_session(&store);
    fresh.load().await.unwrap();
    assert_eq!(forward_ids(&fresh), expected);
    assert_eq!(fresh.list().len(), 3);
}

#[tokio::test]
async fn sessions_of_different_owners_do_not_interfere() {
    let store = Arc::new(LocalTaskStore::new());
    let mut mine = new_session(&store);
    let mut theirs = ListSession::new(store.clone(), OwnerId(Uuid::from_u128(0xfeed)));

    mine.insert_back("mine 1").await.unwrap();
    theirs.insert_back("theirs 1").await.unwrap();
    mine.insert_back("mine 2").await.unwrap();

    let mut fresh = new_session(&store);
    fresh.load().await.unwrap();
    let titles: Vec<_> = fresh.snapshot().into_iter().map(|v| v.title).collect();
    assert_eq!(titles, vec!["mine 1", "mine 2"]);
}
