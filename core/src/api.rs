//! Store seam consumed by the list session.
//!
//! Implementations live in `taskchain-store`: a remote REST store and a
//! local in-memory store. The session only sees this trait, so tests can
//! substitute failure-injecting fakes at the same seam.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::task::{NewTask, OwnerId, TaskId, TaskPatch, TaskRecord};

/// Asynchronous task row store.
///
/// Every call is one remote operation; there is no batching and no
/// transaction spanning calls. Multi-step chain mutations are sequenced by
/// the session, and each step commits independently.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Human-readable store name, for logs.
    fn name(&self) -> &str;

    /// Fetch every row belonging to `owner`, in no particular order.
    async fn fetch_all(&self, owner: OwnerId) -> Result<Vec<TaskRecord>, StoreError>;

    /// Insert a row and return it with its assigned id.
    async fn insert(&self, task: NewTask) -> Result<TaskRecord, StoreError>;

    /// Apply a partial update to the row with `id`, scoped to `owner`.
    /// Matching zero rows is a success, mirroring filtered-update semantics
    /// of the backing store.
    async fn update(&self, id: TaskId, patch: TaskPatch, owner: OwnerId)
        -> Result<(), StoreError>;

    /// Delete the row with `id`, scoped to `owner`. Matching zero rows is a
    /// success.
    async fn delete(&self, id: TaskId, owner: OwnerId) -> Result<(), StoreError>;
}
