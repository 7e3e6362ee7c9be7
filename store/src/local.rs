//! Local in-memory task store.
//!
//! Backs tests and the CLI's ephemeral `--local` mode. Mirrors the remote
//! store's filtered-write semantics: updates and deletes that match no row
//! succeed without effect, and every operation is scoped to an owner.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use taskchain_core::api::TaskStore;
use taskchain_core::error::StoreError;
use taskchain_core::task::{NewTask, OwnerId, TaskId, TaskPatch, TaskRecord};

#[derive(Default)]
struct Inner {
    rows: HashMap<TaskId, TaskRecord>,
    next_id: i64,
}

#[derive(Default)]
pub struct LocalTaskStore {
    inner: Mutex<Inner>,
}

impl LocalTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows across all owners. Test helper.
    pub async fn row_count(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    /// Fetch a single row regardless of owner. Test helper.
    pub async fn row(&self, id: TaskId) -> Option<TaskRecord> {
        self.inner.lock().await.rows.get(&id).cloned()
    }
}

#[async_trait]
impl TaskStore for LocalTaskStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch_all(&self, owner: OwnerId) -> Result<Vec<TaskRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .values()
            .filter(|r| r.owner_id == Some(owner))
            .cloned()
            .collect())
    }

    async fn insert(&self, task: NewTask) -> Result<TaskRecord, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let record = TaskRecord {
            id: TaskId(inner.next_id),
            title: task.title,
            status: task.status,
            prev_id: task.prev_id,
            next_id: task.next_id,
            owner_id: Some(task.owner_id),
            created_at: Some(Utc::now()),
        };
        inner.rows.insert(record.id, record.clone());
        tracing::debug!(target: "taskchain.store", stage = "store.local.insert", task_id = %record.id);
        Ok(record)
    }

    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        owner: OwnerId,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(row) = inner
            .rows
            .get_mut(&id)
            .filter(|r| r.owner_id == Some(owner))
        else {
            // Filtered update matching zero rows: success without effect.
            return Ok(());
        };
        if let Some(prev) = patch.prev_id {
            row.prev_id = prev;
        }
        if let Some(next) = patch.next_id {
            row.next_id = next;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId, owner: OwnerId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let owned = inner
            .rows
            .get(&id)
            .is_some_and(|r| r.owner_id == Some(owner));
        if owned {
            inner.rows.remove(&id);
        }
        Ok(())
    }
}
