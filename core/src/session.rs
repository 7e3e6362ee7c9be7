//! List session: the mutator that keeps one owner's in-memory list in
//! lockstep with the persisted chain.
//!
//! Multi-step mutations follow the persisted write order of the original
//! system and are not transactional: each step commits independently, a
//! failing step surfaces its error and halts the sequence, and prior steps
//! are not rolled back. On any failure the in-memory list is left exactly
//! as it was, so the previously rendered state stays intact until the next
//! full `load`.

use std::sync::Arc;

use crate::api::TaskStore;
use crate::error::TaskError;
use crate::list::{Node, TaskList, TaskView};
use crate::materialize::materialize;
use crate::task::{NewTask, OwnerId, TaskId, TaskPatch, TaskRecord, TaskStatus};

/// One owner's live list plus its store handle. Head/tail cursors live in
/// the owned `TaskList`; there is no session state beyond it.
pub struct ListSession {
    store: Arc<dyn TaskStore>,
    owner: OwnerId,
    list: TaskList,
}

impl ListSession {
    pub fn new(store: Arc<dyn TaskStore>, owner: OwnerId) -> Self {
        Self {
            store,
            owner,
            list: TaskList::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    /// Ordered snapshot for presentation.
    pub fn snapshot(&self) -> Vec<TaskView> {
        self.list.snapshot()
    }

    /// Fetch the owner's rows and rebuild the in-memory list wholesale.
    pub async fn load(&mut self) -> Result<(), TaskError> {
        tracing::debug!(
            target: "taskchain.list",
            stage = "session.load.in",
            store = self.store.name(),
            owner = %self.owner
        );
        let rows = self.store.fetch_all(self.owner).await?;
        let list = materialize(&rows)?;
        tracing::debug!(
            target: "taskchain.list",
            stage = "session.load.out",
            rows = rows.len(),
            chained = list.len()
        );
        self.list = list;
        Ok(())
    }

    /// Insert a new task at the head of the chain.
    ///
    /// Empty list: one insert with both links null. Otherwise: insert the
    /// row pointing at the current head, then repoint the old head's
    /// `prev_id` at it. If that second write fails the created row is left
    /// behind remotely and the in-memory list is untouched.
    pub async fn insert_front(&mut self, title: &str) -> Result<TaskRecord, TaskError> {
        tracing::debug!(
            target: "taskchain.list",
            stage = "session.insert_front.in",
            title_len = title.len(),
            head = ?self.list.head_id()
        );

        let created = match self.list.head_id() {
            None => {
                self.store
                    .insert(NewTask::first(title, self.owner))
                    .await?
            }
            Some(old_head) => {
                let created = self
                    .store
                    .insert(NewTask::before(title, old_head, self.owner))
                    .await?;
                self.store
                    .update(old_head, TaskPatch::link_prev(Some(created.id)), self.owner)
                    .await?;
                created
            }
        };

        self.list
            .push_front(created.id, created.title.clone(), created.status);
        tracing::debug!(
            target: "taskchain.list",
            stage = "session.insert_front.out",
            task_id = %created.id
        );
        Ok(created)
    }

    /// Insert a new task at the tail of the chain. Mirror image of
    /// `insert_front`, repointing the old tail's `next_id`.
    pub async fn insert_back(&mut self, title: &str) -> Result<TaskRecord, TaskError> {
        tracing::debug!(
            target: "taskchain.list",
            stage = "session.insert_back.in",
            title_len = title.len(),
            tail = ?self.list.tail_id()
        );

        let created = match self.list.tail_id() {
            None => {
                self.store
                    .insert(NewTask::first(title, self.owner))
                    .await?
            }
            Some(old_tail) => {
                let created = self
                    .store
                    .insert(NewTask::after(title, old_tail, self.owner))
                    .await?;
                self.store
                    .update(old_tail, TaskPatch::link_next(Some(created.id)), self.owner)
                    .await?;
                created
            }
        };

        self.list
            .push_back(created.id, created.title.clone(), created.status);
        tracing::debug!(
            target: "taskchain.list",
            stage = "session.insert_back.out",
            task_id = %created.id
        );
        Ok(created)
    }

    /// Delete a task and relink its neighbors.
    ///
    /// Write order: predecessor's `next_id`, successor's `prev_id`, then the
    /// row itself. Each step is independent; a failure partway leaves the
    /// persisted chain partially relinked (repaired by the next `load`) and
    /// the in-memory list untouched. Unknown ids are a no-op returning
    /// `false`, with no remote call.
    pub async fn remove(&mut self, id: TaskId) -> Result<bool, TaskError> {
        let Some(node) = self.list.get(id) else {
            tracing::debug!(target: "taskchain.list", stage = "session.remove.miss", task_id = %id);
            return Ok(false);
        };
        let (prev, next) = (node.prev, node.next);
        tracing::debug!(
            target: "taskchain.list",
            stage = "session.remove.in",
            task_id = %id,
            prev = ?prev,
            next = ?next
        );

        if let Some(prev_id) = prev {
            self.store
                .update(prev_id, TaskPatch::link_next(next), self.owner)
                .await?;
        }
        if let Some(next_id) = next {
            self.store
                .update(next_id, TaskPatch::link_prev(prev), self.owner)
                .await?;
        }
        self.store.delete(id, self.owner).await?;

        self.list.remove(id);
        tracing::debug!(target: "taskchain.list", stage = "session.remove.out", task_id = %id);
        Ok(true)
    }

    /// Persist a status change, then mirror it onto the in-memory node.
    ///
    /// An id with no in-memory node still attempts the persisted update
    /// (the row may exist remotely); only a store failure is an error.
    pub async fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<(), TaskError> {
        self.store
            .update(id, TaskPatch::set_status(status), self.owner)
            .await?;
        if let Some(node) = self.list.get_mut(id) {
            node.status = status;
        } else {
            tracing::debug!(target: "taskchain.list", stage = "session.status.miss", task_id = %id);
        }
        Ok(())
    }

    pub fn get(&self, id: TaskId) -> Option<&Node> {
        self.list.get(id)
    }
}
