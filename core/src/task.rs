//! Task record types shared across the store boundary.
//!
//! `TaskRecord` is the typed shape of a persisted row; raw rows from the
//! remote store are deserialized into it at the store boundary so malformed
//! data surfaces as a decode error instead of leaking further in.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a persisted task row. Assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for TaskId {
    fn from(raw: i64) -> Self {
        TaskId(raw)
    }
}

/// Identity a task row is scoped to. Every operation runs against exactly
/// one owner's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub Uuid);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task progress state. Stored as a lowercase text enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(format!(
                "unknown status '{other}' (expected pending, in-progress, or done)"
            )),
        }
    }
}

/// A persisted task row. `prev_id`/`next_id` are the chain links; a null
/// `prev_id` marks the head of an owner's chain and a null `next_id` the
/// tail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub prev_id: Option<TaskId>,
    #[serde(default)]
    pub next_id: Option<TaskId>,
    #[serde(default)]
    pub owner_id: Option<OwnerId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload. Link fields left `None` are omitted from the wire so the
/// store's column defaults (null) apply.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_id: Option<TaskId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_id: Option<TaskId>,
    pub owner_id: OwnerId,
}

impl NewTask {
    /// Payload for the first row of an owner's chain: both links null.
    pub fn first(title: impl Into<String>, owner: OwnerId) -> Self {
        Self {
            title: title.into(),
            status: TaskStatus::default(),
            prev_id: None,
            next_id: None,
            owner_id: owner,
        }
    }

    /// Payload for a new head: successor set, predecessor null.
    pub fn before(title: impl Into<String>, next: TaskId, owner: OwnerId) -> Self {
        Self {
            next_id: Some(next),
            ..Self::first(title, owner)
        }
    }

    /// Payload for a new tail: predecessor set, successor null.
    pub fn after(title: impl Into<String>, prev: TaskId, owner: OwnerId) -> Self {
        Self {
            prev_id: Some(prev),
            ..Self::first(title, owner)
        }
    }
}

/// Partial update of a persisted row. Outer `None` means "leave the column
/// alone"; `Some(None)` on a link writes an explicit null.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_id: Option<Option<TaskId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_id: Option<Option<TaskId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn link_prev(prev: Option<TaskId>) -> Self {
        Self {
            prev_id: Some(prev),
            ..Self::default()
        }
    }

    pub fn link_next(next: Option<TaskId>) -> Self {
        Self {
            next_id: Some(next),
            ..Self::default()
        }
    }

    pub fn set_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
