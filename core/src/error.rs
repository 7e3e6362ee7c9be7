use thiserror::Error;

use crate::task::TaskId;

/// Failures surfaced by list operations.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
    #[error("no authenticated owner; operations require a signed-in identity")]
    NoOwner,
    #[error("persisted chain is structurally inconsistent: {0}")]
    Structure(#[from] StructureIssue),
}

/// Failures from a `TaskStore` implementation. Remote stores carry the
/// underlying transport error; decode failures keep the offending detail.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(anyhow::Error),
    #[error("store returned malformed data: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn request(err: impl Into<anyhow::Error>) -> Self {
        Self::Request(err.into())
    }
}

/// Structural violations detected while rebuilding a chain. The persisted
/// links are untrusted input; a cycle or an over-long walk aborts the
/// rebuild instead of looping.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StructureIssue {
    #[error("chain revisits task {0}")]
    Cycle(TaskId),
    #[error("chain walk exceeded {0} steps")]
    StepBound(usize),
}
