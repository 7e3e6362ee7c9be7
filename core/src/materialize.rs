//! Chain materializer: rebuilds the in-memory list from an unordered batch
//! of persisted rows by walking the `next_id` links from the head row.

use std::collections::{HashMap, HashSet};

use crate::error::StructureIssue;
use crate::list::TaskList;
use crate::task::{TaskId, TaskRecord};

/// Rebuild a `TaskList` from one owner's fetched rows.
///
/// The head is the first row in input order with a null `prev_id`; with no
/// such row the result is an empty list (covers "no tasks yet", and a batch
/// whose head is missing degrades silently rather than erroring). The walk
/// follows `next_id` until the link is null or does not resolve in the
/// batch — a dangling link truncates the walk without error.
///
/// The persisted links are not trusted blindly: revisiting an id or walking
/// more steps than there are rows aborts with a `StructureIssue` instead of
/// looping forever. Reverse-link consistency is not validated.
pub fn materialize(records: &[TaskRecord]) -> Result<TaskList, StructureIssue> {
    let mut list = TaskList::new();

    let Some(head) = records.iter().find(|r| r.prev_id.is_none()) else {
        return Ok(list);
    };

    let by_id: HashMap<TaskId, &TaskRecord> = records.iter().map(|r| (r.id, r)).collect();
    let bound = records.len();
    let mut visited: HashSet<TaskId> = HashSet::with_capacity(bound);

    let mut cursor = Some(head.id);
    let mut steps = 0usize;

    while let Some(id) = cursor {
        let Some(record) = by_id.get(&id) else {
            // Dangling next_id: benign truncation.
            tracing::debug!(target: "taskchain.list", task_id = %id, "chain link dangles, truncating walk");
            break;
        };

        if !visited.insert(id) {
            return Err(StructureIssue::Cycle(id));
        }
        steps += 1;
        if steps > bound {
            return Err(StructureIssue::StepBound(bound));
        }

        list.push_back(record.id, record.title.clone(), record.status);
        cursor = record.next_id;
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use pretty_assertions::assert_eq;

    fn row(id: i64, prev: Option<i64>, next: Option<i64>) -> TaskRecord {
        TaskRecord {
            id: TaskId(id),
            title: format!("task {id}"),
            status: TaskStatus::Pending,
            prev_id: prev.map(TaskId),
            next_id: next.map(TaskId),
            owner_id: None,
            created_at: None,
        }
    }

    fn forward_ids(list: &TaskList) -> Vec<i64> {
        list.iter().map(|n| n.id.0).collect()
    }

    #[test]
    fn round_trip_preserves_chain_order() {
        // Chain 10 -> 20 -> 30, handed over shuffled.
        let rows = vec![
            row(30, Some(20), None),
            row(10, None, Some(20)),
            row(20, Some(10), Some(30)),
        ];

        let list = materialize(&rows).unwrap();
        assert_eq!(forward_ids(&list), vec![10, 20, 30]);
        assert_eq!(list.head_id(), Some(TaskId(10)));
        assert_eq!(list.tail_id(), Some(TaskId(30)));
    }

    #[test]
    fn empty_batch_yields_empty_list() {
        let list = materialize(&[]).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.head_id(), None);
        assert_eq!(list.tail_id(), None);
    }

    #[test]
    fn batch_without_head_yields_empty_list() {
        // Every row claims a predecessor; defined behavior is an empty list,
        // not an error.
        let rows = vec![row(1, Some(2), None), row(2, Some(1), Some(1))];
        let list = materialize(&rows).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn dangling_next_truncates_silently() {
        let rows = vec![row(1, None, Some(2)), row(2, Some(1), Some(99))];
        let list = materialize(&rows).unwrap();
        assert_eq!(forward_ids(&list), vec![1, 2]);
        assert_eq!(list.tail_id(), Some(TaskId(2)));
    }

    #[test]
    fn multiple_heads_first_in_input_order_wins() {
        let rows = vec![
            row(5, None, None),
            row(7, None, Some(8)),
            row(8, Some(7), None),
        ];
        let list = materialize(&rows).unwrap();
        assert_eq!(forward_ids(&list), vec![5]);
    }

    #[test]
    fn cycle_is_reported_not_looped() {
        let rows = vec![
            row(1, None, Some(2)),
            row(2, Some(1), Some(3)),
            row(3, Some(2), Some(2)),
        ];
        let err = materialize(&rows).unwrap_err();
        assert_eq!(err, StructureIssue::Cycle(TaskId(2)));
    }

    #[test]
    fn self_cycle_at_head_is_reported() {
        let rows = vec![row(1, None, Some(1))];
        let err = materialize(&rows).unwrap_err();
        assert_eq!(err, StructureIssue::Cycle(TaskId(1)));
    }
}
