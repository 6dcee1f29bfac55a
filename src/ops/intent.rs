use chrono::Utc;

use crate::model::task::{Task, TaskId};

/// Why an intent was rejected before becoming an action.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    #[error("a task with the description \"{0}\" already exists")]
    DuplicateDescription(String),
    #[error("task description is empty")]
    EmptyDescription,
}

/// Mint an id for a new task from the wall clock (milliseconds).
///
/// Millisecond resolution is a weak uniqueness guarantee: two rapid adds
/// can land in the same tick. To keep ids pairwise distinct the candidate
/// is bumped past any id already in the collection.
pub fn fresh_task_id(tasks: &[Task]) -> TaskId {
    let mut id = Utc::now().timestamp_millis().max(0) as TaskId;
    while tasks.iter().any(|t| t.id == id) {
        id += 1;
    }
    id
}

/// Validate an add intent and build the task to dispatch.
///
/// The input is trimmed of surrounding whitespace; an empty result is
/// rejected, as is an exact (case-sensitive) match against any existing
/// description. The store does not re-check either.
pub fn prepare_add(tasks: &[Task], input: &str) -> Result<Task, IntentError> {
    let description = input.trim();
    if description.is_empty() {
        return Err(IntentError::EmptyDescription);
    }
    if tasks.iter().any(|t| t.description == description) {
        return Err(IntentError::DuplicateDescription(description.to_string()));
    }
    Ok(Task::new(fresh_task_id(tasks), description))
}

/// Validate an edit intent and return the description to dispatch.
///
/// A description identical to any *other* task's is rejected; re-saving a
/// task under its own current description is allowed.
pub fn prepare_edit(tasks: &[Task], id: TaskId, input: &str) -> Result<String, IntentError> {
    let description = input.trim();
    if description.is_empty() {
        return Err(IntentError::EmptyDescription);
    }
    if tasks
        .iter()
        .any(|t| t.id != id && t.description == description)
    {
        return Err(IntentError::DuplicateDescription(description.to_string()));
    }
    Ok(description.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> Vec<Task> {
        vec![Task::new(1, "buy milk"), Task::new(2, "call mom")]
    }

    #[test]
    fn prepare_add_trims_and_builds() {
        let task = prepare_add(&tasks(), "  write tests  ").unwrap();
        assert_eq!(task.description, "write tests");
        assert!(!task.completed);
        assert!(task.id != 1 && task.id != 2);
    }

    #[test]
    fn prepare_add_rejects_duplicate() {
        let err = prepare_add(&tasks(), "buy milk").unwrap_err();
        assert!(matches!(err, IntentError::DuplicateDescription(d) if d == "buy milk"));
    }

    #[test]
    fn prepare_add_duplicate_check_is_case_sensitive() {
        // Exact match only — different case is a different description.
        assert!(prepare_add(&tasks(), "Buy Milk").is_ok());
    }

    #[test]
    fn prepare_add_rejects_empty_and_whitespace() {
        assert!(matches!(
            prepare_add(&tasks(), ""),
            Err(IntentError::EmptyDescription)
        ));
        assert!(matches!(
            prepare_add(&tasks(), "   \t "),
            Err(IntentError::EmptyDescription)
        ));
    }

    #[test]
    fn prepare_add_trimmed_input_can_still_collide() {
        let err = prepare_add(&tasks(), "  buy milk\n").unwrap_err();
        assert!(matches!(err, IntentError::DuplicateDescription(_)));
    }

    #[test]
    fn prepare_edit_allows_own_description() {
        let description = prepare_edit(&tasks(), 1, "buy milk").unwrap();
        assert_eq!(description, "buy milk");
    }

    #[test]
    fn prepare_edit_rejects_other_tasks_description() {
        let err = prepare_edit(&tasks(), 1, "call mom").unwrap_err();
        assert!(matches!(err, IntentError::DuplicateDescription(_)));
    }

    #[test]
    fn prepare_edit_trims() {
        assert_eq!(prepare_edit(&tasks(), 1, " tidy desk ").unwrap(), "tidy desk");
    }

    #[test]
    fn fresh_id_bumps_past_existing() {
        let first = Task::new(fresh_task_id(&[]), "a");
        let existing = vec![first.clone()];
        // Same millisecond or not, the second id never collides.
        let second = fresh_task_id(&existing);
        assert_ne!(second, first.id);
    }

    #[test]
    fn fresh_ids_are_distinct_under_rapid_creation() {
        let mut tasks: Vec<Task> = Vec::new();
        for i in 0..50 {
            let task = Task::new(fresh_task_id(&tasks), format!("task {i}"));
            tasks.push(task);
        }
        let mut ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }
}
