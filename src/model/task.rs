use serde::{Deserialize, Serialize};

/// Task identifier, derived from the creation clock (milliseconds).
///
/// Uniqueness is by convention, not construction — see `ops::intent::fresh_task_id`.
pub type TaskId = u64;

/// A single to-do entry.
///
/// The serde shape (`{id, description, completed}`) is the on-disk format
/// and must stay stable for previously persisted collections to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// Create a new, not-yet-completed task.
    pub fn new(id: TaskId, description: impl Into<String>) -> Self {
        Task {
            id,
            description: description.into(),
            completed: false,
        }
    }
}
