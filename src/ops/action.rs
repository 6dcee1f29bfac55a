use crate::model::task::{Task, TaskId};

/// A validated instruction for the transition function.
///
/// This is the only way the collection changes. The set is closed: adding
/// a kind here forces every `match` over it to be revisited.
///
/// Validation (description uniqueness, trimming) happens before an action
/// is built — see `ops::intent`. The transition function applies these
/// unconditionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Insert a fully-formed task at the front of the collection.
    Add(Task),
    /// Flip `completed` on the task with this id.
    Toggle(TaskId),
    /// Remove the task with this id.
    Delete(TaskId),
    /// Replace the whole collection with this sequence.
    Reorder(Vec<Task>),
    /// Replace the description on the task with this id.
    UpdateDescription { id: TaskId, description: String },
}
