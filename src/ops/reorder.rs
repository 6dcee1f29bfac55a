use crate::model::filter::TaskFilter;
use crate::model::task::{Task, TaskId};

/// Rebuild the full collection after the visible subset was reordered.
///
/// `visible_ids` is the new order of the tasks matching `filter`. Hidden
/// tasks keep their original slots; the slots that held visible tasks are
/// refilled left-to-right in the new visible order. If `visible_ids` is
/// not a permutation of the currently visible subset, the collection is
/// returned unchanged — a stale reorder never drops hidden tasks.
pub fn merge_visible_order(
    full: &[Task],
    visible_ids: &[TaskId],
    filter: TaskFilter,
) -> Vec<Task> {
    let visible_slots: Vec<usize> = full
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t))
        .map(|(i, _)| i)
        .collect();

    if visible_slots.len() != visible_ids.len() {
        return full.to_vec();
    }

    let mut reordered: Vec<&Task> = Vec::with_capacity(visible_ids.len());
    for id in visible_ids {
        match full.iter().find(|t| t.id == *id && filter.matches(t)) {
            Some(task) => reordered.push(task),
            None => return full.to_vec(),
        }
    }
    // Permutation check: every visible task accounted for exactly once.
    {
        let mut seen: Vec<TaskId> = visible_ids.to_vec();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != visible_ids.len() {
            return full.to_vec();
        }
    }

    let mut next: Vec<Task> = full.to_vec();
    for (slot, task) in visible_slots.into_iter().zip(reordered) {
        next[slot] = task.clone();
    }
    next
}

/// Move the task with `id` to `position` (clamped) in the full sequence.
/// Returns `None` when the id is absent.
pub fn move_in_sequence(full: &[Task], id: TaskId, position: usize) -> Option<Vec<Task>> {
    let from = full.iter().position(|t| t.id == id)?;
    let mut next = full.to_vec();
    let task = next.remove(from);
    let to = position.min(next.len());
    next.insert(to, task);
    Some(next)
}
