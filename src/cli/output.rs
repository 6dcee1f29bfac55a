use serde::Serialize;

use crate::model::task::Task;

/// JSON shape for a single task in `tk list --json`.
#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub description: String,
    pub completed: bool,
}

/// JSON shape for `tk list --json`: the filtered view plus the total
/// (unfiltered) count.
#[derive(Serialize)]
pub struct TaskListJson {
    pub tasks: Vec<TaskJson>,
    pub total: usize,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        description: task.description.clone(),
        completed: task.completed,
    }
}

/// One line per task for human-readable `tk list`.
pub fn format_task_line(task: &Task) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    format!("{} {:>13}  {}", checkbox, task.id, task.description)
}
