use crate::model::task::Task;

/// View selector for the task list.
///
/// Owned by whichever surface is rendering (TUI or CLI); it is transient,
/// never persisted, and never changes the stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Uncompleted,
}

impl TaskFilter {
    /// Whether a task is visible under this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Uncompleted => !task.completed,
        }
    }

    /// Cycle all → uncompleted → completed → all.
    pub fn cycle(self) -> Self {
        match self {
            TaskFilter::All => TaskFilter::Uncompleted,
            TaskFilter::Uncompleted => TaskFilter::Completed,
            TaskFilter::Completed => TaskFilter::All,
        }
    }

    /// Parse a filter name as given on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(TaskFilter::All),
            "completed" | "done" => Some(TaskFilter::Completed),
            "uncompleted" | "open" => Some(TaskFilter::Uncompleted),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Completed => "completed",
            TaskFilter::Uncompleted => "uncompleted",
        }
    }
}
