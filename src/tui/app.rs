use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::workspace::Workspace;
use crate::model::{Task, TaskFilter, TaskId, WorkspaceConfig};
use crate::ops::action::Action;
use crate::ops::intent::{self, IntentError};
use crate::ops::reorder;
use crate::ops::store::TaskStore;

use super::input;
use super::render;
use super::theme::Theme;

/// How long a notice stays in the status row.
const NOTICE_TTL: Duration = Duration::from_millis(2500);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the line editor in the status row.
    Input(InputKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Add,
    Edit(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient status-row message; the fire-and-forget notification surface.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// View selector; lives here, never persisted.
    pub filter: TaskFilter,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the visible (filtered) list
    pub cursor: usize,
    /// First visible row of the list viewport
    pub scroll_offset: usize,
    /// Line editor state for add/edit
    pub input_buffer: String,
    /// Byte offset of the editor cursor (always on a grapheme boundary)
    pub input_cursor: usize,
    pub notice: Option<Notice>,
    pub show_help: bool,
}

impl App {
    pub fn new(store: TaskStore, config: &WorkspaceConfig) -> Self {
        App {
            store,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            filter: TaskFilter::All,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            input_buffer: String::new(),
            input_cursor: 0,
            notice: None,
            show_help: false,
        }
    }

    // --- views ---

    /// Tasks visible under the current filter, in collection order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.store
            .tasks()
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    pub fn visible_ids(&self) -> Vec<TaskId> {
        self.visible_tasks().iter().map(|t| t.id).collect()
    }

    /// Id of the task under the cursor, if any.
    pub fn selected_id(&self) -> Option<TaskId> {
        self.visible_tasks().get(self.cursor).map(|t| t.id)
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    // --- notices ---

    pub fn notify(&mut self, text: impl Into<String>) {
        self.set_notice(text, NoticeLevel::Info);
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.set_notice(text, NoticeLevel::Error);
    }

    fn set_notice(&mut self, text: impl Into<String>, level: NoticeLevel) {
        self.notice = Some(Notice {
            text: text.into(),
            level,
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    /// Drop the notice once its time is up. Called every poll tick.
    pub fn expire_notice(&mut self) {
        if let Some(notice) = &self.notice
            && Instant::now() >= notice.expires_at
        {
            self.notice = None;
        }
    }

    // --- intents ---

    /// Dispatch an action; a failed persist becomes an error notice.
    fn dispatch(&mut self, action: Action) {
        if let Err(e) = self.store.dispatch(action) {
            self.notify_error(e.to_string());
        }
    }

    pub fn begin_add(&mut self) {
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.mode = Mode::Input(InputKind::Add);
    }

    pub fn begin_edit(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(task) = self.store.get(id) {
            self.input_buffer = task.description.clone();
            self.input_cursor = self.input_buffer.len();
            self.mode = Mode::Input(InputKind::Edit(id));
        }
    }

    /// Commit the line editor. Duplicate descriptions surface as a notice;
    /// empty input is discarded without comment, like the source UI.
    pub fn submit_input(&mut self) {
        let Mode::Input(kind) = self.mode else {
            return;
        };
        let input = std::mem::take(&mut self.input_buffer);
        self.input_cursor = 0;
        self.mode = Mode::Navigate;

        let result = match kind {
            InputKind::Add => intent::prepare_add(self.store.tasks(), &input).map(Action::Add),
            InputKind::Edit(id) => {
                intent::prepare_edit(self.store.tasks(), id, &input)
                    .map(|description| Action::UpdateDescription { id, description })
            }
        };

        match result {
            Ok(action) => {
                let added = matches!(kind, InputKind::Add);
                self.dispatch(action);
                if added {
                    // New tasks insert at the front; follow with the cursor.
                    self.cursor = 0;
                    self.scroll_offset = 0;
                }
                self.clamp_cursor();
            }
            Err(IntentError::EmptyDescription) => {}
            Err(e @ IntentError::DuplicateDescription(_)) => {
                self.notify_error(e.to_string());
            }
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.mode = Mode::Navigate;
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.dispatch(Action::Toggle(id));
            // Under a partial filter the task may have just left the view.
            self.clamp_cursor();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let description = self
                .store
                .get(id)
                .map(|t| t.description.clone())
                .unwrap_or_default();
            self.dispatch(Action::Delete(id));
            self.clamp_cursor();
            self.notify(format!("deleted \"{}\"", description));
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.cycle();
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Move the selected task one slot up in the visible list, merging the
    /// new visible order back over the full collection so hidden tasks
    /// keep their places.
    pub fn move_selected_up(&mut self) {
        self.move_selected(-1);
    }

    pub fn move_selected_down(&mut self) {
        self.move_selected(1);
    }

    fn move_selected(&mut self, delta: isize) {
        let mut ids = self.visible_ids();
        if ids.is_empty() {
            return;
        }
        let from = self.cursor.min(ids.len() - 1);
        let to = from as isize + delta;
        if to < 0 || to as usize >= ids.len() {
            return;
        }
        ids.swap(from, to as usize);

        let merged = reorder::merge_visible_order(self.store.tasks(), &ids, self.filter);
        self.dispatch(Action::Reorder(merged));
        self.cursor = to as usize;
    }
}

// ---------------------------------------------------------------------------
// Entry point and event loop
// ---------------------------------------------------------------------------

/// Run the TUI. Startup is two-phase: the store is restored from
/// persistent storage first, and only then is the terminal touched and
/// the event loop started — the first frame already shows restored state.
pub fn run(dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    // Phase 1: load state.
    let start = match dir {
        Some(d) => std::fs::canonicalize(d)?,
        None => std::env::current_dir()?,
    };
    let workspace = Workspace::discover(&start)?;
    let store = TaskStore::restore(workspace.bridge());
    let mut app = App::new(store, &workspace.config);

    // Phase 2: rendering and events.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }
        app.expire_notice();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::bridge::PersistenceBridge;
    use crate::io::storage::MemoryStorage;

    fn app_with(descriptions: &[(&str, bool)]) -> App {
        let mut store = TaskStore::restore(PersistenceBridge::new(Box::new(MemoryStorage::new())));
        for (i, (description, completed)) in descriptions.iter().enumerate().rev() {
            let mut task = Task::new((i + 1) as TaskId, *description);
            task.completed = *completed;
            store.dispatch(Action::Add(task)).unwrap();
        }
        App::new(store, &WorkspaceConfig::default())
    }

    #[test]
    fn visible_tasks_follow_filter() {
        let mut app = app_with(&[("a", false), ("b", true), ("c", false)]);
        assert_eq!(app.visible_tasks().len(), 3);

        app.filter = TaskFilter::Completed;
        let visible = app.visible_tasks();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].description, "b");

        app.filter = TaskFilter::Uncompleted;
        assert_eq!(app.visible_ids(), vec![1, 3]);
    }

    #[test]
    fn submit_add_prepends_and_resets_cursor() {
        let mut app = app_with(&[("a", false)]);
        app.cursor = 0;
        app.begin_add();
        app.input_buffer = "new task".into();
        app.submit_input();

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.tasks()[0].description, "new task");
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn submit_duplicate_add_raises_notice_and_keeps_collection() {
        let mut app = app_with(&[("a", false)]);
        app.begin_add();
        app.input_buffer = "a".into();
        app.submit_input();

        assert_eq!(app.store.len(), 1);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.contains("already exists"));
    }

    #[test]
    fn submit_empty_add_is_silently_discarded() {
        let mut app = app_with(&[("a", false)]);
        app.begin_add();
        app.input_buffer = "   ".into();
        app.submit_input();

        assert_eq!(app.store.len(), 1);
        assert!(app.notice.is_none());
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn begin_edit_seeds_buffer_and_submit_renames() {
        let mut app = app_with(&[("a", false), ("b", false)]);
        app.cursor = 1;
        app.begin_edit();
        assert_eq!(app.input_buffer, "b");
        assert_eq!(app.mode, Mode::Input(InputKind::Edit(2)));

        app.input_buffer = "b renamed".into();
        app.submit_input();
        assert_eq!(app.store.get(2).unwrap().description, "b renamed");
    }

    #[test]
    fn edit_to_duplicate_raises_notice() {
        let mut app = app_with(&[("a", false), ("b", false)]);
        app.cursor = 1;
        app.begin_edit();
        app.input_buffer = "a".into();
        app.submit_input();

        assert_eq!(app.store.get(2).unwrap().description, "b");
        assert!(app.notice.is_some());
    }

    #[test]
    fn toggle_under_filter_clamps_cursor() {
        let mut app = app_with(&[("a", false), ("b", false)]);
        app.filter = TaskFilter::Uncompleted;
        app.cursor = 1;
        app.toggle_selected();
        // "b" left the view; cursor clamps to the remaining task.
        assert_eq!(app.visible_ids(), vec![1]);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn delete_selected_removes_and_notifies() {
        let mut app = app_with(&[("a", false), ("b", false)]);
        app.cursor = 0;
        app.delete_selected();
        assert_eq!(app.store.len(), 1);
        assert!(app.notice.as_ref().unwrap().text.contains("deleted"));
    }

    #[test]
    fn move_selected_reorders_within_view() {
        let mut app = app_with(&[("a", false), ("b", false), ("c", false)]);
        app.cursor = 0;
        app.move_selected_down();
        let ids: Vec<TaskId> = app.store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn move_selected_under_filter_preserves_hidden() {
        let mut app = app_with(&[("a", false), ("b", true), ("c", false)]);
        app.filter = TaskFilter::Uncompleted;
        // view is [a, c]; move a below c
        app.cursor = 0;
        app.move_selected_down();
        let ids: Vec<TaskId> = app.store.tasks().iter().map(|t| t.id).collect();
        // hidden "b" keeps its middle slot
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn move_at_edges_is_noop() {
        let mut app = app_with(&[("a", false), ("b", false)]);
        app.cursor = 0;
        app.move_selected_up();
        let ids: Vec<TaskId> = app.store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        app.cursor = 1;
        app.move_selected_down();
        let ids: Vec<TaskId> = app.store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn cycle_filter_resets_cursor() {
        let mut app = app_with(&[("a", false), ("b", true)]);
        app.cursor = 1;
        app.cycle_filter();
        assert_eq!(app.filter, TaskFilter::Uncompleted);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn expired_notice_is_dropped() {
        let mut app = app_with(&[]);
        app.notice = Some(Notice {
            text: "old".into(),
            level: NoticeLevel::Info,
            expires_at: Instant::now() - Duration::from_millis(1),
        });
        app.expire_notice();
        assert!(app.notice.is_none());
    }
}
