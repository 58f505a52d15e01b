//! Application state and event handling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_proto::task::{Priority, Status, Task, TaskId};
use taskboard_proto::user::UserId;

use crate::store::{Action, Snapshot, Store};
use crate::tasks::{MAX_TASK_TITLE_LENGTH, TaskDraft};
use crate::view::{self, FilterState};

/// What keyboard input currently drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the task list (default).
    Browse,
    /// Typing into the search box.
    Search,
    /// Editing the task form.
    Form,
    /// Waiting for a yes/no on deleting this task.
    ConfirmDelete(TaskId),
}

/// Focused field of the task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Title text.
    Title,
    /// Description text.
    Description,
    /// Priority choice.
    Priority,
    /// Status choice.
    Status,
    /// Assignee choice.
    Assignee,
}

impl FormField {
    /// Fields in tab order.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Description,
        Self::Priority,
        Self::Status,
        Self::Assignee,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Description => 1,
            Self::Priority => 2,
            Self::Status => 3,
            Self::Assignee => 4,
        }
    }

    const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title *",
            Self::Description => "Description",
            Self::Priority => "Priority",
            Self::Status => "Status",
            Self::Assignee => "Assignee",
        }
    }
}

/// Main application state.
pub struct App {
    store: Store,
    /// Search text and filters for the task list.
    pub filter: FilterState,
    /// Task form contents.
    pub draft: TaskDraft,
    /// Current input mode.
    pub mode: Mode,
    /// Focused form field.
    pub form_field: FormField,
    /// Validation message shown under the form.
    pub form_error: Option<String>,
    /// Index into the visible task list.
    pub selected: usize,
    /// One-line feedback for the last action, cleared on the next key press.
    pub notice: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    max_task_title_len: usize,
}

impl App {
    /// Create a new application over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            filter: FilterState::default(),
            draft: TaskDraft::new(),
            mode: Mode::Browse,
            form_field: FormField::Title,
            form_error: None,
            selected: 0,
            notice: None,
            should_quit: false,
            max_task_title_len: MAX_TASK_TITLE_LENGTH,
        }
    }

    /// Set the quiet period before search text applies.
    #[must_use]
    pub fn with_search_debounce(mut self, quiet: Duration) -> Self {
        self.filter = FilterState::new(quiet);
        self
    }

    /// Set the maximum task title length.
    #[must_use]
    pub const fn with_max_task_title_len(mut self, len: usize) -> Self {
        self.max_task_title_len = len;
        self
    }

    /// The current store snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    /// Tasks passing the current filters.
    #[must_use]
    pub fn visible<'a>(&self, snapshot: &'a Snapshot) -> Vec<&'a Task> {
        view::visible_tasks(&snapshot.tasks, &self.filter)
    }

    /// The highlighted task, if the list is not empty.
    #[must_use]
    pub fn selected_task(&self) -> Option<Task> {
        let snapshot = self.snapshot();
        self.visible(&snapshot)
            .get(self.selected)
            .map(|t| (*t).clone())
    }

    /// Advance timers: settle search text and keep the selection in range.
    pub fn tick(&mut self, now: Instant) {
        if self.filter.tick(now) {
            self.selected = 0;
        }
        self.clamp_selection();
    }

    /// How long the event loop may wait for input before the next tick.
    ///
    /// Never longer than `max`, and never past a pending search deadline.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant, max: Duration) -> Duration {
        self.filter
            .next_deadline()
            .map_or(max, |deadline| deadline.saturating_duration_since(now).min(max))
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        // Notices last until the next key press.
        self.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode.clone() {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Search => self.handle_search_key(key, now),
            Mode::Form => self.handle_form_key(key),
            Mode::ConfirmDelete(id) => self.handle_confirm_key(key, id),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
                self.clamp_selection();
            }
            KeyCode::Char('/') => self.mode = Mode::Search,
            KeyCode::Char('s') => {
                self.filter.cycle_status();
                self.selected = 0;
            }
            KeyCode::Char('p') => {
                self.filter.cycle_priority();
                self.selected = 0;
            }
            KeyCode::Char('c') => {
                self.filter.reset();
                self.selected = 0;
            }
            KeyCode::Char('n') => self.open_form(TaskDraft::new()),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task) = self.selected_task() {
                    self.open_form(TaskDraft::from_task(&task));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::ConfirmDelete(task.id);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Char(c) => {
                let mut text = self.filter.search().to_string();
                text.push(c);
                self.filter.set_search(text, now);
            }
            KeyCode::Backspace => {
                let mut text = self.filter.search().to_string();
                if text.pop().is_some() {
                    self.filter.set_search(text, now);
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form_field = self.form_field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_field = self.form_field.prev(),
            KeyCode::Left => self.cycle_choice(false),
            KeyCode::Right => self.cycle_choice(true),
            KeyCode::Char(c) => self.edit_text(|text| text.push(c)),
            KeyCode::Backspace => self.edit_text(|text| {
                text.pop();
            }),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, id: TaskId) {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                if self.draft.editing() == Some(&id) {
                    self.draft = TaskDraft::new();
                }
                self.store.dispatch(Action::DeleteTask(id));
                self.notice = Some("Task deleted".to_string());
                self.mode = Mode::Browse;
                self.clamp_selection();
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }

    fn open_form(&mut self, draft: TaskDraft) {
        self.draft = draft;
        self.form_field = FormField::Title;
        self.form_error = None;
        self.mode = Mode::Form;
    }

    fn close_form(&mut self) {
        self.draft = TaskDraft::new();
        self.form_error = None;
        self.mode = Mode::Browse;
    }

    fn submit_form(&mut self) {
        match self.draft.submit(self.max_task_title_len) {
            Ok(action) => {
                let notice = match &action {
                    Action::UpdateTask(_) => "Task updated",
                    _ => "Task added",
                };
                self.store.dispatch(action);
                self.notice = Some(notice.to_string());
                self.close_form();
            }
            Err(err) => self.form_error = Some(err.to_string()),
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let text = match self.form_field {
            FormField::Title => &mut self.draft.title,
            FormField::Description => &mut self.draft.description,
            _ => return,
        };
        edit(text);
        self.form_error = None;
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.form_field {
            FormField::Priority => {
                self.draft.priority = step_option(self.draft.priority, &Priority::ALL, forward);
            }
            FormField::Status => {
                self.draft.status = step_option(self.draft.status, &Status::ALL, forward);
            }
            FormField::Assignee => {
                let ids: Vec<UserId> = self.snapshot().users.iter().map(|u| u.id).collect();
                self.draft.assignee = step_option(self.draft.assignee, &ids, forward);
            }
            FormField::Title | FormField::Description => return,
        }
        self.form_error = None;
    }

    fn clamp_selection(&mut self) {
        let snapshot = self.snapshot();
        let len = self.visible(&snapshot).len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Steps through `None → values[0] → … → values[n-1] → None`, or backwards.
///
/// A current value missing from `values` (say, a roster user that has
/// since disappeared) restarts from the beginning.
fn step_option<T: Copy + PartialEq>(current: Option<T>, values: &[T], forward: bool) -> Option<T> {
    let pos = current.and_then(|c| values.iter().position(|v| *v == c));
    let next = match (pos, forward) {
        (None, true) => values.first(),
        (None, false) => values.last(),
        (Some(i), true) => values.get(i + 1),
        (Some(i), false) => i.checked_sub(1).and_then(|j| values.get(j)),
    };
    next.copied()
}
