//! Derived task views: search, status and priority filters.
//!
//! [`visible_tasks`] is a pure projection of a task slice through a
//! [`FilterState`]. The filter state itself is transient UI state: it is
//! never persisted and never flows into the store.

pub mod debounce;

pub use debounce::{DEFAULT_QUIET_PERIOD, Debouncer};

use std::time::{Duration, Instant};

use taskboard_proto::task::{Priority, Status, Task};

/// A filter over one task field: everything, or one exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter<T> {
    /// Match every task.
    #[default]
    All,
    /// Match tasks whose field equals this value.
    Only(T),
}

impl<T: Copy + PartialEq> Filter<T> {
    /// Whether a task field with `value` passes. An unset field only passes
    /// [`Filter::All`].
    #[must_use]
    pub fn matches(self, value: Option<T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value == Some(wanted),
        }
    }

    /// Steps `All → values[0] → … → values[n-1] → All`.
    #[must_use]
    pub fn cycled(self, values: &[T]) -> Self {
        let next = match self {
            Self::All => values.first(),
            Self::Only(current) => values
                .iter()
                .position(|v| *v == current)
                .and_then(|i| values.get(i + 1)),
        };
        next.map_or(Self::All, |v| Self::Only(*v))
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Search text and field filters for one task list view.
#[derive(Debug, Clone)]
pub struct FilterState {
    search: String,
    settled_search: String,
    /// Status filter.
    pub status: Filter<Status>,
    /// Priority filter.
    pub priority: Filter<Priority>,
    debouncer: Debouncer<String>,
}

impl FilterState {
    /// Creates an empty filter whose search text settles after `quiet`.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            search: String::new(),
            settled_search: String::new(),
            status: Filter::All,
            priority: Filter::All,
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Search text as typed.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Search text used for filtering.
    #[must_use]
    pub fn settled_search(&self) -> &str {
        &self.settled_search
    }

    /// Records new search text. It takes effect after the quiet period,
    /// unless replaced again first.
    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search = text.into();
        self.debouncer.schedule(self.search.clone(), now);
    }

    /// Settles pending search text whose quiet period has elapsed.
    ///
    /// Returns `true` if the settled text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(text) if text != self.settled_search => {
                tracing::trace!(search = %text, "search settled");
                self.settled_search = text;
                true
            }
            _ => false,
        }
    }

    /// When pending search text will settle, if any is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Advances the status filter to the next value.
    pub fn cycle_status(&mut self) {
        self.status = self.status.cycled(&Status::ALL);
    }

    /// Advances the priority filter to the next value.
    pub fn cycle_priority(&mut self) {
        self.priority = self.priority.cycled(&Priority::ALL);
    }

    /// Restores the defaults: empty search, both filters `All`.
    pub fn reset(&mut self) {
        *self = Self::new(self.debouncer.quiet_period());
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

/// Returns the tasks that pass `filter`, in their original order.
#[must_use]
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: &FilterState) -> Vec<&'a Task> {
    let needle = filter.settled_search.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            task.title.to_lowercase().contains(&needle)
                && filter.status.matches(task.status)
                && filter.priority.matches(task.priority)
        })
        .collect()
}

/// Why a view shows no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The store holds no tasks at all.
    NoTasks,
    /// Tasks exist but none pass the filters.
    NoMatches,
}

/// Row counts for a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSummary {
    /// Tasks passing the filters.
    pub visible: usize,
    /// Tasks in the store.
    pub total: usize,
}

impl ViewSummary {
    /// Summarizes a visible list against the full task count.
    #[must_use]
    pub const fn new(visible: usize, total: usize) -> Self {
        Self { visible, total }
    }

    /// The empty state to show, if the view has no rows.
    #[must_use]
    pub const fn empty_state(&self) -> Option<EmptyState> {
        if self.total == 0 {
            Some(EmptyState::NoTasks)
        } else if self.visible == 0 {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ViewSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} of {} tasks", self.visible, self.total)
    }
}
