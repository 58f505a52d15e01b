//! Integration tests for the derived task view: debounced search and
//! status / priority filters over a live store.
//!
//! Verification command: `cargo test --test view_filtering`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::{Duration, Instant};

use taskboard::store::{Action, Snapshot, Store};
use taskboard::view::{
    DEFAULT_QUIET_PERIOD, EmptyState, Filter, FilterState, ViewSummary, visible_tasks,
};
use taskboard_proto::task::{Priority, Status, Task};

fn titles<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

fn board() -> Store {
    let store = Store::new(Snapshot::default());
    for task in [
        Task::new("1", "Ship v1")
            .with_priority(Priority::High)
            .with_status(Status::InProgress),
        Task::new("2", "Write docs")
            .with_priority(Priority::Low)
            .with_status(Status::ToDo),
        Task::new("3", "Relationship review")
            .with_priority(Priority::Medium)
            .with_status(Status::Done),
        Task::new("4", "Untriaged"),
    ] {
        store.dispatch(Action::AddTask(task));
    }
    store
}

#[test]
fn search_matches_title_substring_case_insensitively() {
    let store = board();
    let snapshot = store.snapshot();
    let mut filter = FilterState::default();
    let start = Instant::now();

    filter.set_search("SHIP", start);
    assert!(filter.tick(start + DEFAULT_QUIET_PERIOD));

    let visible = visible_tasks(&snapshot.tasks, &filter);
    assert_eq!(titles(&visible), ["Ship v1", "Relationship review"]);
}

#[test]
fn rapid_typing_settles_once_on_final_text() {
    let store = board();
    let snapshot = store.snapshot();
    let mut filter = FilterState::default();
    let start = Instant::now();
    let step = Duration::from_millis(100);

    for (i, text) in ["w", "wr", "wri", "writ", "write"].into_iter().enumerate() {
        let at = start + step * u32::try_from(i).unwrap();
        filter.set_search(text, at);
        assert!(!filter.tick(at), "settled early at {text:?}");
    }

    // Raw text is live; the list still shows everything.
    assert_eq!(filter.search(), "write");
    assert_eq!(visible_tasks(&snapshot.tasks, &filter).len(), 4);

    let last = start + step * 4;
    assert!(!filter.tick(last + DEFAULT_QUIET_PERIOD - Duration::from_millis(1)));
    assert!(filter.tick(last + DEFAULT_QUIET_PERIOD));
    assert_eq!(filter.settled_search(), "write");
    assert!(!filter.tick(last + DEFAULT_QUIET_PERIOD * 2));

    let visible = visible_tasks(&snapshot.tasks, &filter);
    assert_eq!(titles(&visible), ["Write docs"]);
}

#[test]
fn filters_combine_and_skip_unset_fields() {
    let store = board();
    let snapshot = store.snapshot();
    let mut filter = FilterState::default();

    filter.priority = Filter::Only(Priority::High);
    assert_eq!(titles(&visible_tasks(&snapshot.tasks, &filter)), ["Ship v1"]);

    filter.status = Filter::Only(Status::Done);
    assert!(visible_tasks(&snapshot.tasks, &filter).is_empty());

    filter.priority = Filter::All;
    assert_eq!(
        titles(&visible_tasks(&snapshot.tasks, &filter)),
        ["Relationship review"]
    );
}

#[test]
fn view_follows_store_changes() {
    let store = board();
    let mut filter = FilterState::default();
    filter.status = Filter::Only(Status::Done);

    assert_eq!(visible_tasks(&store.snapshot().tasks, &filter).len(), 1);

    store.dispatch(Action::UpdateTask(
        Task::new("2", "Write docs")
            .with_priority(Priority::Low)
            .with_status(Status::Done),
    ));
    let snapshot = store.snapshot();
    let visible = visible_tasks(&snapshot.tasks, &filter);
    assert_eq!(titles(&visible), ["Write docs", "Relationship review"]);
}

#[test]
fn summary_distinguishes_empty_states() {
    let empty = Store::new(Snapshot::default());
    let filter = FilterState::default();
    let snapshot = empty.snapshot();
    let summary = ViewSummary::new(
        visible_tasks(&snapshot.tasks, &filter).len(),
        snapshot.tasks.len(),
    );
    assert_eq!(summary.empty_state(), Some(EmptyState::NoTasks));

    let store = board();
    let snapshot = store.snapshot();
    let mut filter = FilterState::default();
    let now = Instant::now();
    filter.set_search("nothing like this", now);
    filter.tick(now + DEFAULT_QUIET_PERIOD);
    let summary = ViewSummary::new(
        visible_tasks(&snapshot.tasks, &filter).len(),
        snapshot.tasks.len(),
    );
    assert_eq!(summary.empty_state(), Some(EmptyState::NoMatches));
    assert_eq!(summary.to_string(), "Showing 0 of 4 tasks");
}

#[test]
fn cycling_filters_walks_every_value() {
    let mut filter = FilterState::default();
    let mut seen = Vec::new();
    for _ in 0..4 {
        filter.cycle_status();
        seen.push(filter.status);
    }
    assert_eq!(
        seen,
        [
            Filter::Only(Status::ToDo),
            Filter::Only(Status::InProgress),
            Filter::Only(Status::Done),
            Filter::All,
        ]
    );
}
