//! Integration tests for the store lifecycle: hydration from storage,
//! write-through on every task change, and restoration after restart.
//!
//! Verification command: `cargo test --test store_lifecycle`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::{Duration, Instant};

use taskboard::roster::{RosterError, RosterSource};
use taskboard::session::Session;
use taskboard::storage::{FileStorage, KeyValueStorage, TaskPersistence};
use taskboard::store::{Action, RosterStatus};
use taskboard::tasks::TaskDraft;
use taskboard::view::{Filter, FilterState, visible_tasks};
use taskboard_proto::codec;
use taskboard_proto::task::{Priority, Status, Task, TaskId};
use taskboard_proto::user::User;

// =============================================================================
// Test helpers
// =============================================================================

/// Roster source that always answers with the same users.
struct StaticRoster(Vec<User>);

impl RosterSource for StaticRoster {
    async fn fetch(&self) -> Result<Vec<User>, RosterError> {
        Ok(self.0.clone())
    }
}

fn file_persistence(dir: &tempfile::TempDir) -> TaskPersistence {
    TaskPersistence::new(Box::new(FileStorage::new(dir.path())), "tasks")
}

fn saved_tasks(dir: &tempfile::TempDir) -> Vec<Task> {
    let raw = FileStorage::new(dir.path())
        .get("tasks")
        .unwrap()
        .expect("slot should exist");
    codec::decode_tasks(&raw).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn add_update_then_filter_by_done() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::start(file_persistence(&dir), StaticRoster(Vec::new()));
    let store = session.store().clone();

    store.dispatch(Action::AddTask(
        Task::new("1", "A")
            .with_priority(Priority::Low)
            .with_status(Status::ToDo),
    ));
    store.dispatch(Action::UpdateTask(
        Task::new("1", "A")
            .with_priority(Priority::Low)
            .with_status(Status::Done),
    ));

    let mut filter = FilterState::default();
    filter.status = Filter::Only(Status::Done);
    let snapshot = store.snapshot();
    let visible = visible_tasks(&snapshot.tasks, &filter);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, TaskId::new("1"));

    session.wait_for_roster().await;
    assert_eq!(store.snapshot().roster, RosterStatus::Ready);
}

#[tokio::test]
async fn every_task_change_reaches_disk() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::start(file_persistence(&dir), StaticRoster(Vec::new()));
    let store = session.store();

    store.dispatch(Action::AddTask(Task::new("1", "Write docs")));
    assert_eq!(saved_tasks(&dir).len(), 1);

    store.dispatch(Action::AddTask(Task::new("2", "Ship it")));
    store.dispatch(Action::DeleteTask(TaskId::new("1")));
    let saved = saved_tasks(&dir);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].title, "Ship it");
}

#[tokio::test]
async fn tasks_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut first = Session::start(
            file_persistence(&dir),
            StaticRoster(vec![User::new(1, "Leanne Graham")]),
        );
        first.wait_for_roster().await;
        let mut draft = TaskDraft::new();
        draft.title = "Plan release".to_string();
        draft.priority = Some(Priority::High);
        draft.status = Some(Status::InProgress);
        draft.assignee = first.store().snapshot().users.first().map(|u| u.id);
        first
            .store()
            .dispatch(draft.submit(256).expect("draft is valid"));
    }

    let second = Session::start(file_persistence(&dir), StaticRoster(Vec::new()));
    let snapshot = second.store().snapshot();
    assert_eq!(snapshot.tasks.len(), 1);
    let task = &snapshot.tasks[0];
    assert_eq!(task.title, "Plan release");
    assert_eq!(task.priority, Some(Priority::High));
    assert_eq!(task.status, Some(Status::InProgress));
    assert_eq!(task.assignee.map(|id| id.get()), Some(1));
}

#[tokio::test]
async fn corrupt_slot_starts_empty_and_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    FileStorage::new(dir.path())
        .set("tasks", "{ not json")
        .unwrap();

    let session = Session::start(file_persistence(&dir), StaticRoster(Vec::new()));
    assert!(session.store().snapshot().tasks.is_empty());

    session
        .store()
        .dispatch(Action::AddTask(Task::new("1", "Fresh start")));
    assert_eq!(saved_tasks(&dir).len(), 1);
}

#[tokio::test]
async fn roster_only_changes_do_not_rewrite_the_slot() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::start(
        file_persistence(&dir),
        StaticRoster(vec![User::new(1, "Ervin Howell")]),
    );
    session.wait_for_roster().await;

    // Nothing has been added, so the roster load must not have created the slot.
    assert!(FileStorage::new(dir.path()).get("tasks").unwrap().is_none());
    assert_eq!(session.store().snapshot().users.len(), 1);
}

#[tokio::test]
async fn subscribers_observe_dispatches() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::start(file_persistence(&dir), StaticRoster(Vec::new()));
    let mut updates = session.store().subscribe();

    session
        .store()
        .dispatch(Action::AddTask(Task::new("1", "Watched")));

    tokio::time::timeout(Duration::from_secs(2), updates.changed())
        .await
        .expect("update should arrive")
        .unwrap();
    let latest = updates.borrow_and_update().clone();
    assert!(latest.tasks.iter().any(|t| t.title == "Watched"));
}

#[test]
fn filter_state_is_transient() {
    let mut filter = FilterState::default();
    let start = Instant::now();
    filter.set_search("abc", start);
    filter.cycle_status();
    filter.reset();
    assert_eq!(filter.search(), "");
    assert_eq!(filter.settled_search(), "");
    assert_eq!(filter.status, Filter::All);
    assert!(filter.next_deadline().is_none());
}
