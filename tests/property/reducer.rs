//! Property-based tests for the task reducer and persistence adapter.
//!
//! Uses proptest to verify:
//! 1. `AddTask` appends exactly one task at the end.
//! 2. `UpdateTask` keeps length and order, replacing only the target.
//! 3. `DeleteTask` of an absent ID is a no-op and deleting twice equals once.
//! 4. Whatever is written to the task slot reads back unchanged.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use proptest::prelude::*;
use taskboard::storage::{InMemoryStorage, TaskPersistence};
use taskboard::store::{Action, Snapshot, apply};
use taskboard_proto::task::{Priority, Status, Task, TaskId};
use taskboard_proto::user::UserId;

type TaskFields = (String, String, Option<Priority>, Option<Status>, Option<UserId>);

fn arb_task_fields() -> impl Strategy<Value = TaskFields> {
    (
        "[^\x00]{1,48}",
        "[^\x00]{0,96}",
        prop::option::of(prop::sample::select(Priority::ALL.to_vec())),
        prop::option::of(prop::sample::select(Status::ALL.to_vec())),
        prop::option::of((1u64..20).prop_map(UserId::new)),
    )
}

/// Task lists with unique, index-derived IDs.
fn arb_tasks(max: usize) -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(arb_task_fields(), 0..max).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (title, description, priority, status, assignee))| Task {
                id: TaskId::new(format!("task-{i}")),
                title,
                description,
                priority,
                status,
                assignee,
            })
            .collect()
    })
}

fn seeded(tasks: Vec<Task>) -> Snapshot {
    Snapshot::with_tasks(tasks)
}

proptest! {
    #[test]
    fn add_appends_at_end(tasks in arb_tasks(12), title in "[a-zA-Z]{1,16}") {
        let before = seeded(tasks.clone());
        let added = Task::new("fresh", title);
        let after = apply(&before, Action::AddTask(added.clone()));

        prop_assert_eq!(after.tasks.len(), tasks.len() + 1);
        prop_assert_eq!(&after.tasks[..tasks.len()], &tasks[..]);
        prop_assert_eq!(after.tasks.last(), Some(&added));
    }

    #[test]
    fn update_replaces_in_place(
        tasks in arb_tasks(12).prop_filter("non-empty", |t| !t.is_empty()),
        pick in any::<prop::sample::Index>(),
        title in "[a-zA-Z]{1,16}",
    ) {
        let index = pick.index(tasks.len());
        let replacement = Task {
            title,
            status: Some(Status::Done),
            ..tasks[index].clone()
        };
        let after = apply(&seeded(tasks.clone()), Action::UpdateTask(replacement.clone()));

        prop_assert_eq!(after.tasks.len(), tasks.len());
        for (i, task) in after.tasks.iter().enumerate() {
            if i == index {
                prop_assert_eq!(task, &replacement);
            } else {
                prop_assert_eq!(task, &tasks[i]);
            }
        }
    }

    #[test]
    fn update_of_absent_id_keeps_allocation(tasks in arb_tasks(12)) {
        let before = seeded(tasks);
        let after = apply(&before, Action::UpdateTask(Task::new("absent", "Ghost")));
        prop_assert!(Arc::ptr_eq(&before.tasks, &after.tasks));
    }

    #[test]
    fn delete_of_absent_id_is_noop(tasks in arb_tasks(12)) {
        let before = seeded(tasks);
        let after = apply(&before, Action::DeleteTask(TaskId::new("absent")));
        prop_assert!(Arc::ptr_eq(&before.tasks, &after.tasks));
        prop_assert_eq!(&after.tasks[..], &before.tasks[..]);
    }

    #[test]
    fn delete_is_idempotent(
        tasks in arb_tasks(12).prop_filter("non-empty", |t| !t.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let id = tasks[pick.index(tasks.len())].id.clone();
        let once = apply(&seeded(tasks.clone()), Action::DeleteTask(id.clone()));
        let twice = apply(&once, Action::DeleteTask(id.clone()));

        prop_assert_eq!(once.tasks.len(), tasks.len() - 1);
        prop_assert!(once.tasks.iter().all(|t| t.id != id));
        prop_assert_eq!(&twice.tasks[..], &once.tasks[..]);
    }

    #[test]
    fn roster_actions_never_touch_tasks(tasks in arb_tasks(8), message in "[a-z ]{0,24}") {
        let before = seeded(tasks);
        let after = apply(&before, Action::SetError(message));
        let after = apply(&after, Action::SetLoading(false));
        prop_assert!(Arc::ptr_eq(&before.tasks, &after.tasks));
    }

    #[test]
    fn persistence_roundtrip(tasks in arb_tasks(16)) {
        let persistence = TaskPersistence::new(Box::new(InMemoryStorage::new()), "tasks");
        persistence.write(&tasks);
        prop_assert_eq!(persistence.read(), tasks);
    }
}
