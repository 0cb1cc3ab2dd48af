mod common;

use common::TestStore;
use focusflow_core::{FocusFlow, NewGoal, NewTask, NewTimeBlock, SqliteStore};
use std::sync::Arc;

#[tokio::test]
async fn state_survives_restart_on_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusflow.sqlite3");

    let (task_id, goal_id) = {
        let app = FocusFlow::start(Arc::new(SqliteStore::open(&path).unwrap())).await;
        let task = app.tasks.add(NewTask::new("Persist me").with_category("Work"));
        app.tasks.toggle_complete(&task.id);
        app.time_blocks
            .add(NewTimeBlock::new("Gym", "2026-01-05", "07:00", "08:00"));
        let goal = app.goals.add(NewGoal::new("Run 10k", "2026-09-01").with_milestone("5k"));
        app.goals.toggle_milestone(&goal.id, &goal.milestones[0].id);
        app.flush_all().await;
        (task.id, goal.id)
    };

    let app = FocusFlow::start(Arc::new(SqliteStore::open(&path).unwrap())).await;
    let task = app.tasks.get(&task_id).unwrap();
    assert!(task.completed);
    assert!(task.completed_at.is_some());
    assert_eq!(app.time_blocks.len(), 1);
    let goal = app.goals.get(&goal_id).unwrap();
    assert!(goal.completed_at.is_some());
}

#[tokio::test]
async fn start_leaves_every_controller_loaded() {
    let store = TestStore::new();
    let app = FocusFlow::start(store.shared()).await;
    assert!(!app.tasks.is_loading());
    assert!(!app.time_blocks.is_loading());
    assert!(!app.goals.is_loading());
    app.flush_all().await;
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn unreadable_store_starts_empty() {
    let store = TestStore::new();
    store.fail_reads(true);
    let app = FocusFlow::start(store.shared()).await;
    assert!(app.tasks.is_empty());
    assert!(app.time_blocks.is_empty());
    assert!(app.goals.is_empty());
}
