mod common;

use common::{goal, task, time_block, TestStore};
use focusflow_core::repo::{GOALS_KEY, TASKS_KEY, TIME_BLOCKS_KEY};
use focusflow_core::{
    FocusFlow, GoalRepository, ImportReport, NewTask, SaveOutcome, SnapshotService, TaskRepository,
    TimeBlockRepository,
};
use serde_json::Value;

#[tokio::test]
async fn export_contains_all_collections_and_timestamp() {
    let store = TestStore::new();
    TaskRepository::new(store.shared())
        .save(&[task("1", "Task")])
        .await;
    TimeBlockRepository::new(store.shared())
        .save(&[time_block("1", "Block")])
        .await;
    GoalRepository::new(store.shared())
        .save(&[goal("1", "Goal", &[])])
        .await;

    let text = SnapshotService::new(store.shared())
        .export_snapshot()
        .await
        .unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed["tasks"], serde_json::to_value([task("1", "Task")]).unwrap());
    assert_eq!(
        parsed["timeBlocks"],
        serde_json::to_value([time_block("1", "Block")]).unwrap()
    );
    assert_eq!(parsed["goals"], serde_json::to_value([goal("1", "Goal", &[])]).unwrap());
    assert!(parsed["exportDate"].as_str().is_some_and(|date| !date.is_empty()));
    assert_eq!(parsed.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn export_of_empty_store_has_empty_collections() {
    let store = TestStore::new();
    let text = SnapshotService::new(store.shared())
        .export_snapshot()
        .await
        .unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["tasks"], Value::Array(Vec::new()));
    assert_eq!(parsed["timeBlocks"], Value::Array(Vec::new()));
    assert_eq!(parsed["goals"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn export_then_import_into_fresh_store_round_trips() {
    let source = TestStore::new();
    let original = serde_json::from_str::<Vec<focusflow_core::Task>>(
        r#"[{"id":"1","title":"Task","completed":false,"dueDate":null,"priority":"low",
            "category":"","notes":"","createdAt":"2026-01-04","completedAt":null}]"#,
    )
    .unwrap();
    TaskRepository::new(source.shared()).save(&original).await;
    TimeBlockRepository::new(source.shared()).save(&[]).await;
    GoalRepository::new(source.shared()).save(&[]).await;

    let exported = SnapshotService::new(source.shared())
        .export_snapshot()
        .await
        .unwrap();

    let target = TestStore::new();
    assert!(
        SnapshotService::new(target.shared())
            .import_snapshot(&exported)
            .await
    );

    assert_eq!(TaskRepository::new(target.shared()).load().await, original);
    assert!(TimeBlockRepository::new(target.shared()).load().await.is_empty());
    assert!(GoalRepository::new(target.shared()).load().await.is_empty());
}

#[tokio::test]
async fn import_leaves_absent_collections_untouched() {
    let store = TestStore::new();
    let goals_blob = serde_json::to_string(&[goal("g", "Keep me", &[("m", true)])]).unwrap();
    let blocks_blob = serde_json::to_string(&[time_block("b", "Keep me too")]).unwrap();
    store.memory.seed(GOALS_KEY, goals_blob.clone());
    store.memory.seed(TIME_BLOCKS_KEY, blocks_blob.clone());

    let document = format!(
        "{{\"tasks\":{}}}",
        serde_json::to_string(&[task("1", "Imported")]).unwrap()
    );
    let report = SnapshotService::new(store.shared())
        .import_with_report(&document)
        .await
        .unwrap();

    assert_eq!(report.tasks, Some(SaveOutcome::Saved));
    assert_eq!(report.time_blocks, None);
    assert_eq!(report.goals, None);
    assert_eq!(store.memory.raw(GOALS_KEY), Some(goals_blob));
    assert_eq!(store.memory.raw(TIME_BLOCKS_KEY), Some(blocks_blob));
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn null_members_count_as_absent() {
    let store = TestStore::new();
    let imported = SnapshotService::new(store.shared())
        .import_snapshot(r#"{"tasks":null,"timeBlocks":[],"goals":null}"#)
        .await;
    assert!(imported);
    assert!(store.memory.raw(TASKS_KEY).is_none());
    assert_eq!(store.memory.raw(TIME_BLOCKS_KEY).as_deref(), Some("[]"));
    assert!(store.memory.raw(GOALS_KEY).is_none());
}

#[tokio::test]
async fn unparseable_document_returns_false_and_writes_nothing() {
    let store = TestStore::new();
    let service = SnapshotService::new(store.shared());

    assert!(!service.import_snapshot("not json").await);
    assert!(!service.import_snapshot("null").await);
    assert!(
        !service
            .import_snapshot(r#"{"tasks":[{"id":"1"}],"goals":[]}"#)
            .await
    );

    assert_eq!(store.writes(), 0);
    assert!(store.memory.is_empty());
}

#[tokio::test]
async fn non_object_json_imports_nothing_but_succeeds() {
    let store = TestStore::new();
    let service = SnapshotService::new(store.shared());

    for document in ["[]", "[1, 2, 3]", "42", r#""tasks""#, "true"] {
        let report = service.import_with_report(document).await.unwrap();
        assert_eq!(report, ImportReport::default(), "document {document}");
    }
    assert!(service.import_snapshot("[]").await);

    assert_eq!(store.writes(), 0);
    assert!(store.memory.is_empty());
}

#[tokio::test]
async fn failed_saves_still_report_success() {
    let store = TestStore::new();
    store.fail_writes(true);
    let service = SnapshotService::new(store.shared());

    let report = service
        .import_with_report(r#"{"tasks":[],"timeBlocks":[],"goals":[]}"#)
        .await
        .unwrap();
    assert_eq!(report.tasks, Some(SaveOutcome::Failed));
    assert!(service.import_snapshot(r#"{"goals":[]}"#).await);
}

#[tokio::test]
async fn controllers_observe_import_after_reload() {
    let store = TestStore::new();
    let app = FocusFlow::start(store.shared()).await;
    app.tasks.add(NewTask::new("will be replaced"));

    let document = format!(
        "{{\"tasks\":{}}}",
        serde_json::to_string(&[task("1", "From backup")]).unwrap()
    );
    assert!(app.import_and_reload(&document).await);
    assert_eq!(app.tasks.items(), vec![task("1", "From backup")]);
    assert!(!app.import_and_reload("{oops").await);
    assert_eq!(app.tasks.items(), vec![task("1", "From backup")]);
}
