//! Whole-application backup and restore.
//!
//! # Responsibility
//! - Export all three collections plus an export timestamp as one document.
//! - Import any subset of those collections back through the repositories.
//!
//! # Invariants
//! - Export reads repositories, never controllers.
//! - A document that fails to parse writes nothing.
//! - Valid JSON that is not an object (other than `null`) imports nothing and
//!   still counts as success.
//! - Collections absent (or `null`) in an import document are left untouched.
//! - Import does not roll back when an individual save fails.

use crate::model::goal::Goal;
use crate::model::now_timestamp;
use crate::model::task::Task;
use crate::model::time_block::TimeBlock;
use crate::repo::{GoalRepository, SaveOutcome, TaskRepository, TimeBlockRepository};
use crate::store::SharedStore;
use chrono::NaiveDate;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const BACKUP_FILE_PREFIX: &str = "focusflow-backup-";

#[derive(Debug)]
pub enum SnapshotError {
    Encode(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
        }
    }
}

/// Export document layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub time_blocks: Vec<TimeBlock>,
    pub goals: Vec<Goal>,
    pub export_date: String,
}

/// Import document layout: every member optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotImport {
    tasks: Option<Vec<Task>>,
    time_blocks: Option<Vec<TimeBlock>>,
    goals: Option<Vec<Goal>>,
}

/// Which collections an import wrote and whether each write succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub tasks: Option<SaveOutcome>,
    pub time_blocks: Option<SaveOutcome>,
    pub goals: Option<SaveOutcome>,
}

/// Composes the three repositories for backup/restore.
#[derive(Clone)]
pub struct SnapshotService {
    tasks: TaskRepository,
    time_blocks: TimeBlockRepository,
    goals: GoalRepository,
}

impl SnapshotService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            tasks: TaskRepository::new(store.clone()),
            time_blocks: TimeBlockRepository::new(store.clone()),
            goals: GoalRepository::new(store),
        }
    }

    /// Loads every collection from durable state into one [`Snapshot`].
    pub async fn collect(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.load().await,
            time_blocks: self.time_blocks.load().await,
            goals: self.goals.load().await,
            export_date: now_timestamp(),
        }
    }

    /// Returns the pretty-printed export document.
    pub async fn export_snapshot(&self) -> Result<String, SnapshotError> {
        let snapshot = self.collect().await;
        let text = serde_json::to_string_pretty(&snapshot).map_err(SnapshotError::Encode)?;
        info!(
            "event=snapshot_export module=snapshot status=ok tasks={} time_blocks={} goals={} bytes={}",
            snapshot.tasks.len(),
            snapshot.time_blocks.len(),
            snapshot.goals.len(),
            text.len()
        );
        Ok(text)
    }

    /// Imports a document produced by [`SnapshotService::export_snapshot`].
    ///
    /// Returns `false` only when the document cannot be parsed, in which case
    /// nothing is written. Individual save failures are logged, not surfaced.
    pub async fn import_snapshot(&self, text: &str) -> bool {
        self.import_with_report(text).await.is_some()
    }

    /// Like [`SnapshotService::import_snapshot`], but reports per-collection
    /// outcomes. `None` means the document did not parse.
    pub async fn import_with_report(&self, text: &str) -> Option<ImportReport> {
        let document = parse_import(text)?;

        let mut report = ImportReport::default();
        if let Some(tasks) = &document.tasks {
            report.tasks = Some(self.tasks.save(tasks).await);
        }
        if let Some(time_blocks) = &document.time_blocks {
            report.time_blocks = Some(self.time_blocks.save(time_blocks).await);
        }
        if let Some(goals) = &document.goals {
            report.goals = Some(self.goals.save(goals).await);
        }

        let failed = [report.tasks, report.time_blocks, report.goals]
            .iter()
            .filter(|outcome| **outcome == Some(SaveOutcome::Failed))
            .count();
        if failed > 0 {
            warn!("event=snapshot_import module=snapshot status=partial failed_saves={failed}");
        } else {
            info!(
                "event=snapshot_import module=snapshot status=ok tasks={} time_blocks={} goals={}",
                report.tasks.is_some(),
                report.time_blocks.is_some(),
                report.goals.is_some()
            );
        }
        Some(report)
    }
}

fn parse_import(text: &str) -> Option<SnapshotImport> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            error!(
                "event=snapshot_import module=snapshot status=error stage=parse bytes={} error={err}",
                text.len()
            );
            return None;
        }
    };

    match value {
        Value::Object(_) => match serde_json::from_value(value) {
            Ok(document) => Some(document),
            Err(err) => {
                error!("event=snapshot_import module=snapshot status=error stage=shape error={err}");
                None
            }
        },
        Value::Null => {
            error!("event=snapshot_import module=snapshot status=error stage=shape error=null_document");
            None
        }
        _ => {
            warn!("event=snapshot_import module=snapshot status=ok stage=shape collections=none");
            Some(SnapshotImport::default())
        }
    }
}

/// File name offered for an export taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{BACKUP_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}
