//! Application bootstrap.
//!
//! Builds exactly one controller per entity kind over a shared store and
//! hands them back in one value the caller threads through explicitly.

use crate::repo::{GoalRepository, TaskRepository, TimeBlockRepository};
use crate::snapshot::SnapshotService;
use crate::state::{GoalController, TaskController, TimeBlockController};
use crate::store::SharedStore;
use log::info;

/// Every controller of one running application, plus backup/restore.
#[derive(Clone)]
pub struct FocusFlow {
    pub tasks: TaskController,
    pub time_blocks: TimeBlockController,
    pub goals: GoalController,
    pub snapshots: SnapshotService,
}

impl FocusFlow {
    /// Creates the controllers and waits for their initial loads.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub async fn start(store: SharedStore) -> Self {
        let app = Self {
            tasks: TaskController::new(TaskRepository::new(store.clone())),
            time_blocks: TimeBlockController::new(TimeBlockRepository::new(store.clone())),
            goals: GoalController::new(GoalRepository::new(store.clone())),
            snapshots: SnapshotService::new(store),
        };
        app.reload_all().await;
        info!(
            "event=app_start module=app status=ok tasks={} time_blocks={} goals={}",
            app.tasks.len(),
            app.time_blocks.len(),
            app.goals.len()
        );
        app
    }

    /// Re-reads every collection; required after an import.
    pub async fn reload_all(&self) {
        tokio::join!(
            self.tasks.load(),
            self.time_blocks.load(),
            self.goals.load()
        );
    }

    /// Waits for every dispatched save to reach the store.
    pub async fn flush_all(&self) {
        tokio::join!(
            self.tasks.flush(),
            self.time_blocks.flush(),
            self.goals.flush()
        );
    }

    /// Imports a snapshot and, when it parsed, reloads the controllers so
    /// they observe the imported data.
    pub async fn import_and_reload(&self, text: &str) -> bool {
        self.flush_all().await;
        let imported = self.snapshots.import_snapshot(text).await;
        if imported {
            self.reload_all().await;
        }
        imported
    }
}
