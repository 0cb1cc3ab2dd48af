//! Local persistence and state core for FocusFlow.
//! This crate owns the task, time-block and goal collections and keeps them
//! durable across restarts.

pub mod app;
pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod snapshot;
pub mod state;
pub mod store;

pub use app::FocusFlow;
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{Goal, Milestone, NewGoal};
pub use model::task::{NewTask, Priority, Task};
pub use model::time_block::{NewTimeBlock, TimeBlock, DEFAULT_BLOCK_COLOR, PRESET_BLOCK_COLORS};
pub use model::validation::DraftValidationError;
pub use model::Entity;
pub use repo::{
    CollectionRepository, GoalRepository, Persisted, SaveOutcome, TaskRepository,
    TimeBlockRepository,
};
pub use snapshot::{backup_file_name, ImportReport, Snapshot, SnapshotError, SnapshotService};
pub use state::{CollectionView, GoalController, StateController, TaskController, TimeBlockController};
pub use store::{DurableStore, MemoryStore, SharedStore, SqliteStore, StoreError, StoreResult};

/// Minimal health check.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
