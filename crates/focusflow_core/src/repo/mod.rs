//! Per-kind collection repositories.
//!
//! # Responsibility
//! - Load and save one whole collection under its fixed storage key.
//! - Absorb decode and store failures so callers never see them.
//!
//! # Invariants
//! - Every kind owns a distinct key under the shared `@focusflow_` prefix.
//! - Repositories have no knowledge of other entity kinds.

pub mod collection_repo;

use crate::model::goal::Goal;
use crate::model::task::Task;
use crate::model::time_block::TimeBlock;
use crate::model::Entity;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use collection_repo::{CollectionRepository, SaveOutcome};

/// Prefix shared by every key this application writes.
pub const STORAGE_KEY_PREFIX: &str = "@focusflow_";
pub const TASKS_KEY: &str = "@focusflow_tasks";
pub const TIME_BLOCKS_KEY: &str = "@focusflow_timeblocks";
pub const GOALS_KEY: &str = "@focusflow_goals";

/// An entity kind that is persisted as one collection blob.
pub trait Persisted:
    Entity + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    const STORAGE_KEY: &'static str;
}

impl Persisted for Task {
    const STORAGE_KEY: &'static str = TASKS_KEY;
}

impl Persisted for TimeBlock {
    const STORAGE_KEY: &'static str = TIME_BLOCKS_KEY;
}

impl Persisted for Goal {
    const STORAGE_KEY: &'static str = GOALS_KEY;
}

pub type TaskRepository = CollectionRepository<Task>;
pub type TimeBlockRepository = CollectionRepository<TimeBlock>;
pub type GoalRepository = CollectionRepository<Goal>;

#[cfg(test)]
mod tests {
    use super::{Persisted, STORAGE_KEY_PREFIX};
    use crate::model::goal::Goal;
    use crate::model::task::Task;
    use crate::model::time_block::TimeBlock;

    #[test]
    fn keys_are_distinct_and_share_prefix() {
        let keys = [Task::STORAGE_KEY, TimeBlock::STORAGE_KEY, Goal::STORAGE_KEY];
        for key in keys {
            assert!(key.starts_with(STORAGE_KEY_PREFIX), "{key}");
        }
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
        assert_ne!(keys[0], keys[2]);
    }
}
