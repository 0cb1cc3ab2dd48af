//! In-memory state controllers, one per entity kind.
//!
//! # Responsibility
//! - Hold the authoritative collection and the loading flag for one kind.
//! - Apply every mutation in memory, then hand the full collection to a
//!   background writer that persists it through the repository.
//!
//! # Invariants
//! - No save is dispatched while the controller is loading.
//! - Mutations issued while loading are replayed on top of the loaded
//!   collection, in order.
//! - Saves are coalesced: the writer always persists the newest collection,
//!   so durable state converges to the final in-memory state.

mod controller;
mod kinds;
mod writer;

pub use controller::{CollectionView, StateController};

use crate::model::goal::Goal;
use crate::model::task::Task;
use crate::model::time_block::TimeBlock;

pub type TaskController = StateController<Task>;
pub type TimeBlockController = StateController<TimeBlock>;
pub type GoalController = StateController<Goal>;
