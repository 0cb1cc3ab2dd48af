//! Domain model for the three persisted entity kinds.
//!
//! # Responsibility
//! - Define the records stored in each collection and their wire names.
//! - Own the rollup rules for completion timestamps.
//!
//! # Invariants
//! - `Task::completed_at` is `Some` iff `Task::completed` is true.
//! - `Goal::completed_at` is `Some` only when the goal has at least one
//!   milestone and every milestone is completed.
//! - Ids are opaque strings; new ids never derive from wall-clock time.

pub mod goal;
pub mod task;
pub mod time_block;
pub mod validation;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// A root-level record kind with its own collection.
pub trait Entity {
    /// Short stable label used in log events (`tasks`, `time_blocks`, `goals`).
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Generates a fresh opaque id (UUID v4), unique without coordination even
/// for records created within the same clock tick.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current instant rendered the way every stored timestamp is rendered.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Renders `at` as ISO-8601 UTC with millisecond precision, e.g.
/// `2026-01-04T09:30:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
