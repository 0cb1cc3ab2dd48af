//! Scheduled time blocks.

use super::validation::{parse_time_of_day, require_title, DraftValidationError};
use super::Entity;
use serde::{Deserialize, Serialize};

/// Color given to a block created without an explicit color.
pub const DEFAULT_BLOCK_COLOR: &str = "#0066CC";

/// Palette offered by the block editor, default first.
pub const PRESET_BLOCK_COLORS: [&str; 6] = [
    DEFAULT_BLOCK_COLOR,
    "#22C55E",
    "#F59E0B",
    "#EF4444",
    "#8B5CF6",
    "#EC4899",
];

/// A titled span of time on one day. Blocks have no completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub id: String,
    pub title: String,
    /// Date-only (`YYYY-MM-DD`).
    pub date: String,
    /// `HH:MM`. Ordering against `end_time` is not enforced on stored records.
    pub start_time: String,
    pub end_time: String,
    pub category: String,
    pub color: String,
    pub notes: String,
}

impl Entity for TimeBlock {
    const KIND: &'static str = "time_blocks";

    fn id(&self) -> &str {
        &self.id
    }
}

impl TimeBlock {
    pub fn from_draft(draft: NewTimeBlock, id: String) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            category: draft.category,
            color: draft
                .color
                .unwrap_or_else(|| DEFAULT_BLOCK_COLOR.to_string()),
            notes: draft.notes,
        }
    }
}

/// Editor input for a new block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTimeBlock {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub category: String,
    /// `None` falls back to [`DEFAULT_BLOCK_COLOR`].
    pub color: Option<String>,
    pub notes: String,
}

impl NewTimeBlock {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Editor-side check: non-blank title, `HH:MM` times, end after start.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_title(&self.title)?;
        let start = parse_time_of_day("startTime", &self.start_time)?;
        let end = parse_time_of_day("endTime", &self.end_time)?;
        if end <= start {
            return Err(DraftValidationError::EndNotAfterStart {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }
        Ok(())
    }
}
