//! Task records.

use super::validation::{require_title, DraftValidationError};
use super::Entity;
use serde::{Deserialize, Serialize};

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// A to-do item, optionally scheduled for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// Date-only (`YYYY-MM-DD`); `None` means unscheduled.
    pub due_date: Option<String>,
    pub priority: Priority,
    pub category: String,
    pub notes: String,
    /// Set once at creation, never rewritten.
    pub created_at: String,
    /// Present iff `completed` is true.
    pub completed_at: Option<String>,
}

impl Entity for Task {
    const KIND: &'static str = "tasks";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Task {
    /// Builds a stored task from an editor draft.
    ///
    /// A draft that is already completed gets `completed_at = created_at` so
    /// the completion invariant holds from the first save.
    pub fn from_draft(draft: NewTask, id: String, now: String) -> Self {
        let completed_at = draft.completed.then(|| now.clone());
        Self {
            id,
            title: draft.title,
            completed: draft.completed,
            due_date: draft.due_date,
            priority: draft.priority,
            category: draft.category,
            notes: draft.notes,
            created_at: now,
            completed_at,
        }
    }

    /// Flips completion, stamping or clearing `completed_at` accordingly.
    pub fn toggle_completed(&mut self, now: String) {
        self.set_completed(!self.completed, now);
    }

    /// Sets completion; `now` is recorded only on the incomplete -> complete edge.
    pub fn set_completed(&mut self, completed: bool, now: String) {
        if completed == self.completed {
            return;
        }
        self.completed = completed;
        self.completed_at = completed.then_some(now);
    }
}

/// Editor input for a new task: everything except the fields the
/// controller assigns (`id`, `created_at`, `completed_at`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub due_date: Option<String>,
    pub priority: Priority,
    pub category: String,
    pub notes: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Editor-side check; the controller itself persists whatever it is given.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_title(&self.title)
    }
}
