//! Goals and their milestones.
//!
//! # Invariants
//! - Milestone order is insertion order and is preserved on every write.
//! - `completed_at` is recomputed only when a milestone is toggled; adding or
//!   removing milestones leaves it untouched.
//! - A goal with zero milestones never becomes completed through a toggle.

use super::validation::{require_title, DraftValidationError};
use super::{new_entity_id, Entity};
use serde::{Deserialize, Serialize};

/// A checkpoint owned by exactly one goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique within the parent goal.
    pub id: String,
    pub title: String,
    pub completed: bool,
}

impl Milestone {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            title: title.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_date: String,
    pub milestones: Vec<Milestone>,
    pub created_at: String,
    /// Rollup of `milestones`; see module invariants.
    pub completed_at: Option<String>,
}

impl Entity for Goal {
    const KIND: &'static str = "goals";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Goal {
    pub fn from_draft(draft: NewGoal, id: String, now: String) -> Self {
        let mut goal = Self {
            id,
            title: draft.title,
            description: draft.description,
            target_date: draft.target_date,
            milestones: draft.milestones,
            created_at: now.clone(),
            completed_at: None,
        };
        goal.recompute_completion(now);
        goal
    }

    /// True when there is at least one milestone and all are completed.
    pub fn all_milestones_completed(&self) -> bool {
        !self.milestones.is_empty() && self.milestones.iter().all(|m| m.completed)
    }

    /// Sets `completed_at` to `now` when every milestone is done, else clears it.
    pub fn recompute_completion(&mut self, now: String) {
        self.completed_at = self.all_milestones_completed().then_some(now);
    }

    /// Flips one milestone and recomputes the rollup.
    ///
    /// Returns `false` (and changes nothing) when `milestone_id` is unknown.
    pub fn toggle_milestone(&mut self, milestone_id: &str, now: String) -> bool {
        let Some(milestone) = self.milestones.iter_mut().find(|m| m.id == milestone_id) else {
            return false;
        };
        milestone.completed = !milestone.completed;
        self.recompute_completion(now);
        true
    }

    /// Appends a new incomplete milestone and returns its id.
    pub fn add_milestone(&mut self, title: impl Into<String>) -> String {
        let milestone = Milestone::new(title);
        let id = milestone.id.clone();
        self.milestones.push(milestone);
        id
    }

    /// Drops a milestone by id. Does not touch `completed_at`.
    pub fn remove_milestone(&mut self, milestone_id: &str) -> bool {
        let before = self.milestones.len();
        self.milestones.retain(|m| m.id != milestone_id);
        self.milestones.len() != before
    }
}

/// Editor input for a new goal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub target_date: String,
    pub milestones: Vec<Milestone>,
}

impl NewGoal {
    pub fn new(title: impl Into<String>, target_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            target_date: target_date.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_milestone(mut self, title: impl Into<String>) -> Self {
        self.milestones.push(Milestone::new(title));
        self
    }

    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_title(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::{Goal, NewGoal};

    fn goal_with(titles: &[&str]) -> Goal {
        let draft = titles
            .iter()
            .fold(NewGoal::new("Read books", "2026-12-31"), |draft, title| {
                draft.with_milestone(*title)
            });
        Goal::from_draft(draft, "g-1".to_string(), "t0".to_string())
    }

    #[test]
    fn new_goal_is_not_completed() {
        let goal = goal_with(&["A", "B"]);
        assert_eq!(goal.completed_at, None);
        assert_eq!(goal.milestones.len(), 2);
    }

    #[test]
    fn completing_every_milestone_stamps_goal() {
        let mut goal = goal_with(&["A", "B"]);
        let a = goal.milestones[0].id.clone();
        let b = goal.milestones[1].id.clone();

        assert!(goal.toggle_milestone(&a, "t1".to_string()));
        assert_eq!(goal.completed_at, None);
        assert!(goal.toggle_milestone(&b, "t2".to_string()));
        assert_eq!(goal.completed_at.as_deref(), Some("t2"));

        goal.toggle_milestone(&b, "t3".to_string());
        assert_eq!(goal.completed_at, None);
    }

    #[test]
    fn empty_goal_never_completes() {
        let mut goal = goal_with(&[]);
        assert!(!goal.toggle_milestone("missing", "t1".to_string()));
        goal.recompute_completion("t2".to_string());
        assert_eq!(goal.completed_at, None);
    }

    #[test]
    fn unknown_milestone_toggle_changes_nothing() {
        let mut goal = goal_with(&["A"]);
        let a = goal.milestones[0].id.clone();
        goal.toggle_milestone(&a, "t1".to_string());
        let before = goal.clone();

        assert!(!goal.toggle_milestone("nope", "t2".to_string()));
        assert_eq!(goal, before);
    }

    #[test]
    fn removing_last_open_milestone_does_not_roll_up() {
        let mut goal = goal_with(&["A", "B"]);
        let a = goal.milestones[0].id.clone();
        let b = goal.milestones[1].id.clone();
        goal.toggle_milestone(&a, "t1".to_string());

        assert!(goal.remove_milestone(&b));
        assert!(goal.all_milestones_completed());
        assert_eq!(goal.completed_at, None);
    }

    #[test]
    fn added_milestones_keep_insertion_order() {
        let mut goal = goal_with(&["A"]);
        let second = goal.add_milestone("B");
        let third = goal.add_milestone("C");
        let titles: Vec<&str> = goal.milestones.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert_ne!(second, third);
    }
}
