//! Operations that only exist for one entity kind.

use super::StateController;
use crate::model::goal::{Goal, NewGoal};
use crate::model::task::{NewTask, Task};
use crate::model::time_block::{NewTimeBlock, TimeBlock};
use crate::model::{new_entity_id, now_timestamp};

impl StateController<Task> {
    /// Creates a task with a fresh id and creation timestamp and appends it.
    pub fn add(&self, draft: NewTask) -> Task {
        let task = Task::from_draft(draft, new_entity_id(), now_timestamp());
        let appended = task.clone();
        self.mutate("add", move |tasks| {
            tasks.push(appended.clone());
            true
        });
        task
    }

    /// Flips completion of one task, stamping or clearing `completed_at`.
    pub fn toggle_complete(&self, id: &str) -> bool {
        let id = id.to_owned();
        let now = now_timestamp();
        self.mutate("toggle_complete", move |tasks| {
            match tasks.iter_mut().find(|task| task.id == id) {
                Some(task) => {
                    task.toggle_completed(now.clone());
                    true
                }
                None => false,
            }
        })
    }
}

impl StateController<TimeBlock> {
    /// Creates a block with a fresh id and appends it.
    pub fn add(&self, draft: NewTimeBlock) -> TimeBlock {
        let block = TimeBlock::from_draft(draft, new_entity_id());
        let appended = block.clone();
        self.mutate("add", move |blocks| {
            blocks.push(appended.clone());
            true
        });
        block
    }
}

impl StateController<Goal> {
    /// Creates a goal with a fresh id and creation timestamp and appends it.
    pub fn add(&self, draft: NewGoal) -> Goal {
        let goal = Goal::from_draft(draft, new_entity_id(), now_timestamp());
        let appended = goal.clone();
        self.mutate("add", move |goals| {
            goals.push(appended.clone());
            true
        });
        goal
    }

    /// Flips one milestone of one goal and recomputes the goal's completion.
    ///
    /// Returns `false` when either id is unknown.
    pub fn toggle_milestone(&self, goal_id: &str, milestone_id: &str) -> bool {
        let goal_id = goal_id.to_owned();
        let milestone_id = milestone_id.to_owned();
        let now = now_timestamp();
        self.mutate("toggle_milestone", move |goals| {
            goals
                .iter_mut()
                .find(|goal| goal.id == goal_id)
                .is_some_and(|goal| goal.toggle_milestone(&milestone_id, now.clone()))
        })
    }
}
