//! Task board data types.
//!
//! Sections own their tasks in display order; a task's `order` mirrors its
//! index and its `status` mirrors the owning section's id.

use fake::{Dummy, Faker};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Task priority levels.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Normal,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Normal];

    /// Return the display label.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Normal => "Normal",
        }
    }

    /// Cycle to the next priority, wrapping around.
    ///
    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Normal,
            Priority::Normal => Priority::High,
        }
    }

    /// Cycle to the previous priority, wrapping around.
    ///
    pub fn previous(self) -> Self {
        match self {
            Priority::High => Priority::Normal,
            Priority::Medium => Priority::High,
            Priority::Normal => Priority::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Dummy<Faker> for Priority {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Priority::ALL[rng.gen_range(0..Priority::ALL.len())]
    }
}

/// Accent marker of a section. Colors are resolved by the UI theme.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accent {
    Amber,
    Sky,
    Emerald,
    Rose,
    Slate,
}

impl Dummy<Faker> for Accent {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        match rng.gen_range(0..5) {
            0 => Accent::Amber,
            1 => Accent::Sky,
            2 => Accent::Emerald,
            3 => Accent::Rose,
            _ => Accent::Slate,
        }
    }
}

/// Defines task data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignees: Vec<String>, // Display initials, possibly ending in a "+N" marker
    pub status: String,         // Id of the owning section
    pub order: usize,
}

/// Defines section (status column) data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub accent: Accent,
    pub tasks: Vec<Task>,
}

impl Section {
    /// Return the index of the task with the given id.
    ///
    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }

    /// Rewrite `order` and `status` of every task from its position.
    ///
    pub fn renumber(&mut self) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.order = index;
            task.status = self.id.clone();
        }
    }
}

/// Input for creating a new task.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub assignees: Vec<String>,
    pub status: String,
}

/// Ordered task ids of one section, as sent for confirmation.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionOrder {
    pub status_id: String,
    pub tasks: Vec<TaskOrder>,
}

/// Position of a single task.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOrder {
    pub id: String,
    pub order: usize,
}

/// Full board ordering, one entry per section.
///
pub type ReorderPayload = Vec<SectionOrder>;
