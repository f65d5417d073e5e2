//! Pending mutation log.
//!
//! Every optimistic board change is recorded as an [`Operation`] that knows
//! its own inverse. Rolling back one mutation undoes the newer ones, undoes
//! the failed one and then replays the newer ones, so a rejected
//! confirmation never discards a concurrent change.

use super::error::BoardError;
use super::model::{Section, Task};
use log::*;

/// Identifier handed out for each recorded mutation.
///
pub type MutationId = u64;

/// Position of a task inside a section.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub section_id: String,
    pub index: usize,
}

impl Slot {
    pub fn new(section_id: &str, index: usize) -> Self {
        Slot {
            section_id: section_id.to_owned(),
            index,
        }
    }
}

/// Reversible change to the section layout.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Move { task_id: String, from: Slot, to: Slot },
    Insert { task: Task, at: Slot },
    Remove { task: Task, at: Slot },
}

impl Operation {
    /// Return the operation that undoes this one.
    ///
    pub fn inverse(&self) -> Operation {
        match self {
            Operation::Move { task_id, from, to } => Operation::Move {
                task_id: task_id.clone(),
                from: to.clone(),
                to: from.clone(),
            },
            Operation::Insert { task, at } => Operation::Remove {
                task: task.clone(),
                at: at.clone(),
            },
            Operation::Remove { task, at } => Operation::Insert {
                task: task.clone(),
                at: at.clone(),
            },
        }
    }

    /// Apply to the sections and return the operation as it was actually
    /// performed. Tasks are located by id, so source indices are refreshed
    /// and target indices clamped to the section length.
    ///
    pub fn apply(&self, sections: &mut [Section]) -> Result<Operation, BoardError> {
        match self {
            Operation::Move { task_id, from, to } => {
                let source = section_index(sections, &from.section_id)?;
                let target = section_index(sections, &to.section_id)?;
                let from_index = sections[source].position(task_id).ok_or_else(|| {
                    BoardError::TaskNotFound {
                        task_id: task_id.clone(),
                        section_id: from.section_id.clone(),
                    }
                })?;
                let task = sections[source].tasks.remove(from_index);
                let to_index = to.index.min(sections[target].tasks.len());
                sections[target].tasks.insert(to_index, task);
                sections[source].renumber();
                if source != target {
                    sections[target].renumber();
                }
                Ok(Operation::Move {
                    task_id: task_id.clone(),
                    from: Slot::new(&from.section_id, from_index),
                    to: Slot::new(&to.section_id, to_index),
                })
            }
            Operation::Insert { task, at } => {
                let target = section_index(sections, &at.section_id)?;
                let index = at.index.min(sections[target].tasks.len());
                let mut task = task.clone();
                task.status = at.section_id.clone();
                sections[target].tasks.insert(index, task.clone());
                sections[target].renumber();
                Ok(Operation::Insert {
                    task,
                    at: Slot::new(&at.section_id, index),
                })
            }
            Operation::Remove { task, at } => {
                let target = section_index(sections, &at.section_id)?;
                let index = sections[target].position(&task.id).ok_or_else(|| {
                    BoardError::TaskNotFound {
                        task_id: task.id.clone(),
                        section_id: at.section_id.clone(),
                    }
                })?;
                let removed = sections[target].tasks.remove(index);
                sections[target].renumber();
                Ok(Operation::Remove {
                    task: removed,
                    at: Slot::new(&at.section_id, index),
                })
            }
        }
    }

    /// Return the notice title shown when this operation is rolled back.
    ///
    pub fn failure_title(&self) -> &'static str {
        match self {
            Operation::Move { .. } => "Unable to reorder tasks",
            Operation::Insert { .. } => "Unable to create task",
            Operation::Remove { .. } => "Unable to remove task",
        }
    }
}

fn section_index(sections: &[Section], section_id: &str) -> Result<usize, BoardError> {
    sections
        .iter()
        .position(|section| section.id == section_id)
        .ok_or_else(|| BoardError::SectionNotFound {
            id: section_id.to_owned(),
        })
}

#[derive(Clone, Debug)]
struct Entry {
    id: MutationId,
    operation: Operation,
    settled: bool,
}

/// Ordered log of applied operations.
///
/// A confirmed entry stays in the log, marked settled, while any older entry
/// is still waiting. Rolling back that older entry has to undo and replay
/// every newer one, settled or not.
///
#[derive(Clone, Debug, Default)]
pub struct MutationLog {
    next_id: MutationId,
    entries: Vec<Entry>,
}

impl MutationLog {
    /// Record an already applied operation and return its id.
    ///
    pub fn record(&mut self, operation: Operation) -> MutationId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Entry {
            id,
            operation,
            settled: false,
        });
        id
    }

    /// Settle a confirmed mutation, returning its operation.
    ///
    pub fn confirm(&mut self, id: MutationId) -> Option<Operation> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id && !entry.settled)?;
        entry.settled = true;
        let operation = entry.operation.clone();
        self.prune();
        Some(operation)
    }

    /// Undo a rejected mutation while keeping every newer one.
    ///
    /// Works on a copy of the sections, which replaces `sections` only once
    /// every undo step succeeded. Newer entries that no longer apply after
    /// the undo (a move of a task whose creation was rejected) are dropped.
    ///
    pub fn rollback(
        &mut self,
        id: MutationId,
        sections: &mut Vec<Section>,
    ) -> Result<Operation, BoardError> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.id == id && !entry.settled)
            .ok_or(BoardError::UnknownMutation(id))?;

        let mut working = sections.clone();
        let newer = &self.entries[position + 1..];
        for entry in newer.iter().rev() {
            entry.operation.inverse().apply(&mut working)?;
        }
        let failed = self.entries[position].operation.clone();
        failed.inverse().apply(&mut working)?;

        let mut replayed = Vec::with_capacity(newer.len());
        for entry in newer {
            match entry.operation.apply(&mut working) {
                Ok(operation) => replayed.push(Entry {
                    operation,
                    ..entry.clone()
                }),
                Err(e) => warn!("Dropping mutation {} during replay: {}", entry.id, e),
            }
        }

        *sections = working;
        self.entries.truncate(position);
        self.entries.extend(replayed);
        self.prune();
        Ok(failed)
    }

    /// Return the number of unconfirmed mutations.
    ///
    pub fn pending_len(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.settled).count()
    }

    /// Return true if the mutation is still unconfirmed.
    ///
    pub fn is_pending(&self, id: MutationId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.id == id && !entry.settled)
    }

    fn prune(&mut self) {
        let settled = self
            .entries
            .iter()
            .take_while(|entry| entry.settled)
            .count();
        self.entries.drain(..settled);
    }
}
