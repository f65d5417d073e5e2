//! Task board store.
//!
//! Holds the ordered sections and their tasks. Every change is applied
//! immediately and recorded in a [`MutationLog`] until the persistence shim
//! confirms or rejects it.

pub mod drag;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod mutation;
pub mod persistence;

use self::{
    drag::DragData,
    error::BoardError,
    model::{CreateTaskInput, ReorderPayload, Section, SectionOrder, Task, TaskOrder},
    mutation::{MutationId, MutationLog, Operation, Slot},
};
use crate::utils::ids::timestamp_id;
use log::*;
use std::collections::HashSet;

/// Initials used when a task is created without assignees.
///
pub const DEFAULT_ASSIGNEE: &str = "AL";

/// Defines board store data structure.
///
#[derive(Clone, Debug, Default)]
pub struct Board {
    sections: Vec<Section>,
    active_task: Option<Task>,
    log: MutationLog,
    revision: u64,
}

impl Board {
    /// Build a board, ordering each section's tasks by their `order` field.
    ///
    pub fn new(mut sections: Vec<Section>) -> Self {
        for section in sections.iter_mut() {
            section.tasks.sort_by_key(|task| task.order);
            section.renumber();
        }
        Board {
            sections,
            ..Board::default()
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    /// Return the task with the given id from any section.
    ///
    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.sections
            .iter()
            .flat_map(|section| section.tasks.iter())
            .find(|task| task.id == task_id)
    }

    /// Return the floating copy of the dragged task.
    ///
    pub fn active_task(&self) -> Option<&Task> {
        self.active_task.as_ref()
    }

    /// Return a counter bumped by every layout change.
    ///
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pending_len(&self) -> usize {
        self.log.pending_len()
    }

    /// Return true while the mutation awaits confirmation.
    ///
    pub fn is_pending(&self, id: MutationId) -> bool {
        self.log.is_pending(id)
    }

    pub fn begin_drag(&mut self, task_id: &str) {
        self.active_task = self.find_task(task_id).cloned();
    }

    pub fn cancel_drag(&mut self) {
        self.active_task = None;
    }

    /// Drop the dragged task on a target.
    ///
    /// Returns the recorded mutation together with the full ordering to
    /// confirm, or `None` when the drop left the layout unchanged.
    ///
    pub fn end_drag(
        &mut self,
        active_id: &str,
        active_data: Option<&DragData>,
        over: Option<&drag::DropTarget>,
    ) -> Option<(MutationId, ReorderPayload)> {
        self.active_task = None;
        let over = over?;
        if over.id == active_id {
            return None;
        }
        let source_id = active_data?.section_id();
        let target_id = over.data.as_ref()?.section_id();
        let source = self.section(source_id)?;
        let target = self.section(target_id)?;
        let source_index = source.position(active_id)?;

        let target_index = match over.data {
            Some(DragData::Task { .. }) => target.position(&over.id).unwrap_or(target.tasks.len()),
            _ => target.tasks.len(),
        };
        if source.id == target.id && source_index == target_index.min(source.tasks.len() - 1) {
            return None;
        }

        let operation = Operation::Move {
            task_id: active_id.to_owned(),
            from: Slot::new(&source.id, source_index),
            to: Slot::new(&target.id, target_index),
        };
        match self.commit(operation) {
            Ok(id) => Some((id, self.reorder_payload())),
            Err(e) => {
                warn!("Drop of {} discarded: {}", active_id, e);
                None
            }
        }
    }

    /// Prepend a new task to the section named by `input.status`, or the
    /// first section if it names none.
    ///
    pub fn create_task(&mut self, input: CreateTaskInput) -> Result<(MutationId, Task), BoardError> {
        let first = self.sections.first().ok_or(BoardError::NoSections)?;
        let section_id = self
            .section(&input.status)
            .unwrap_or(first)
            .id
            .clone();
        let assignees = if input.assignees.is_empty() {
            vec![DEFAULT_ASSIGNEE.to_owned()]
        } else {
            input.assignees
        };
        let task = Task {
            id: self.generate_id(),
            title: input.title,
            description: input.description.unwrap_or_default(),
            priority: input.priority,
            assignees,
            status: section_id.clone(),
            order: 0,
        };
        let id = self.commit(Operation::Insert {
            task: task.clone(),
            at: Slot::new(&section_id, 0),
        })?;
        Ok((id, task))
    }

    /// Mark a mutation as persisted.
    ///
    pub fn confirm(&mut self, id: MutationId) -> Option<Operation> {
        self.log.confirm(id)
    }

    /// Undo a rejected mutation, keeping newer pending ones in effect.
    ///
    pub fn rollback(&mut self, id: MutationId) -> Result<Operation, BoardError> {
        let operation = self.log.rollback(id, &mut self.sections)?;
        self.revision += 1;
        if let Err(e) = self.check_invariants() {
            error!("Board invalid after rollback of {}: {}", id, e);
        }
        Ok(operation)
    }

    /// Return, per section, the ordered task ids with their positions.
    ///
    pub fn reorder_payload(&self) -> ReorderPayload {
        self.sections
            .iter()
            .map(|section| SectionOrder {
                status_id: section.id.clone(),
                tasks: section
                    .tasks
                    .iter()
                    .enumerate()
                    .map(|(order, task)| TaskOrder {
                        id: task.id.clone(),
                        order,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Verify that orders are contiguous, statuses match their sections and
    /// task ids are unique.
    ///
    pub fn check_invariants(&self) -> Result<(), BoardError> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            for (index, task) in section.tasks.iter().enumerate() {
                if task.order != index {
                    return Err(BoardError::InvariantViolated {
                        section_id: section.id.clone(),
                        message: format!("task {} has order {} at {}", task.id, task.order, index),
                    });
                }
                if task.status != section.id {
                    return Err(BoardError::InvariantViolated {
                        section_id: section.id.clone(),
                        message: format!("task {} has status {}", task.id, task.status),
                    });
                }
                if !seen.insert(task.id.as_str()) {
                    return Err(BoardError::InvariantViolated {
                        section_id: section.id.clone(),
                        message: format!("duplicate task {}", task.id),
                    });
                }
            }
        }
        Ok(())
    }

    fn commit(&mut self, operation: Operation) -> Result<MutationId, BoardError> {
        let applied = operation.apply(&mut self.sections)?;
        debug!("Applied {:?}", applied);
        let id = self.log.record(applied);
        self.revision += 1;
        if let Err(e) = self.check_invariants() {
            error!("Board invalid after mutation {}: {}", id, e);
        }
        Ok(id)
    }

    fn generate_id(&self) -> String {
        timestamp_id("task", |candidate| self.find_task(candidate).is_some())
    }
}
