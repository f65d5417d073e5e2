//! Simulated confirmation of board mutations.

use super::{
    error::BoardError,
    model::{ReorderPayload, Task},
};
use crate::api::resource::ProjectNode;
use log::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_REORDER_DELAY_MS: u64 = 160;
const DEFAULT_CREATE_DELAY_MS: u64 = 180;
const DEFAULT_PROJECT_DELAY_MS: u64 = 220;

/// Delays and failure rate of the persistence shim.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    pub reorder_delay_ms: u64,
    pub create_delay_ms: u64,
    pub project_delay_ms: u64,
    pub failure_rate: f64, // Probability in [0, 1] that a confirmation is rejected
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        PersistenceSettings {
            reorder_delay_ms: DEFAULT_REORDER_DELAY_MS,
            create_delay_ms: DEFAULT_CREATE_DELAY_MS,
            project_delay_ms: DEFAULT_PROJECT_DELAY_MS,
            failure_rate: 0.0,
        }
    }
}

/// Stand-in for the task and project mutation endpoints.
///
#[derive(Clone, Debug, Default)]
pub struct PersistenceShim {
    settings: PersistenceSettings,
}

impl PersistenceShim {
    pub fn new(settings: PersistenceSettings) -> Self {
        PersistenceShim { settings }
    }

    /// Resolve a reorder after the configured delay.
    ///
    pub async fn persist_reorder(&self, payload: ReorderPayload) -> Result<ReorderPayload, BoardError> {
        tokio::time::sleep(Duration::from_millis(self.settings.reorder_delay_ms)).await;
        if self.rejects() {
            warn!("Reorder of {} sections rejected", payload.len());
            return Err(BoardError::PersistenceRejected("reorder".to_owned()));
        }
        debug!("Reorder of {} sections persisted", payload.len());
        Ok(payload)
    }

    /// Resolve a task creation after the configured delay.
    ///
    pub async fn persist_create(&self, task: Task) -> Result<Task, BoardError> {
        tokio::time::sleep(Duration::from_millis(self.settings.create_delay_ms)).await;
        if self.rejects() {
            warn!("Creation of {} rejected", task.id);
            return Err(BoardError::PersistenceRejected(format!("create {}", task.id)));
        }
        debug!("Creation of {} persisted", task.id);
        Ok(task)
    }

    /// Resolve a project creation after the configured delay.
    ///
    pub async fn persist_project(&self, project: ProjectNode) -> Result<ProjectNode, BoardError> {
        tokio::time::sleep(Duration::from_millis(self.settings.project_delay_ms)).await;
        if self.rejects() {
            warn!("Project {} rejected", project.id);
            return Err(BoardError::PersistenceRejected(format!("project {}", project.id)));
        }
        debug!("Project {} persisted", project.id);
        Ok(project)
    }

    fn rejects(&self) -> bool {
        let rate = self.settings.failure_rate;
        if !(rate > 0.0) {
            return false;
        }
        rand::thread_rng().gen_bool(rate.min(1.0))
    }
}
