//! Task board-specific error types.

/// Errors that can occur during board mutations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// No section exists to place a task in
    #[error("No task sections available")]
    NoSections,

    /// Section not found on the board
    #[error("Section not found: {id}")]
    SectionNotFound { id: String },

    /// Task not found in the expected section
    #[error("Task {task_id} not found in section {section_id}")]
    TaskNotFound { task_id: String, section_id: String },

    /// Mutation id is not pending
    #[error("Unknown mutation: {0}")]
    UnknownMutation(u64),

    /// Board layout broke an ordering invariant
    #[error("Invariant violated in section {section_id}: {message}")]
    InvariantViolated { section_id: String, message: String },

    /// Simulated confirmation was rejected
    #[error("Persistence rejected: {0}")]
    PersistenceRejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        assert!(BoardError::NoSections
            .to_string()
            .contains("No task sections"));

        let error = BoardError::TaskNotFound {
            task_id: "task_1".to_string(),
            section_id: "todo".to_string(),
        };
        assert!(error.to_string().contains("task_1"));
        assert!(error.to_string().contains("todo"));

        let error = BoardError::UnknownMutation(7);
        assert!(error.to_string().contains('7'));
    }
}
