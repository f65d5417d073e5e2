//! Navigation-related state types.
//!
//! This module contains enums related to views and focus.

/// Specifying the different foci of the main screen.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    Sidebar,
    Board,
}

impl Focus {
    /// Return the other focus.
    ///
    pub fn toggled(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Board,
            Focus::Board => Focus::Sidebar,
        }
    }
}

/// Specifying the different views. Every view but `Board` is a dialog drawn
/// over the board.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Board,
    CreateTask,
    NewFolder,
    NewProject,
    WorkspaceSwitcher,
}

/// Kind of a transient notice.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown above the footer.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
    pub(crate) ticks_left: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_toggle() {
        assert_eq!(Focus::Sidebar.toggled(), Focus::Board);
        assert_eq!(Focus::Board.toggled(), Focus::Sidebar);
    }

    #[test]
    fn test_view() {
        assert_eq!(View::Board, View::Board);
        assert_ne!(View::CreateTask, View::NewFolder);
    }
}
