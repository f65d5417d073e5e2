use super::{
    board, create_task, footer, log, new_folder, new_project, notice, sidebar, workspace_switcher,
    Frame,
};
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout};

const SIDEBAR_WIDTH: u16 = 32;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let log_height = if state.is_debug_mode() { 10 } else { 5 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(log_height),
            Constraint::Length(1),
        ])
        .split(size);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[0]);

    sidebar(frame, columns[0], state);
    board(frame, columns[1], state);
    log(frame, rows[1], state);
    footer(frame, rows[2], state);

    match state.current_view() {
        View::Board => (),
        View::CreateTask => create_task(frame, size, state),
        View::NewFolder => new_folder(frame, size, state),
        View::NewProject => new_project(frame, size, state),
        View::WorkspaceSwitcher => workspace_switcher(frame, size, state),
    }
    notice(frame, size, state);
}
