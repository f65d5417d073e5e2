mod all;
mod board;
mod create_task;
mod footer;
mod log;
mod new_folder;
mod new_project;
mod notice;
mod sidebar;
mod workspace_switcher;

use self::log::log;
use super::*;
use board::board;
use create_task::create_task;
use footer::footer;
use new_folder::new_folder;
use new_project::new_project;
use notice::notice;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use sidebar::sidebar;
use workspace_switcher::workspace_switcher;

pub use all::all as render;

/// Return a rectangle of the given percentages centered in `r`.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
