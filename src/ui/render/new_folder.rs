use super::{centered_rect, Frame};
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the folder creation dialog.
///
pub fn new_folder(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let popup = centered_rect(40, 20, size);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("New Folder", styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let input = Paragraph::new(format!("{}▏", state.get_folder_form().name))
        .style(styling::normal_text_style(theme))
        .block(Block::default().borders(Borders::ALL).title("Name"));
    frame.render_widget(input, chunks[0]);

    if state.is_folder_pending() {
        let pending = Paragraph::new(format!(
            "{} Creating folder...",
            spinner::frame(state.get_spinner_index())
        ))
        .style(styling::muted_text_style(theme));
        frame.render_widget(pending, chunks[1]);
    }
}
