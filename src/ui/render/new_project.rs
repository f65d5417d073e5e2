use super::{centered_rect, Frame};
use crate::state::{ProjectField, State, DESCRIPTION_LIMIT};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the project creation dialog.
///
pub fn new_project(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let popup = centered_rect(50, 50, size);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("New Project", styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let form = state.get_project_form();
    let field_block = |field: ProjectField, title: String| {
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if field == form.field {
                styling::active_block_border_style(theme)
            } else {
                styling::normal_block_border_style(theme)
            })
    };

    let name = Paragraph::new(form.name.clone())
        .style(styling::normal_text_style(theme))
        .block(field_block(ProjectField::Name, "Name".to_string()));
    frame.render_widget(name, chunks[0]);

    let folder_name = state
        .get_project_folders()
        .get(form.folder_index)
        .map(|folder| folder.name.clone())
        .unwrap_or_else(|| "No folders yet".to_string());
    let folder_line = if form.field == ProjectField::Folder {
        Line::from(vec![
            Span::raw("◀ "),
            Span::styled(folder_name, styling::normal_text_style(theme)),
            Span::raw(" ▶"),
        ])
    } else {
        Line::from(Span::styled(folder_name, styling::normal_text_style(theme)))
    };
    let folder = Paragraph::new(folder_line)
        .block(field_block(ProjectField::Folder, "Folder".to_string()));
    frame.render_widget(folder, chunks[1]);

    let description = Paragraph::new(form.description.clone())
        .style(styling::normal_text_style(theme))
        .wrap(Wrap { trim: false })
        .block(field_block(
            ProjectField::Description,
            format!(
                "Description ({}/{})",
                form.description.chars().count(),
                DESCRIPTION_LIMIT
            ),
        ));
    frame.render_widget(description, chunks[2]);

    if state.is_project_pending() {
        let pending = Paragraph::new(format!(
            "{} Creating project...",
            spinner::frame(state.get_spinner_index())
        ))
        .style(styling::muted_text_style(theme));
        frame.render_widget(pending, chunks[3]);
    }
}
