use super::{centered_rect, Frame};
use crate::state::{State, TaskField};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the task creation dialog.
///
pub fn create_task(frame: &mut Frame, size: Rect, state: &mut State) {
    let popup = centered_rect(60, 70, size);
    frame.render_widget(Clear, popup);

    let theme = state.get_theme().clone();
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Create Task", styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(&theme));
    let inner = outer.inner(popup);
    frame.render_widget(outer, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(4),    // Description
            Constraint::Length(3), // Priority
            Constraint::Length(3), // Status
            Constraint::Length(3), // Assignees
        ])
        .split(inner);

    let section_title = {
        let form = state.get_task_form();
        state
            .get_sections()
            .get(form.status_index)
            .map(|section| section.title.clone())
            .unwrap_or_default()
    };

    let field_block = |field: TaskField, title: &'static str, current: TaskField| {
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if field == current {
                styling::active_block_border_style(&theme)
            } else {
                styling::normal_block_border_style(&theme)
            })
    };

    let form = state.get_task_form_mut();
    let current = form.field;

    let title = Paragraph::new(form.title.clone())
        .style(styling::normal_text_style(&theme))
        .block(field_block(TaskField::Title, "Title", current));
    frame.render_widget(title, chunks[0]);

    form.description
        .set_block(field_block(TaskField::Description, "Description", current));
    frame.render_widget(form.description.widget(), chunks[1]);

    let priority = Paragraph::new(select_line(
        form.priority.label(),
        Style::default().fg(theme.priority_color(form.priority)),
        current == TaskField::Priority,
    ))
    .block(field_block(TaskField::Priority, "Priority", current));
    frame.render_widget(priority, chunks[2]);

    let status = Paragraph::new(select_line(
        &section_title,
        styling::normal_text_style(&theme),
        current == TaskField::Status,
    ))
    .block(field_block(TaskField::Status, "Status", current));
    frame.render_widget(status, chunks[3]);

    let assignees = Paragraph::new(form.assignees.clone())
        .style(styling::normal_text_style(&theme))
        .block(field_block(
            TaskField::Assignees,
            "Assignees (comma separated)",
            current,
        ));
    frame.render_widget(assignees, chunks[4]);
}

fn select_line(value: &str, style: Style, active: bool) -> Line<'static> {
    if active {
        Line::from(vec![
            Span::raw("◀ "),
            Span::styled(value.to_string(), style),
            Span::raw(" ▶"),
        ])
    } else {
        Line::from(Span::styled(value.to_string(), style))
    }
}
