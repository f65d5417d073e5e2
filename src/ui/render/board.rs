use super::Frame;
use crate::board::{
    drag::DropTarget,
    model::{Section, Task},
};
use crate::state::{Focus, State};
use crate::ui::{
    widgets::{spinner, styling},
    Theme,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const CARD_HEIGHT: u16 = 5;

/// Where the dragged card would land, as (column, slot).
///
type DropSlot = Option<(usize, usize)>;

/// Render the task board and record its drop targets.
///
pub fn board(frame: &mut Frame, size: Rect, state: &mut State) {
    let mut hits = Vec::new();
    render_board(frame, size, state, &mut hits);
    let hit_map = state.get_hit_map_mut();
    hit_map.clear();
    for (area, target) in hits {
        hit_map.push(area, target);
    }
}

fn render_board(frame: &mut Frame, size: Rect, state: &State, hits: &mut Vec<(Rect, DropTarget)>) {
    let theme = state.get_theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(size);
    render_header(frame, rows[0], state);

    let sections = state.get_sections();
    if sections.is_empty() {
        let text = Paragraph::new("No sections")
            .style(styling::muted_text_style(theme))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(text, rows[1]);
        return;
    }

    let constraints: Vec<Constraint> = sections
        .iter()
        .map(|_| Constraint::Ratio(1, sections.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(rows[1]);

    let cursor = state.board_cursor();
    let drop_slot: DropSlot = state.get_drag().map(|drag| (drag.column(), drag.slot()));
    let active_id = state.get_board().active_task().map(|task| task.id.as_str());
    let board_focused = state.current_focus() == Focus::Board;

    for (index, section) in sections.iter().enumerate() {
        let selected_row = if board_focused && cursor.0 == index && active_id.is_none() {
            Some(cursor.1)
        } else {
            None
        };
        let column = ColumnView {
            section,
            index,
            selected_row,
            drop_slot,
            active_id,
        };
        column.render(frame, columns[index], theme, hits);
    }
}

fn render_header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let mut spans = vec![Span::styled(
        " Board",
        Style::default()
            .fg(theme.primary.to_color())
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(selected) = state
        .get_sidebar()
        .and_then(|sidebar| sidebar.selected())
        .and_then(|id| state.get_sidebar()?.index().get(id))
    {
        spans.push(Span::styled(
            format!(" / {}", selected.label),
            styling::muted_text_style(theme),
        ));
    }
    let pending = state.get_board().pending_len();
    if pending > 0 {
        spans.push(Span::styled(
            format!(
                "  {} saving {} change{}",
                spinner::frame(state.get_spinner_index()),
                pending,
                if pending == 1 { "" } else { "s" }
            ),
            Style::default().fg(theme.info.to_color()),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), size);
}

struct ColumnView<'a> {
    section: &'a Section,
    index: usize,
    selected_row: Option<usize>,
    drop_slot: DropSlot,
    active_id: Option<&'a str>,
}

impl<'a> ColumnView<'a> {
    fn render(&self, frame: &mut Frame, size: Rect, theme: &Theme, hits: &mut Vec<(Rect, DropTarget)>) {
        let accent = theme.accent_color(self.section.accent);
        let slot = self
            .drop_slot
            .filter(|(column, _)| *column == self.index)
            .map(|(_, slot)| slot);
        let border_style = if slot.is_some() {
            Style::default().fg(theme.drop_indicator.to_color())
        } else if self.selected_row.is_some() {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(vec![
                Span::styled("● ", Style::default().fg(accent)),
                Span::styled(
                    self.section.title.clone(),
                    styling::active_block_title_style().fg(accent),
                ),
                Span::styled(
                    format!(" ({})", self.section.tasks.len()),
                    styling::muted_text_style(theme),
                ),
            ]));
        let inner = block.inner(size);
        frame.render_widget(block, size);
        hits.push((size, DropTarget::container(&self.section.id)));

        let tasks = &self.section.tasks;
        if tasks.is_empty() && slot.is_none() {
            let text = Paragraph::new("Drop tasks here")
                .style(styling::muted_text_style(theme))
                .alignment(Alignment::Center);
            frame.render_widget(text, inner);
            return;
        }

        let capacity = (inner.height / CARD_HEIGHT).max(1) as usize;
        let anchor = slot.or(self.selected_row).unwrap_or(0);
        let offset = (anchor + 1).saturating_sub(capacity);

        let mut y = inner.y;
        for (row, task) in tasks.iter().enumerate().skip(offset) {
            if y + CARD_HEIGHT > inner.y + inner.height {
                break;
            }
            let area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
            let card = Card {
                task,
                selected: self.selected_row == Some(row),
                dragged: self.active_id == Some(task.id.as_str()),
                drop_above: slot == Some(row),
            };
            card.render(frame, area, theme);
            hits.push((area, DropTarget::task(&task.id, &self.section.id)));
            y += CARD_HEIGHT;
        }

        if slot == Some(tasks.len()) && y < inner.y + inner.height {
            let marker = Paragraph::new("── drop at end ──")
                .style(Style::default().fg(theme.drop_indicator.to_color()))
                .alignment(Alignment::Center);
            frame.render_widget(marker, Rect::new(inner.x, y, inner.width, 1));
        }
    }
}

struct Card<'a> {
    task: &'a Task,
    selected: bool,
    dragged: bool,
    drop_above: bool,
}

impl<'a> Card<'a> {
    fn render(&self, frame: &mut Frame, size: Rect, theme: &Theme) {
        let mut block = Block::default().borders(Borders::ALL);
        block = if self.drop_above {
            block
                .border_style(Style::default().fg(theme.drop_indicator.to_color()))
                .title(Span::styled(
                    "▲ drop here",
                    Style::default().fg(theme.drop_indicator.to_color()),
                ))
        } else if self.selected {
            block.border_style(styling::active_block_border_style(theme))
        } else {
            block.border_style(styling::normal_block_border_style(theme))
        };

        let title_style = if self.dragged {
            styling::dragged_card_style(theme)
        } else if self.selected {
            styling::selected_card_style(theme)
        } else {
            styling::current_list_item_style(theme)
        };
        let description = self
            .task
            .description
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        let lines = vec![
            Line::from(Span::styled(self.task.title.clone(), title_style)),
            Line::from(Span::styled(description, styling::muted_text_style(theme))),
            Line::from(vec![
                Span::styled(
                    self.task.priority.label(),
                    Style::default()
                        .fg(theme.priority_color(self.task.priority))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", self.task.assignees.join(" ")),
                    Style::default().fg(theme.secondary.to_color()),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), size);
    }
}
