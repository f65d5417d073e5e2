use super::Frame;
use crate::state::{NoticeKind, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const NOTICE_WIDTH: u16 = 40;
const NOTICE_HEIGHT: u16 = 4;

/// Render the current notice in the top right corner.
///
pub fn notice(frame: &mut Frame, size: Rect, state: &State) {
    let notice = match state.get_notice() {
        Some(notice) => notice,
        None => return,
    };
    let theme = state.get_theme();
    let width = NOTICE_WIDTH.min(size.width);
    let height = NOTICE_HEIGHT.min(size.height);
    let area = Rect::new(size.x + size.width - width, size.y, width, height);
    let color = match notice.kind {
        NoticeKind::Success => theme.success.to_color(),
        NoticeKind::Error => theme.error.to_color(),
    };

    frame.render_widget(Clear, area);
    let text = vec![
        Line::from(Span::styled(
            notice.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            notice.description.clone(),
            styling::normal_text_style(theme),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, area);
}
