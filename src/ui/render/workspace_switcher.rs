use super::{centered_rect, Frame};
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

/// Render the workspace picker.
///
pub fn workspace_switcher(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let popup = centered_rect(40, 40, size);
    frame.render_widget(Clear, popup);

    let active_id = state.get_active_workspace().map(|workspace| workspace.id.as_str());
    let items: Vec<ListItem> = state
        .get_workspaces()
        .iter()
        .map(|workspace| {
            let marker = if Some(workspace.id.as_str()) == active_id { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, styling::active_list_item_style(theme)),
                Span::styled(workspace.name.clone(), styling::normal_text_style(theme)),
                Span::styled(
                    format!("  {}", workspace.slug),
                    styling::muted_text_style(theme),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Workspaces", styling::active_block_title_style()))
                .border_style(styling::active_block_border_style(theme)),
        )
        .highlight_style(styling::active_list_item_style(theme).bg(theme.highlight_bg.to_color()));
    let mut list_state = ListState::default();
    if !state.get_workspaces().is_empty() {
        list_state.select(Some(state.get_switcher_index()));
    }
    frame.render_stateful_widget(list, popup, &mut list_state);
}
