use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let debug_mode = state.is_debug_mode();
    let title = if debug_mode { "Log (debug mode)" } else { "Log" };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if debug_mode {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        });

    let items: Vec<ListItem> = state
        .get_debug_entries()
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![Span::styled(
                entry.clone(),
                styling::normal_text_style(theme),
            )]))
        })
        .collect();

    let mut list = List::new(items).block(block);
    if debug_mode {
        list = list.highlight_style(styling::active_list_item_style(theme));
    }

    // The selected entry keeps the newest line in view outside debug mode
    let mut list_state = ListState::default();
    if !state.get_debug_entries().is_empty() {
        list_state.select(Some(state.get_debug_index()));
    }
    frame.render_stateful_widget(list, size, &mut list_state);
}
