use super::Frame;
use crate::sidebar::tree::NodeKind;
use crate::state::{Focus, State};
use crate::ui::{
    theme::node_glyph,
    widgets::{spinner, styling},
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Render the workspace tree.
///
pub fn sidebar(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let focused = state.current_focus() == Focus::Sidebar;
    let title = state
        .get_active_workspace()
        .map(|workspace| workspace.name.clone())
        .unwrap_or_else(|| "Workspaces".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style()))
        .border_style(if focused {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        });

    if state.is_workspaces_loading() || state.is_tree_loading() {
        let text = Paragraph::new(format!(
            "{} Loading workspace...",
            spinner::frame(state.get_spinner_index())
        ))
        .style(styling::muted_text_style(theme))
        .block(block);
        frame.render_widget(text, size);
        return;
    }

    let sidebar = match state.get_sidebar() {
        Some(sidebar) => sidebar,
        None => {
            let text = Paragraph::new("No workspace selected")
                .style(styling::muted_text_style(theme))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(text, size);
            return;
        }
    };

    if sidebar.folders().is_empty() {
        let text = Paragraph::new("No folders yet")
            .style(styling::muted_text_style(theme))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(text, size);
        return;
    }

    let visible = sidebar.visible_ids();
    let focused_id = sidebar.focused();
    let selected_id = sidebar.selected();
    let items: Vec<ListItem> = visible
        .iter()
        .filter_map(|id| sidebar.index().get(id))
        .map(|node| {
            let indent = "  ".repeat(node.depth as usize);
            let glyph = node_glyph(node.kind, sidebar.is_expanded(&node.id));
            let mut style = if Some(node.id.as_str()) == selected_id {
                styling::active_list_item_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            if node.kind == NodeKind::Folder {
                style = style.add_modifier(Modifier::BOLD);
            }
            let glyph_style = Style::default().fg(theme.text_muted.to_color());
            ListItem::new(Line::from(vec![
                Span::raw(indent),
                Span::styled(glyph, glyph_style),
                Span::styled(node.label.clone(), style),
            ]))
        })
        .collect();

    let mut list = List::new(items).block(block);
    if focused {
        list = list.highlight_style(
            Style::default()
                .bg(theme.highlight_bg.to_color())
                .fg(theme.highlight_fg.to_color()),
        );
    }
    let mut list_state = ListState::default();
    list_state.select(focused_id.and_then(|id| visible.iter().position(|visible| visible == id)));
    frame.render_stateful_widget(list, size, &mut list_state);
}
