use super::Frame;
use crate::config::hotkeys::{build_footer_text, HotkeyAction};
use crate::state::{Focus, State, View};
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the mode label, its color and the controls text.
///
fn footer_controls(state: &State) -> (&'static str, Color, String) {
    let hotkeys = state.get_hotkeys();
    let theme = state.get_theme();
    if state.is_debug_mode() {
        return (
            "DEBUG:",
            theme.footer_debug.to_color(),
            build_footer_text(
                &hotkeys.debug_mode,
                &[
                    (
                        HotkeyAction::DebugModeNavigateNext,
                        "navigate logs",
                        Some(HotkeyAction::DebugModeNavigatePrev),
                    ),
                    (HotkeyAction::DebugModeCopyLog, "copy log", None),
                    (HotkeyAction::DebugModeExit, "exit debug mode", None),
                ],
            ),
        );
    }
    match state.current_view() {
        View::CreateTask => (
            "FORM:",
            theme.footer_form.to_color(),
            build_footer_text(
                &hotkeys.create_task,
                &[
                    (
                        HotkeyAction::NavigateFieldNext,
                        "navigate fields",
                        Some(HotkeyAction::NavigateFieldPrev),
                    ),
                    (HotkeyAction::SubmitForm, "create", None),
                    (HotkeyAction::Cancel, "cancel", None),
                ],
            ),
        ),
        View::NewFolder => (
            "FORM:",
            theme.footer_form.to_color(),
            build_footer_text(
                &hotkeys.new_folder,
                &[
                    (HotkeyAction::SubmitForm, "create folder", None),
                    (HotkeyAction::Cancel, "cancel", None),
                ],
            ),
        ),
        View::NewProject => (
            "FORM:",
            theme.footer_form.to_color(),
            build_footer_text(
                &hotkeys.new_project,
                &[
                    (
                        HotkeyAction::NavigateFieldNext,
                        "navigate fields",
                        Some(HotkeyAction::NavigateFieldPrev),
                    ),
                    (HotkeyAction::SubmitForm, "create project", None),
                    (HotkeyAction::Cancel, "cancel", None),
                ],
            ),
        ),
        View::WorkspaceSwitcher => (
            "SWITCH:",
            theme.footer_form.to_color(),
            build_footer_text(
                &hotkeys.workspace_switcher,
                &[
                    (HotkeyAction::ListNext, "navigate", Some(HotkeyAction::ListPrev)),
                    (HotkeyAction::Select, "select", None),
                    (HotkeyAction::Cancel, "cancel", None),
                ],
            ),
        ),
        View::Board if state.is_dragging() => {
            let controls = if state.is_pointer_drag() {
                " Release over a column or card to drop".to_string()
            } else {
                build_footer_text(
                    &hotkeys.drag,
                    &[
                        (
                            HotkeyAction::DragCursorUp,
                            "move",
                            Some(HotkeyAction::DragCursorDown),
                        ),
                        (
                            HotkeyAction::DragCursorLeft,
                            "column",
                            Some(HotkeyAction::DragCursorRight),
                        ),
                        (HotkeyAction::DropTask, "drop", None),
                        (HotkeyAction::CancelDrag, "cancel", None),
                    ],
                )
            };
            ("MOVE:", theme.footer_drag.to_color(), controls)
        }
        View::Board => {
            let focus_controls = match state.current_focus() {
                Focus::Sidebar => build_footer_text(
                    &hotkeys.sidebar,
                    &[
                        (HotkeyAction::TreePrev, "navigate", Some(HotkeyAction::TreeNext)),
                        (
                            HotkeyAction::TreeCollapseOrParent,
                            "collapse",
                            Some(HotkeyAction::TreeExpandOrEnter),
                        ),
                        (HotkeyAction::TreeActivate, "select", None),
                    ],
                ),
                Focus::Board => build_footer_text(
                    &hotkeys.board,
                    &[
                        (
                            HotkeyAction::NavigateTaskPrev,
                            "tasks",
                            Some(HotkeyAction::NavigateTaskNext),
                        ),
                        (
                            HotkeyAction::NavigateColumnPrev,
                            "columns",
                            Some(HotkeyAction::NavigateColumnNext),
                        ),
                        (HotkeyAction::GrabTask, "grab", None),
                    ],
                ),
            };
            let global_controls = build_footer_text(
                &hotkeys.global,
                &[
                    (HotkeyAction::SwitchFocus, "focus", None),
                    (HotkeyAction::CreateTask, "new task", None),
                    (HotkeyAction::NewFolder, "new folder", None),
                    (HotkeyAction::CreateProject, "new project", None),
                    (HotkeyAction::SwitchWorkspace, "workspace", None),
                    (HotkeyAction::EnterDebug, "debug", None),
                    (HotkeyAction::Quit, "quit", None),
                ],
            );
            let label = match state.current_focus() {
                Focus::Sidebar => "TREE:",
                Focus::Board => "BOARD:",
            };
            (
                label,
                theme.footer_normal.to_color(),
                format!("{},{}", focus_controls, global_controls),
            )
        }
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme: &Theme = state.get_theme();
    let (label, color, controls_text) = footer_controls(state);
    let controls_content = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.text.to_color())
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(controls_text, Style::default().fg(theme.warning.to_color())),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.secondary.to_color()),
    )]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
