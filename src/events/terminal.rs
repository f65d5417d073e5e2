use crate::config::hotkeys::{get_action, HotkeyAction, HotkeyScope};
use crate::sidebar::TreeKey;
use crate::state::{Focus, ProjectField, State, TaskField, View};
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event {
    Input(KeyEvent),
    Mouse(MouseEvent),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Mouse(mouse)) => {
                            if tx_clone.send(Event::Mouse(mouse)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => (),
                        Err(e) => error!("Failed to read terminal event: {}", e),
                    },
                    Ok(false) => (),
                    Err(e) => error!("Failed to poll terminal events: {}", e),
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        handle_event(self.rx.recv()?, state)
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply a single terminal event to state.
///
pub fn handle_event(event: Event, state: &mut State) -> Result<bool> {
    match event {
        Event::Input(key) => Ok(handle_key(key, state)),
        Event::Mouse(mouse) => {
            handle_mouse(mouse, state);
            Ok(true)
        }
        Event::Tick => {
            state.tick();
            Ok(true)
        }
    }
}

fn handle_mouse(mouse: MouseEvent, state: &mut State) {
    if state.current_view() != View::Board {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.mouse_down(mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.mouse_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.mouse_up(mouse.column, mouse.row);
        }
        _ => (),
    }
}

fn handle_key(key: KeyEvent, state: &mut State) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }
    if state.is_debug_mode() {
        handle_debug_key(key, state);
        return true;
    }
    match state.current_view() {
        View::CreateTask => handle_create_task_key(key, state),
        View::NewFolder => handle_new_folder_key(key, state),
        View::NewProject => handle_new_project_key(key, state),
        View::WorkspaceSwitcher => handle_switcher_key(key, state),
        View::Board => return handle_main_key(key, state),
    }
    true
}

fn handle_main_key(key: KeyEvent, state: &mut State) -> bool {
    if state.is_dragging() {
        if !state.is_pointer_drag() {
            handle_drag_key(key, state);
        }
        return true;
    }
    let global = get_action(&key, HotkeyScope::Global, state.get_hotkeys());
    match global {
        Some(HotkeyAction::Quit) => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        Some(HotkeyAction::SwitchFocus) => {
            state.toggle_focus();
        }
        Some(HotkeyAction::CreateTask) => {
            state.open_create_task();
        }
        Some(HotkeyAction::NewFolder) => {
            state.open_new_folder();
        }
        Some(HotkeyAction::CreateProject) => {
            state.open_new_project();
        }
        Some(HotkeyAction::SwitchWorkspace) => {
            state.open_workspace_switcher();
        }
        Some(HotkeyAction::EnterDebug) => {
            debug!("Entering debug mode...");
            state.enter_debug_mode();
        }
        _ => match state.current_focus() {
            Focus::Sidebar => handle_sidebar_key(key, state),
            Focus::Board => handle_board_key(key, state),
        },
    }
    true
}

fn handle_sidebar_key(key: KeyEvent, state: &mut State) {
    let tree_key = match get_action(&key, HotkeyScope::Sidebar, state.get_hotkeys()) {
        Some(HotkeyAction::TreeNext) => TreeKey::Down,
        Some(HotkeyAction::TreePrev) => TreeKey::Up,
        Some(HotkeyAction::TreeExpandOrEnter) => TreeKey::Right,
        Some(HotkeyAction::TreeCollapseOrParent) => TreeKey::Left,
        Some(HotkeyAction::TreeCollapseFolder) => TreeKey::CollapseFolder,
        Some(HotkeyAction::TreeExpandFolder) => TreeKey::ExpandFolder,
        Some(HotkeyAction::TreeActivate) => {
            state.sidebar_activate();
            return;
        }
        _ => return,
    };
    state.sidebar_key(tree_key);
}

fn handle_board_key(key: KeyEvent, state: &mut State) {
    match get_action(&key, HotkeyScope::Board, state.get_hotkeys()) {
        Some(HotkeyAction::NavigateTaskNext) => {
            state.next_task();
        }
        Some(HotkeyAction::NavigateTaskPrev) => {
            state.previous_task();
        }
        Some(HotkeyAction::NavigateColumnNext) => {
            state.next_column();
        }
        Some(HotkeyAction::NavigateColumnPrev) => {
            state.previous_column();
        }
        Some(HotkeyAction::GrabTask) => {
            state.grab_selected_task();
        }
        _ => (),
    }
}

fn handle_drag_key(key: KeyEvent, state: &mut State) {
    match get_action(&key, HotkeyScope::Drag, state.get_hotkeys()) {
        Some(HotkeyAction::DragCursorDown) => {
            state.drag_cursor_down();
        }
        Some(HotkeyAction::DragCursorUp) => {
            state.drag_cursor_up();
        }
        Some(HotkeyAction::DragCursorRight) => {
            state.drag_cursor_right();
        }
        Some(HotkeyAction::DragCursorLeft) => {
            state.drag_cursor_left();
        }
        Some(HotkeyAction::DropTask) => {
            state.drop_task();
        }
        Some(HotkeyAction::CancelDrag) => {
            state.cancel_drag();
        }
        _ => (),
    }
}

fn handle_create_task_key(key: KeyEvent, state: &mut State) {
    match get_action(&key, HotkeyScope::CreateTask, state.get_hotkeys()) {
        Some(HotkeyAction::NavigateFieldNext) => {
            let form = state.get_task_form_mut();
            form.field = form.field.next();
        }
        Some(HotkeyAction::NavigateFieldPrev) => {
            let form = state.get_task_form_mut();
            form.field = form.field.previous();
        }
        Some(HotkeyAction::SubmitForm) => {
            state.submit_create_task();
        }
        Some(HotkeyAction::Cancel) => {
            state.pop_view();
        }
        _ => {
            let section_count = state.get_sections().len();
            let form = state.get_task_form_mut();
            if form.field.is_select() {
                match key.code {
                    KeyCode::Right | KeyCode::Down => form.cycle(true, section_count),
                    KeyCode::Left | KeyCode::Up => form.cycle(false, section_count),
                    _ => (),
                }
                return;
            }
            match (form.field, key.code) {
                (TaskField::Description, _) => form.input_description(key),
                (_, KeyCode::Char(c)) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    form.input_char(c)
                }
                (_, KeyCode::Backspace) => form.backspace(),
                _ => (),
            }
        }
    }
}

fn handle_new_folder_key(key: KeyEvent, state: &mut State) {
    match get_action(&key, HotkeyScope::NewFolder, state.get_hotkeys()) {
        Some(HotkeyAction::SubmitForm) => {
            state.submit_new_folder();
        }
        Some(HotkeyAction::Cancel) => {
            state.pop_view();
        }
        _ => match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.get_folder_form_mut().input_char(c);
            }
            KeyCode::Backspace => state.get_folder_form_mut().backspace(),
            _ => (),
        },
    }
}

fn handle_new_project_key(key: KeyEvent, state: &mut State) {
    match get_action(&key, HotkeyScope::NewProject, state.get_hotkeys()) {
        Some(HotkeyAction::NavigateFieldNext) => {
            let form = state.get_project_form_mut();
            form.field = form.field.next();
        }
        Some(HotkeyAction::NavigateFieldPrev) => {
            let form = state.get_project_form_mut();
            form.field = form.field.previous();
        }
        Some(HotkeyAction::SubmitForm) => {
            state.submit_new_project();
        }
        Some(HotkeyAction::Cancel) => {
            state.pop_view();
        }
        _ => {
            let folder_count = state.get_project_folders().len();
            let form = state.get_project_form_mut();
            match key.code {
                KeyCode::Right | KeyCode::Down if form.field == ProjectField::Folder => {
                    form.cycle(true, folder_count)
                }
                KeyCode::Left | KeyCode::Up if form.field == ProjectField::Folder => {
                    form.cycle(false, folder_count)
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    form.input_char(c)
                }
                KeyCode::Backspace => form.backspace(),
                _ => (),
            }
        }
    }
}

fn handle_switcher_key(key: KeyEvent, state: &mut State) {
    match get_action(&key, HotkeyScope::WorkspaceSwitcher, state.get_hotkeys()) {
        Some(HotkeyAction::ListNext) => {
            state.next_switcher_index();
        }
        Some(HotkeyAction::ListPrev) => {
            state.previous_switcher_index();
        }
        Some(HotkeyAction::Select) => {
            state.select_switcher_workspace();
        }
        Some(HotkeyAction::Cancel) => {
            state.pop_view();
        }
        _ => (),
    }
}

fn handle_debug_key(key: KeyEvent, state: &mut State) {
    match get_action(&key, HotkeyScope::Debug, state.get_hotkeys()) {
        Some(HotkeyAction::DebugModeNavigateNext) => {
            state.next_debug();
        }
        Some(HotkeyAction::DebugModeNavigatePrev) => {
            state.previous_debug();
        }
        Some(HotkeyAction::DebugModeCopyLog) => {
            if let Some(entry) = state.get_current_debug().cloned() {
                copy_to_clipboard(entry);
            }
        }
        Some(HotkeyAction::DebugModeExit) => {
            debug!("Exiting debug mode...");
            state.exit_debug_mode();
        }
        _ => (),
    }
}

fn copy_to_clipboard(entry: String) {
    let context: Result<ClipboardContext, _> = ClipboardProvider::new();
    match context {
        Ok(mut ctx) => match ctx.set_contents(entry) {
            Ok(_) => info!("Copied log entry to clipboard."),
            Err(e) => error!("Failed to copy log entry: {}", e),
        },
        Err(e) => error!("Failed to access clipboard: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{fixtures::initial_sections, Board};
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn board_state() -> State {
        let mut state = State::default();
        state.set_board(Board::new(initial_sections()));
        state
    }

    #[test]
    fn quit_and_ctrl_c_exit() {
        let mut state = board_state();
        assert!(!handle_event(key(KeyCode::Char('q')), &mut state).unwrap());
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert!(!handle_event(Event::Input(ctrl_c), &mut state).unwrap());
        assert!(handle_event(Event::Tick, &mut state).unwrap());
    }

    #[test]
    fn keyboard_drag_through_events() {
        let mut state = board_state();
        handle_event(key(KeyCode::Char(' ')), &mut state).unwrap();
        assert!(state.is_dragging());
        handle_event(key(KeyCode::Right), &mut state).unwrap();
        handle_event(key(KeyCode::Char(' ')), &mut state).unwrap();
        assert!(!state.is_dragging());
        assert!(state.get_sections()[1]
            .tasks
            .iter()
            .any(|task| task.id == "todo-redesign-homepage"));
    }

    #[test]
    fn escape_cancels_drag_without_change() {
        let mut state = board_state();
        let before = state.get_sections().to_vec();
        handle_event(key(KeyCode::Char(' ')), &mut state).unwrap();
        handle_event(key(KeyCode::Down), &mut state).unwrap();
        handle_event(key(KeyCode::Esc), &mut state).unwrap();
        assert!(!state.is_dragging());
        assert_eq!(state.get_sections(), before.as_slice());
    }

    #[test]
    fn create_task_form_typing() {
        let mut state = board_state();
        handle_event(key(KeyCode::Char('t')), &mut state).unwrap();
        assert_eq!(state.current_view(), View::CreateTask);
        for c in "Fix q".chars() {
            handle_event(key(KeyCode::Char(c)), &mut state).unwrap();
        }
        handle_event(key(KeyCode::Backspace), &mut state).unwrap();
        assert_eq!(state.get_task_form().title, "Fix ");
        handle_event(key(KeyCode::Tab), &mut state).unwrap();
        handle_event(key(KeyCode::Tab), &mut state).unwrap();
        assert_eq!(state.get_task_form().field, TaskField::Priority);
        handle_event(key(KeyCode::Right), &mut state).unwrap();
        assert_ne!(state.get_task_form().priority, Default::default());
        handle_event(key(KeyCode::Esc), &mut state).unwrap();
        assert_eq!(state.current_view(), View::Board);
    }

    #[test]
    fn new_project_form_typing() {
        use crate::api::{FolderNode, WorkspaceSummary, WorkspaceTree};

        let mut state = board_state();
        let workspace = WorkspaceSummary {
            id: "ws-1".to_string(),
            name: "Acme".to_string(),
            slug: "acme".to_string(),
        };
        let folder = |id: &str, name: &str| FolderNode {
            id: id.to_string(),
            workspace_id: "ws-1".to_string(),
            name: name.to_string(),
            order: 1,
            projects: vec![],
        };
        state.set_workspaces(vec![workspace.clone()]);
        state.set_workspace_tree(WorkspaceTree {
            workspace,
            folders: vec![folder("fld-1", "Design"), folder("fld-2", "Ops")],
        });

        handle_event(key(KeyCode::Char('p')), &mut state).unwrap();
        assert_eq!(state.current_view(), View::NewProject);
        for c in "Audit".chars() {
            handle_event(key(KeyCode::Char(c)), &mut state).unwrap();
        }
        handle_event(key(KeyCode::Tab), &mut state).unwrap();
        assert_eq!(state.get_project_form().field, ProjectField::Folder);
        handle_event(key(KeyCode::Right), &mut state).unwrap();
        assert_eq!(state.get_project_form().folder_index, 1);
        assert_eq!(state.get_project_form().name, "Audit");

        handle_event(key(KeyCode::Enter), &mut state).unwrap();
        assert_eq!(state.current_view(), View::Board);
        assert!(state.is_project_pending());
    }

    #[test]
    fn focus_switch_routes_arrows_to_sidebar() {
        let mut state = board_state();
        handle_event(key(KeyCode::Tab), &mut state).unwrap();
        assert_eq!(state.current_focus(), Focus::Sidebar);
        handle_event(key(KeyCode::Down), &mut state).unwrap();
        assert_eq!(state.board_cursor(), (0, 0));
    }

    #[test]
    fn debug_mode_captures_keys() {
        let mut state = board_state();
        state.add_log_entry("one".to_string());
        state.add_log_entry("two".to_string());
        handle_event(key(KeyCode::Char('d')), &mut state).unwrap();
        assert!(state.is_debug_mode());
        assert!(handle_event(key(KeyCode::Char('q')), &mut state).unwrap());
        handle_event(key(KeyCode::Up), &mut state).unwrap();
        assert_eq!(state.get_current_debug().unwrap(), "one");
        handle_event(key(KeyCode::Esc), &mut state).unwrap();
        assert!(!state.is_debug_mode());
    }
}
