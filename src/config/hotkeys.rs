//! Hotkey configuration management.
//!
//! This module defines the hotkey system for the application, including action types,
//! hotkey bindings, and default configurations per input scope.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Global actions
    Quit,
    SwitchFocus,
    CreateTask,
    NewFolder,
    CreateProject,
    SwitchWorkspace,
    EnterDebug,

    // Sidebar actions
    TreeNext,
    TreePrev,
    TreeExpandOrEnter,
    TreeCollapseOrParent,
    TreeCollapseFolder,
    TreeExpandFolder,
    TreeActivate,

    // Board actions
    NavigateTaskNext,
    NavigateTaskPrev,
    NavigateColumnNext,
    NavigateColumnPrev,
    GrabTask,

    // Drag actions
    DragCursorDown,
    DragCursorUp,
    DragCursorRight,
    DragCursorLeft,
    DropTask,
    CancelDrag,

    // Form and list actions
    NavigateFieldNext,
    NavigateFieldPrev,
    SubmitForm,
    ListNext,
    ListPrev,
    Select,
    Cancel,

    // Debug mode actions
    DebugModeNavigateNext,
    DebugModeNavigatePrev,
    DebugModeCopyLog,
    DebugModeExit,
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    pub fn plain(code: KeyCode) -> Self {
        Hotkey {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    pub fn ctrl(c: char) -> Self {
        Hotkey {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

/// Custom serialization for Hotkey.
///
impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{Error, SerializeStruct};
        let code = KeyCodeSerde::try_from(self.code)
            .map_err(|_| S::Error::custom(format!("Unsupported key code {:?}", self.code)))?;
        let mut state = serializer.serialize_struct("Hotkey", 3)?;
        state.serialize_field("code", &code)?;
        if let KeyCode::Char(c) = self.code {
            state.serialize_field("char", &c)?;
        }
        state.serialize_field("modifiers", &KeyModifiersSerde::from(self.modifiers))?;
        state.end()
    }
}

/// Custom deserialization for Hotkey.
///
impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct HotkeyHelper {
            code: KeyCodeSerde,
            #[serde(default)]
            char: Option<char>,
            #[serde(default)]
            modifiers: KeyModifiersSerde,
        }

        let helper = HotkeyHelper::deserialize(deserializer)?;
        let code = match helper.code {
            KeyCodeSerde::Char => match helper.char {
                Some(c) => KeyCode::Char(c),
                None => {
                    return Err(serde::de::Error::custom(
                        "Char key code requires 'char' field",
                    ))
                }
            },
            KeyCodeSerde::Esc => KeyCode::Esc,
            KeyCodeSerde::Enter => KeyCode::Enter,
            KeyCodeSerde::Backspace => KeyCode::Backspace,
            KeyCodeSerde::Tab => KeyCode::Tab,
            KeyCodeSerde::BackTab => KeyCode::BackTab,
            KeyCodeSerde::Up => KeyCode::Up,
            KeyCodeSerde::Down => KeyCode::Down,
            KeyCodeSerde::Left => KeyCode::Left,
            KeyCodeSerde::Right => KeyCode::Right,
        };
        Ok(Hotkey {
            code,
            modifiers: helper.modifiers.into(),
        })
    }
}

/// Helper enum for serializing KeyCode.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
enum KeyCodeSerde {
    Char,
    Esc,
    Enter,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
}

impl TryFrom<KeyCode> for KeyCodeSerde {
    type Error = ();

    fn try_from(code: KeyCode) -> Result<Self, Self::Error> {
        Ok(match code {
            KeyCode::Char(_) => KeyCodeSerde::Char,
            KeyCode::Esc => KeyCodeSerde::Esc,
            KeyCode::Enter => KeyCodeSerde::Enter,
            KeyCode::Backspace => KeyCodeSerde::Backspace,
            KeyCode::Tab => KeyCodeSerde::Tab,
            KeyCode::BackTab => KeyCodeSerde::BackTab,
            KeyCode::Up => KeyCodeSerde::Up,
            KeyCode::Down => KeyCodeSerde::Down,
            KeyCode::Left => KeyCodeSerde::Left,
            KeyCode::Right => KeyCodeSerde::Right,
            _ => return Err(()),
        })
    }
}

/// Helper struct for serializing KeyModifiers.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KeyModifiersSerde {
    #[serde(default)]
    control: bool,
    #[serde(default)]
    shift: bool,
    #[serde(default)]
    alt: bool,
}

impl From<KeyModifiers> for KeyModifiersSerde {
    fn from(modifiers: KeyModifiers) -> Self {
        KeyModifiersSerde {
            control: modifiers.contains(KeyModifiers::CONTROL),
            shift: modifiers.contains(KeyModifiers::SHIFT),
            alt: modifiers.contains(KeyModifiers::ALT),
        }
    }
}

impl From<KeyModifiersSerde> for KeyModifiers {
    fn from(serde: KeyModifiersSerde) -> Self {
        let mut result = KeyModifiers::empty();
        if serde.control {
            result |= KeyModifiers::CONTROL;
        }
        if serde.shift {
            result |= KeyModifiers::SHIFT;
        }
        if serde.alt {
            result |= KeyModifiers::ALT;
        }
        result
    }
}

/// Input scopes that have their own hotkey configurations.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyScope {
    Global,
    Sidebar,
    Board,
    Drag,
    CreateTask,
    NewFolder,
    NewProject,
    WorkspaceSwitcher,
    Debug,
}

/// Maps hotkey actions to their key bindings for each scope.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewHotkeys {
    pub global: HashMap<HotkeyAction, Hotkey>,
    pub sidebar: HashMap<HotkeyAction, Hotkey>,
    pub board: HashMap<HotkeyAction, Hotkey>,
    pub drag: HashMap<HotkeyAction, Hotkey>,
    pub create_task: HashMap<HotkeyAction, Hotkey>,
    pub new_folder: HashMap<HotkeyAction, Hotkey>,
    pub new_project: HashMap<HotkeyAction, Hotkey>,
    pub workspace_switcher: HashMap<HotkeyAction, Hotkey>,
    pub debug_mode: HashMap<HotkeyAction, Hotkey>,
}

impl Default for ViewHotkeys {
    fn default() -> Self {
        default_hotkeys()
    }
}

impl ViewHotkeys {
    /// Return the bindings of a scope.
    ///
    pub fn scope(&self, scope: HotkeyScope) -> &HashMap<HotkeyAction, Hotkey> {
        match scope {
            HotkeyScope::Global => &self.global,
            HotkeyScope::Sidebar => &self.sidebar,
            HotkeyScope::Board => &self.board,
            HotkeyScope::Drag => &self.drag,
            HotkeyScope::CreateTask => &self.create_task,
            HotkeyScope::NewFolder => &self.new_folder,
            HotkeyScope::NewProject => &self.new_project,
            HotkeyScope::WorkspaceSwitcher => &self.workspace_switcher,
            HotkeyScope::Debug => &self.debug_mode,
        }
    }
}

fn bindings(entries: &[(HotkeyAction, Hotkey)]) -> HashMap<HotkeyAction, Hotkey> {
    entries.iter().cloned().collect()
}

/// Returns default hotkey mappings for all scopes.
///
pub fn default_hotkeys() -> ViewHotkeys {
    use HotkeyAction::*;

    let global = bindings(&[
        (Quit, Hotkey::plain(KeyCode::Char('q'))),
        (SwitchFocus, Hotkey::plain(KeyCode::Tab)),
        (CreateTask, Hotkey::plain(KeyCode::Char('t'))),
        (NewFolder, Hotkey::plain(KeyCode::Char('f'))),
        (CreateProject, Hotkey::plain(KeyCode::Char('p'))),
        (SwitchWorkspace, Hotkey::plain(KeyCode::Char('w'))),
        (EnterDebug, Hotkey::plain(KeyCode::Char('d'))),
    ]);

    let sidebar = bindings(&[
        (TreeNext, Hotkey::plain(KeyCode::Down)),
        (TreePrev, Hotkey::plain(KeyCode::Up)),
        (TreeExpandOrEnter, Hotkey::plain(KeyCode::Right)),
        (TreeCollapseOrParent, Hotkey::plain(KeyCode::Left)),
        (TreeCollapseFolder, Hotkey::plain(KeyCode::Char('['))),
        (TreeExpandFolder, Hotkey::plain(KeyCode::Char(']'))),
        (TreeActivate, Hotkey::plain(KeyCode::Enter)),
    ]);

    let board = bindings(&[
        (NavigateTaskNext, Hotkey::plain(KeyCode::Down)),
        (NavigateTaskPrev, Hotkey::plain(KeyCode::Up)),
        (NavigateColumnNext, Hotkey::plain(KeyCode::Right)),
        (NavigateColumnPrev, Hotkey::plain(KeyCode::Left)),
        (GrabTask, Hotkey::plain(KeyCode::Char(' '))),
    ]);

    let drag = bindings(&[
        (DragCursorDown, Hotkey::plain(KeyCode::Down)),
        (DragCursorUp, Hotkey::plain(KeyCode::Up)),
        (DragCursorRight, Hotkey::plain(KeyCode::Right)),
        (DragCursorLeft, Hotkey::plain(KeyCode::Left)),
        (DropTask, Hotkey::plain(KeyCode::Char(' '))),
        (CancelDrag, Hotkey::plain(KeyCode::Esc)),
    ]);

    let create_task = bindings(&[
        (NavigateFieldNext, Hotkey::plain(KeyCode::Tab)),
        (NavigateFieldPrev, Hotkey::plain(KeyCode::BackTab)),
        (SubmitForm, Hotkey::ctrl('s')),
        (Cancel, Hotkey::plain(KeyCode::Esc)),
    ]);

    let new_folder = bindings(&[
        (SubmitForm, Hotkey::plain(KeyCode::Enter)),
        (Cancel, Hotkey::plain(KeyCode::Esc)),
    ]);

    let new_project = bindings(&[
        (NavigateFieldNext, Hotkey::plain(KeyCode::Tab)),
        (NavigateFieldPrev, Hotkey::plain(KeyCode::BackTab)),
        (SubmitForm, Hotkey::plain(KeyCode::Enter)),
        (Cancel, Hotkey::plain(KeyCode::Esc)),
    ]);

    let workspace_switcher = bindings(&[
        (ListNext, Hotkey::plain(KeyCode::Down)),
        (ListPrev, Hotkey::plain(KeyCode::Up)),
        (Select, Hotkey::plain(KeyCode::Enter)),
        (Cancel, Hotkey::plain(KeyCode::Esc)),
    ]);

    let debug_mode = bindings(&[
        (DebugModeNavigateNext, Hotkey::plain(KeyCode::Down)),
        (DebugModeNavigatePrev, Hotkey::plain(KeyCode::Up)),
        (DebugModeCopyLog, Hotkey::plain(KeyCode::Char('y'))),
        (DebugModeExit, Hotkey::plain(KeyCode::Esc)),
    ]);

    ViewHotkeys {
        global,
        sidebar,
        board,
        drag,
        create_task,
        new_folder,
        new_project,
        workspace_switcher,
        debug_mode,
    }
}

/// Checks if a KeyEvent matches a Hotkey.
///
/// Shift is ignored for character keys, whose case already carries it.
///
pub fn matches_hotkey(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    if event.code != hotkey.code {
        return false;
    }
    match event.code {
        KeyCode::Char(_) | KeyCode::BackTab => {
            event.modifiers.difference(KeyModifiers::SHIFT)
                == hotkey.modifiers.difference(KeyModifiers::SHIFT)
        }
        _ => event.modifiers == hotkey.modifiers,
    }
}

/// Gets the action for a KeyEvent in a specific scope.
///
pub fn get_action(event: &KeyEvent, scope: HotkeyScope, hotkeys: &ViewHotkeys) -> Option<HotkeyAction> {
    hotkeys
        .scope(scope)
        .iter()
        .find(|(_, hotkey)| matches_hotkey(event, hotkey))
        .map(|(action, _)| *action)
}

/// Builds a footer text string from hotkey configurations.
/// Takes a list of tuples: (action, description, optional_second_action_for_paired_keys)
///
pub fn build_footer_text(
    hotkeys: &HashMap<HotkeyAction, Hotkey>,
    actions: &[(HotkeyAction, &str, Option<HotkeyAction>)],
) -> String {
    let parts: Vec<String> = actions
        .iter()
        .filter_map(|(action, description, paired_action)| {
            let hotkey = hotkeys.get(action)?;
            let keys = match paired_action.and_then(|paired| hotkeys.get(&paired)) {
                Some(paired_hotkey) => format!(
                    "{}/{}",
                    format_hotkey_display(hotkey),
                    format_hotkey_display(paired_hotkey)
                ),
                None => format_hotkey_display(hotkey),
            };
            Some(format!(" {}: {}", keys, description))
        })
        .collect();
    parts.join(",")
}

/// Formats a hotkey for display in the footer.
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if hotkey.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if hotkey.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    let key_str = match &hotkey.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        _ => "Unknown".to_string(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_matches_hotkey() {
        let hotkey = Hotkey::plain(KeyCode::Char('['));
        assert!(matches_hotkey(&event(KeyCode::Char('['), KeyModifiers::empty()), &hotkey));
        assert!(!matches_hotkey(&event(KeyCode::Char(']'), KeyModifiers::empty()), &hotkey));

        let shifted = Hotkey::plain(KeyCode::BackTab);
        assert!(matches_hotkey(&event(KeyCode::BackTab, KeyModifiers::SHIFT), &shifted));

        let save = Hotkey::ctrl('s');
        assert!(!matches_hotkey(&event(KeyCode::Char('s'), KeyModifiers::empty()), &save));
        assert!(matches_hotkey(&event(KeyCode::Char('s'), KeyModifiers::CONTROL), &save));
    }

    #[test]
    fn test_get_action_per_scope() {
        let hotkeys = default_hotkeys();
        let down = event(KeyCode::Down, KeyModifiers::empty());
        assert_eq!(
            get_action(&down, HotkeyScope::Sidebar, &hotkeys),
            Some(HotkeyAction::TreeNext)
        );
        assert_eq!(
            get_action(&down, HotkeyScope::Board, &hotkeys),
            Some(HotkeyAction::NavigateTaskNext)
        );
        assert_eq!(
            get_action(&down, HotkeyScope::Drag, &hotkeys),
            Some(HotkeyAction::DragCursorDown)
        );
        assert_eq!(get_action(&down, HotkeyScope::Global, &hotkeys), None);

        let enter = event(KeyCode::Enter, KeyModifiers::empty());
        assert_eq!(
            get_action(&enter, HotkeyScope::NewProject, &hotkeys),
            Some(HotkeyAction::SubmitForm)
        );
        assert_eq!(
            get_action(&event(KeyCode::Char('p'), KeyModifiers::empty()), HotkeyScope::Global, &hotkeys),
            Some(HotkeyAction::CreateProject)
        );
    }

    #[test]
    fn test_hotkey_serialization() {
        let hotkey = Hotkey::ctrl('s');
        let serialized = serde_yaml::to_string(&hotkey).unwrap();
        assert!(serialized.contains("Char"));
        let deserialized: Hotkey = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(hotkey, deserialized);

        let tab: Hotkey = serde_yaml::from_str("code: BackTab").unwrap();
        assert_eq!(tab, Hotkey::plain(KeyCode::BackTab));
        assert!(serde_yaml::from_str::<Hotkey>("code: Char").is_err());
        assert!(serde_yaml::to_string(&Hotkey::plain(KeyCode::F(5))).is_err());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let hotkeys: ViewHotkeys = serde_yaml::from_str(
            "global:\n  quit:\n    code: Char\n    char: x\n",
        )
        .unwrap();
        assert_eq!(hotkeys.global.len(), 1);
        assert_eq!(hotkeys.sidebar, default_hotkeys().sidebar);
    }

    #[test]
    fn test_footer_text() {
        let hotkeys = default_hotkeys();
        let text = build_footer_text(
            &hotkeys.drag,
            &[
                (HotkeyAction::DragCursorUp, "move", Some(HotkeyAction::DragCursorDown)),
                (HotkeyAction::DropTask, "drop", None),
                (HotkeyAction::Quit, "missing", None),
            ],
        );
        assert_eq!(text, " ↑/↓: move, Space: drop");
    }
}
