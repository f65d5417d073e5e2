use crate::api::{FolderNode, ProjectNode, WorkspaceSummary, WorkspaceTree};
use crate::app::{NetworkEventSender, PreferencesSaveSender};
use crate::board::{
    drag::{apply_signal, DragSession, DragSignal, HitMap},
    fixtures::initial_sections,
    model::{Section, Task},
    mutation::MutationId,
    Board,
};
use crate::config::{
    hotkeys::ViewHotkeys,
    preferences::{PreferenceStore, SELECTED_WORKSPACE_KEY},
};
use crate::events::network::Event as NetworkEvent;
use crate::sidebar::{Sidebar, TreeKey};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use crate::utils::ids::timestamp_id;
use log::*;
use ratatui::layout::Rect;

use super::error::StateError;
use super::form::{FolderForm, ProjectForm, TaskForm};
use super::navigation::{Focus, Notice, NoticeKind, View};

/// Number of ticks a notice stays visible.
///
const NOTICE_TICKS: usize = 70;

/// Maximum number of retained log entries.
///
const MAX_LOG_ENTRIES: usize = 1000;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    preferences_save_sender: Option<PreferencesSaveSender>,
    theme: Theme,
    hotkeys: ViewHotkeys,
    default_workspace_id: Option<String>,
    tree_delay_ms: u64,
    terminal_size: Rect,
    spinner_index: usize,
    current_focus: Focus,
    view_stack: Vec<View>,
    workspaces: Vec<WorkspaceSummary>,
    active_workspace_id: Option<String>,
    workspaces_loading: bool,
    tree_loading: bool,
    folder_pending: bool,
    project_pending: bool,
    sidebar: Option<Sidebar>,
    preferences: PreferenceStore,
    board: Board,
    board_column: usize,
    board_row: usize,
    drag: Option<DragSession>,
    pointer_drag: bool,
    hit_map: HitMap,
    task_form: TaskForm,
    folder_form: FolderForm,
    project_form: ProjectForm,
    switcher_index: usize,
    notice: Option<Notice>,
    debug_mode: bool,
    debug_index: usize,
    debug_entries: Vec<String>,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            preferences_save_sender: None,
            theme: Theme::default(),
            hotkeys: ViewHotkeys::default(),
            default_workspace_id: None,
            tree_delay_ms: 0,
            terminal_size: Rect::default(),
            spinner_index: 0,
            current_focus: Focus::Board,
            view_stack: vec![View::Board],
            workspaces: vec![],
            active_workspace_id: None,
            workspaces_loading: false,
            tree_loading: false,
            folder_pending: false,
            project_pending: false,
            sidebar: None,
            preferences: PreferenceStore::default(),
            board: Board::default(),
            board_column: 0,
            board_row: 0,
            drag: None,
            pointer_drag: false,
            hit_map: HitMap::default(),
            task_form: TaskForm::default(),
            folder_form: FolderForm::default(),
            project_form: ProjectForm::default(),
            switcher_index: 0,
            notice: None,
            debug_mode: false,
            debug_index: 0,
            debug_entries: vec![],
        }
    }
}

impl State {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        net_sender: NetworkEventSender,
        preferences_save_sender: PreferencesSaveSender,
        preferences: PreferenceStore,
        theme: Theme,
        hotkeys: ViewHotkeys,
        default_workspace_id: Option<String>,
        tree_delay_ms: u64,
    ) -> Self {
        State {
            net_sender: Some(net_sender),
            preferences_save_sender: Some(preferences_save_sender),
            preferences,
            theme,
            hotkeys,
            default_workspace_id,
            tree_delay_ms,
            board: Board::new(initial_sections()),
            ..State::default()
        }
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_hotkeys(&self) -> &ViewHotkeys {
        &self.hotkeys
    }

    /// Sets the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Advance the spinner and age the current notice.
    ///
    pub fn tick(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        if let Some(notice) = self.notice.as_mut() {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Return the current focus.
    ///
    pub fn current_focus(&self) -> Focus {
        self.current_focus
    }

    pub fn toggle_focus(&mut self) -> &mut Self {
        self.current_focus = self.current_focus.toggled();
        self
    }

    /// Return the view at the top of the stack.
    ///
    pub fn current_view(&self) -> View {
        self.view_stack.last().copied().unwrap_or(View::Board)
    }

    pub fn push_view(&mut self, view: View) -> &mut Self {
        self.view_stack.push(view);
        self
    }

    /// Remove the top view. The board view is never removed.
    ///
    pub fn pop_view(&mut self) -> Option<View> {
        if self.view_stack.len() > 1 {
            self.view_stack.pop()
        } else {
            None
        }
    }

    // Notices

    pub fn get_notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn notify_success(&mut self, title: &str, description: &str) -> &mut Self {
        self.set_notice(NoticeKind::Success, title, description)
    }

    pub fn notify_error(&mut self, title: &str, description: &str) -> &mut Self {
        self.set_notice(NoticeKind::Error, title, description)
    }

    fn set_notice(&mut self, kind: NoticeKind, title: &str, description: &str) -> &mut Self {
        self.notice = Some(Notice {
            kind,
            title: title.to_owned(),
            description: description.to_owned(),
            ticks_left: NOTICE_TICKS,
        });
        self
    }

    // Workspaces

    pub fn get_workspaces(&self) -> &[WorkspaceSummary] {
        &self.workspaces
    }

    /// Returns a reference to the active workspace or None.
    ///
    pub fn get_active_workspace(&self) -> Option<&WorkspaceSummary> {
        let active = self.active_workspace_id.as_deref()?;
        self.workspaces.iter().find(|workspace| workspace.id == active)
    }

    pub fn is_workspaces_loading(&self) -> bool {
        self.workspaces_loading
    }

    pub fn is_tree_loading(&self) -> bool {
        self.tree_loading
    }

    /// Request the workspace list.
    ///
    pub fn load_workspaces(&mut self) -> &mut Self {
        self.workspaces_loading = true;
        self.dispatch(NetworkEvent::Workspaces);
        self
    }

    /// Store the workspace list and activate the stored workspace if it
    /// still exists, else the configured default, else the first one.
    ///
    pub fn set_workspaces(&mut self, workspaces: Vec<WorkspaceSummary>) -> &mut Self {
        self.workspaces = workspaces;
        self.workspaces_loading = false;
        let exists = |id: &String| self.workspaces.iter().any(|workspace| &workspace.id == id);
        let stored = match self.preferences.get_string(SELECTED_WORKSPACE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to read selected workspace: {}", e);
                None
            }
        };
        let chosen = stored
            .filter(|id| exists(id))
            .or_else(|| self.default_workspace_id.clone().filter(|id| exists(id)))
            .or_else(|| self.workspaces.first().map(|workspace| workspace.id.clone()));
        match chosen {
            Some(id) => self.activate_workspace(&id),
            None => {
                warn!("No workspaces available");
                self
            }
        }
    }

    pub fn workspaces_failed(&mut self, message: &str) -> &mut Self {
        self.workspaces_loading = false;
        self.notify_error("Unable to load workspaces", message)
    }

    /// Switch to a workspace: persist the current tree, reset tree state and
    /// request the new tree.
    ///
    pub fn activate_workspace(&mut self, workspace_id: &str) -> &mut Self {
        if let Some(sidebar) = &self.sidebar {
            sidebar.save(&mut self.preferences);
        }
        info!("Activating workspace {}", workspace_id);
        self.active_workspace_id = Some(workspace_id.to_owned());
        self.preferences.set_string(SELECTED_WORKSPACE_KEY, workspace_id);
        self.sidebar = None;
        self.tree_loading = true;
        self.dispatch(NetworkEvent::WorkspaceTree {
            workspace_id: workspace_id.to_owned(),
            delay_ms: self.tree_delay_ms,
        });
        self.request_preferences_save();
        self
    }

    /// Mount the sidebar from a fetched tree. Responses for a workspace that
    /// is no longer active are ignored.
    ///
    pub fn set_workspace_tree(&mut self, tree: WorkspaceTree) -> &mut Self {
        if self.active_workspace_id.as_deref() != Some(tree.workspace.id.as_str()) {
            debug!("Ignoring stale tree for workspace {}", tree.workspace.id);
            return self;
        }
        self.tree_loading = false;
        let sidebar = Sidebar::mount(&tree.workspace.id, tree.folders, &self.preferences);
        self.sidebar = Some(sidebar);
        self.persist_sidebar();
        self
    }

    pub fn workspace_tree_failed(&mut self, workspace_id: &str, message: &str) -> &mut Self {
        if self.active_workspace_id.as_deref() == Some(workspace_id) {
            self.tree_loading = false;
            self.notify_error("Unable to load workspace", message);
        }
        self
    }

    // Sidebar

    pub fn get_sidebar(&self) -> Option<&Sidebar> {
        self.sidebar.as_ref()
    }

    /// Apply a tree navigation key.
    ///
    pub fn sidebar_key(&mut self, key: TreeKey) -> &mut Self {
        let changed = match self.sidebar.as_mut() {
            Some(sidebar) => sidebar.handle_key(key),
            None => false,
        };
        if changed {
            self.persist_sidebar();
        }
        self
    }

    /// Activate the focused sidebar node.
    ///
    pub fn sidebar_activate(&mut self) -> &mut Self {
        if let Some(sidebar) = self.sidebar.as_mut() {
            sidebar.activate_focused();
            self.persist_sidebar();
        }
        self
    }

    fn persist_sidebar(&mut self) {
        if let Some(sidebar) = &self.sidebar {
            sidebar.save(&mut self.preferences);
            self.request_preferences_save();
        }
    }

    pub fn get_preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Copy the sidebar state into the preference store before saving.
    ///
    pub fn sync_preferences(&mut self) -> &PreferenceStore {
        if let Some(sidebar) = &self.sidebar {
            sidebar.save(&mut self.preferences);
        }
        &self.preferences
    }

    fn request_preferences_save(&self) {
        if let Some(sender) = &self.preferences_save_sender {
            if let Err(e) = sender.send(self.preferences.clone()) {
                error!("Failed to request preferences save: {}", e);
            }
        }
    }

    // Folder dialog

    pub fn open_new_folder(&mut self) -> &mut Self {
        if self.active_workspace_id.is_none() {
            self.notify_error("Unable to create folder", &StateError::WorkspaceNotSet.to_string());
            return self;
        }
        self.folder_form = FolderForm::default();
        self.push_view(View::NewFolder)
    }

    pub fn get_folder_form(&self) -> &FolderForm {
        &self.folder_form
    }

    pub fn get_folder_form_mut(&mut self) -> &mut FolderForm {
        &mut self.folder_form
    }

    pub fn is_folder_pending(&self) -> bool {
        self.folder_pending
    }

    /// Validate the folder name and send it to the API.
    ///
    pub fn submit_new_folder(&mut self) -> &mut Self {
        let workspace_id = match self.active_workspace_id.clone() {
            Some(id) => id,
            None => return self.notify_error("Unable to create folder", &StateError::WorkspaceNotSet.to_string()),
        };
        match self.folder_form.validated_name() {
            Ok(name) => {
                self.folder_pending = true;
                self.dispatch(NetworkEvent::CreateFolder { workspace_id, name });
                self.pop_view();
                self
            }
            Err(e) => self.notify_error("Unable to create folder", &e.to_string()),
        }
    }

    /// Append a created folder to the tree of its workspace.
    ///
    pub fn add_folder(&mut self, folder: FolderNode) -> &mut Self {
        self.folder_pending = false;
        let name = folder.name.clone();
        match self.sidebar.as_mut() {
            Some(sidebar) if sidebar.workspace_id() == folder.workspace_id => {
                sidebar.push_folder(folder);
                self.persist_sidebar();
                self.notify_success("Folder created", &name)
            }
            _ => {
                debug!("Created folder {} belongs to an inactive workspace", folder.id);
                self
            }
        }
    }

    pub fn folder_failed(&mut self, message: &str) -> &mut Self {
        self.folder_pending = false;
        self.notify_error("Unable to create folder", message)
    }

    // Project dialog

    /// Open the new-project dialog targeting the folder of the selected
    /// sidebar node.
    ///
    pub fn open_new_project(&mut self) -> &mut Self {
        let sidebar = match &self.sidebar {
            Some(sidebar) => sidebar,
            None => {
                return self.notify_error(
                    "Could not create project",
                    &StateError::WorkspaceNotSet.to_string(),
                )
            }
        };
        let selected_folder = sidebar
            .selected()
            .and_then(|id| sidebar.index().get(id))
            .map(|node| node.parent_id.clone().unwrap_or_else(|| node.id.clone()));
        let folder_index = selected_folder
            .and_then(|id| sidebar.folders().iter().position(|folder| folder.id == id))
            .unwrap_or(0);
        self.project_form = ProjectForm::for_folder(folder_index);
        self.push_view(View::NewProject)
    }

    pub fn get_project_form(&self) -> &ProjectForm {
        &self.project_form
    }

    pub fn get_project_form_mut(&mut self) -> &mut ProjectForm {
        &mut self.project_form
    }

    pub fn is_project_pending(&self) -> bool {
        self.project_pending
    }

    /// Return the folder names offered by the project dialog.
    ///
    pub fn get_project_folders(&self) -> &[FolderNode] {
        self.sidebar
            .as_ref()
            .map(|sidebar| sidebar.folders())
            .unwrap_or(&[])
    }

    /// Validate the project form and send the new project for confirmation.
    ///
    pub fn submit_new_project(&mut self) -> &mut Self {
        let sidebar = match &self.sidebar {
            Some(sidebar) => sidebar,
            None => {
                return self.notify_error(
                    "Could not create project",
                    &StateError::WorkspaceNotSet.to_string(),
                )
            }
        };
        let draft = match self.project_form.to_draft(sidebar.folders()) {
            Ok(draft) => draft,
            Err(e @ StateError::FolderNotSelected) => {
                return self.notify_error("Select a folder", &e.to_string())
            }
            Err(e) => return self.notify_error("Could not create project", &e.to_string()),
        };
        let project = ProjectNode {
            id: timestamp_id("prj", |candidate| sidebar.index().contains(candidate)),
            order: sidebar.next_project_order(&draft.folder_id).unwrap_or(1),
            folder_id: draft.folder_id,
            name: draft.name,
            description: draft.description,
        };
        let workspace_id = sidebar.workspace_id().to_owned();
        info!("Creating project {} in folder {}", project.id, project.folder_id);
        self.project_pending = true;
        self.dispatch(NetworkEvent::CreateProject {
            workspace_id,
            project,
            folder_name: draft.folder_name,
        });
        self.pop_view();
        self
    }

    /// Append a confirmed project to the tree of its workspace.
    ///
    pub fn add_project(
        &mut self,
        workspace_id: &str,
        project: ProjectNode,
        folder_name: &str,
    ) -> &mut Self {
        self.project_pending = false;
        let name = project.name.clone();
        let added = match self.sidebar.as_mut() {
            Some(sidebar) if sidebar.workspace_id() == workspace_id => sidebar.push_project(project),
            _ => false,
        };
        if !added {
            debug!("Created project {} has no folder in the active tree", name);
            return self;
        }
        self.persist_sidebar();
        self.notify_success(
            "Project created",
            &format!("\"{}\" added under {}.", name, folder_name),
        )
    }

    pub fn project_failed(&mut self, message: &str) -> &mut Self {
        self.project_pending = false;
        self.notify_error("Could not create project", message)
    }

    // Workspace switcher

    pub fn open_workspace_switcher(&mut self) -> &mut Self {
        self.switcher_index = self
            .active_workspace_id
            .as_deref()
            .and_then(|active| self.workspaces.iter().position(|w| w.id == active))
            .unwrap_or(0);
        self.push_view(View::WorkspaceSwitcher)
    }

    pub fn get_switcher_index(&self) -> usize {
        self.switcher_index
    }

    pub fn next_switcher_index(&mut self) -> &mut Self {
        if !self.workspaces.is_empty() {
            self.switcher_index = (self.switcher_index + 1) % self.workspaces.len();
        }
        self
    }

    pub fn previous_switcher_index(&mut self) -> &mut Self {
        let len = self.workspaces.len();
        if len > 0 {
            self.switcher_index = (self.switcher_index + len - 1) % len;
        }
        self
    }

    pub fn select_switcher_workspace(&mut self) -> &mut Self {
        self.pop_view();
        let id = match self.workspaces.get(self.switcher_index) {
            Some(workspace) => workspace.id.clone(),
            None => return self,
        };
        if self.active_workspace_id.as_deref() == Some(id.as_str()) {
            return self;
        }
        self.activate_workspace(&id)
    }

    // Board

    pub fn get_board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) -> &mut Self {
        self.board = board;
        self
    }

    /// Return the (column, row) of the board cursor, clamped to the layout.
    ///
    pub fn board_cursor(&self) -> (usize, usize) {
        let sections = self.board.sections();
        if sections.is_empty() {
            return (0, 0);
        }
        let column = self.board_column.min(sections.len() - 1);
        let row = self
            .board_row
            .min(sections[column].tasks.len().saturating_sub(1));
        (column, row)
    }

    /// Return the task under the board cursor.
    ///
    pub fn selected_task(&self) -> Option<&Task> {
        let (column, row) = self.board_cursor();
        self.board.sections().get(column)?.tasks.get(row)
    }

    pub fn next_task(&mut self) -> &mut Self {
        let (column, row) = self.board_cursor();
        let len = self
            .board
            .sections()
            .get(column)
            .map_or(0, |section| section.tasks.len());
        self.board_column = column;
        self.board_row = if row + 1 < len { row + 1 } else { row };
        self
    }

    pub fn previous_task(&mut self) -> &mut Self {
        let (column, row) = self.board_cursor();
        self.board_column = column;
        self.board_row = row.saturating_sub(1);
        self
    }

    pub fn next_column(&mut self) -> &mut Self {
        let (column, row) = self.board_cursor();
        if column + 1 < self.board.sections().len() {
            self.board_column = column + 1;
        }
        self.board_row = row;
        self
    }

    pub fn previous_column(&mut self) -> &mut Self {
        let (column, row) = self.board_cursor();
        self.board_column = column.saturating_sub(1);
        self.board_row = row;
        self
    }

    fn follow_task(&mut self, task_id: &str) {
        for (column, section) in self.board.sections().iter().enumerate() {
            if let Some(row) = section.position(task_id) {
                self.board_column = column;
                self.board_row = row;
                return;
            }
        }
    }

    // Drag

    pub fn get_drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_pointer_drag(&self) -> bool {
        self.pointer_drag
    }

    pub fn get_hit_map_mut(&mut self) -> &mut HitMap {
        &mut self.hit_map
    }

    /// Pick up the selected task with the keyboard.
    ///
    pub fn grab_selected_task(&mut self) -> &mut Self {
        let task_id = match self.selected_task() {
            Some(task) => task.id.clone(),
            None => return self,
        };
        self.start_drag(&task_id, false)
    }

    fn start_drag(&mut self, task_id: &str, pointer: bool) -> &mut Self {
        if let Some(session) = DragSession::new(&self.board, task_id) {
            apply_signal(&mut self.board, session.start_signal());
            self.drag = Some(session);
            self.pointer_drag = pointer;
        }
        self
    }

    pub fn drag_cursor_up(&mut self) -> &mut Self {
        if let Some(session) = self.drag.as_mut() {
            session.cursor_up(&self.board);
        }
        self
    }

    pub fn drag_cursor_down(&mut self) -> &mut Self {
        if let Some(session) = self.drag.as_mut() {
            session.cursor_down(&self.board);
        }
        self
    }

    pub fn drag_cursor_left(&mut self) -> &mut Self {
        if let Some(session) = self.drag.as_mut() {
            session.cursor_left(&self.board);
        }
        self
    }

    pub fn drag_cursor_right(&mut self) -> &mut Self {
        if let Some(session) = self.drag.as_mut() {
            session.cursor_right(&self.board);
        }
        self
    }

    /// Drop the dragged task on the hovered target and send the new
    /// ordering for confirmation.
    ///
    pub fn drop_task(&mut self) -> &mut Self {
        let session = match self.drag.take() {
            Some(session) => session,
            None => return self,
        };
        self.pointer_drag = false;
        let task_id = session.active_id.clone();
        if let Some((mutation, payload)) = apply_signal(&mut self.board, session.finish()) {
            self.follow_task(&task_id);
            self.dispatch(NetworkEvent::PersistReorder { mutation, payload });
        }
        self
    }

    pub fn cancel_drag(&mut self) -> &mut Self {
        if self.drag.take().is_some() {
            apply_signal(&mut self.board, DragSignal::Cancel);
        }
        self.pointer_drag = false;
        self
    }

    /// Start a pointer drag if a card is under the cursor.
    ///
    pub fn mouse_down(&mut self, column: u16, row: u16) -> &mut Self {
        let card = self.hit_map.card(column, row).map(|target| target.id.clone());
        match card {
            Some(task_id) => {
                self.follow_task(&task_id);
                self.current_focus = Focus::Board;
                self.start_drag(&task_id, true)
            }
            None => self,
        }
    }

    pub fn mouse_drag(&mut self, column: u16, row: u16) -> &mut Self {
        if !self.pointer_drag {
            return self;
        }
        let target = self.hit_map.hit(column, row).cloned();
        if let Some(session) = self.drag.as_mut() {
            session.hover(target);
        }
        self
    }

    /// Finish a pointer drag on the target under the cursor. With no target
    /// the drag is cancelled.
    ///
    pub fn mouse_up(&mut self, column: u16, row: u16) -> &mut Self {
        if !self.pointer_drag {
            return self;
        }
        self.mouse_drag(column, row);
        self.drop_task()
    }

    // Task creation

    /// Open the create-task dialog targeting the column under the cursor.
    ///
    pub fn open_create_task(&mut self) -> &mut Self {
        let (column, _) = self.board_cursor();
        self.task_form = TaskForm::for_section(column);
        self.push_view(View::CreateTask)
    }

    pub fn get_task_form(&self) -> &TaskForm {
        &self.task_form
    }

    pub fn get_task_form_mut(&mut self) -> &mut TaskForm {
        &mut self.task_form
    }

    pub fn get_sections(&self) -> &[Section] {
        self.board.sections()
    }

    /// Validate the form, create the task and send it for confirmation.
    ///
    pub fn submit_create_task(&mut self) -> &mut Self {
        let input = match self.task_form.to_input(self.board.sections()) {
            Ok(input) => input,
            Err(e) => return self.notify_error("Unable to create task", &e.to_string()),
        };
        match self.board.create_task(input) {
            Ok((mutation, task)) => {
                self.pop_view();
                self.follow_task(&task.id);
                self.dispatch(NetworkEvent::PersistCreate { mutation, task });
                self
            }
            Err(e) => self.notify_error("Unable to create task", &e.to_string()),
        }
    }

    // Confirmation

    pub fn confirm_reorder(&mut self, mutation: MutationId) -> &mut Self {
        if self.board.confirm(mutation).is_none() {
            debug!("Reorder {} was no longer pending", mutation);
        }
        self
    }

    pub fn confirm_create(&mut self, mutation: MutationId, task: &Task) -> &mut Self {
        self.board.confirm(mutation);
        let section = self
            .board
            .find_task(&task.id)
            .and_then(|task| self.board.section(&task.status))
            .map(|section| section.title.clone())
            .unwrap_or_default();
        self.notify_success("Task created", &format!("{} added to {}", task.title, section))
    }

    /// Undo a rejected mutation and tell the user.
    ///
    pub fn reject_mutation(&mut self, mutation: MutationId) -> &mut Self {
        if !self.board.is_pending(mutation) {
            debug!("Rejected mutation {} was no longer pending", mutation);
            return self;
        }
        match self.board.rollback(mutation) {
            Ok(operation) => {
                if self.drag.is_some() {
                    self.cancel_drag();
                }
                self.notify_error(operation.failure_title(), "Please try again.")
            }
            Err(e) => {
                error!("Failed to roll back mutation {}: {}", mutation, e);
                self.notify_error("Unable to undo change", &e.to_string())
            }
        }
    }

    // Debug log

    /// Enter debug mode for navigating and copying logs.
    ///
    pub fn enter_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = true;
        self.debug_index = self.debug_entries.len().saturating_sub(1);
        self
    }

    pub fn exit_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = false;
        self
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn get_debug_index(&self) -> usize {
        self.debug_index
    }

    pub fn next_debug(&mut self) -> &mut Self {
        if !self.debug_entries.is_empty() {
            self.debug_index = (self.debug_index + 1) % self.debug_entries.len();
        }
        self
    }

    pub fn previous_debug(&mut self) -> &mut Self {
        let len = self.debug_entries.len();
        if len > 0 {
            self.debug_index = (self.debug_index + len - 1) % len;
        }
        self
    }

    pub fn get_current_debug(&self) -> Option<&String> {
        self.debug_entries.get(self.debug_index)
    }

    /// Add a log entry to the debug buffer.
    ///
    pub fn add_log_entry(&mut self, entry: String) {
        self.debug_entries.push(entry);
        if self.debug_entries.len() > MAX_LOG_ENTRIES {
            self.debug_entries.remove(0);
        }
        if !self.debug_mode {
            self.debug_index = self.debug_entries.len() - 1;
        } else {
            self.debug_index = self.debug_index.min(self.debug_entries.len() - 1);
        }
    }

    pub fn get_debug_entries(&self) -> &[String] {
        &self.debug_entries
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ProjectNode;
    use crate::board::model::Priority;
    use crate::config::preferences::{expanded_folders_key, selected_node_key};
    use fake::{Fake, Faker};
    use std::sync::mpsc;

    fn workspace(id: &str) -> WorkspaceSummary {
        WorkspaceSummary {
            id: id.to_string(),
            name: id.to_uppercase(),
            slug: id.to_string(),
        }
    }

    fn tree(id: &str) -> WorkspaceTree {
        WorkspaceTree {
            workspace: workspace(id),
            folders: vec![FolderNode {
                id: format!("{}-fld", id),
                workspace_id: id.to_string(),
                name: "Design".to_string(),
                order: 1,
                projects: vec![ProjectNode {
                    id: format!("{}-prj", id),
                    folder_id: format!("{}-fld", id),
                    name: "Website".to_string(),
                    order: 1,
                    description: None,
                }],
            }],
        }
    }

    fn connected() -> (State, mpsc::Receiver<NetworkEvent>, mpsc::Receiver<PreferenceStore>) {
        let (net_tx, net_rx) = mpsc::channel();
        let (save_tx, save_rx) = mpsc::channel();
        let state = State::new(
            net_tx,
            save_tx,
            PreferenceStore::default(),
            Theme::default(),
            ViewHotkeys::default(),
            None,
            300,
        );
        (state, net_rx, save_rx)
    }

    #[test]
    fn new_state_starts_with_seeded_board() {
        let (state, _, _) = connected();
        assert_eq!(state.get_sections().len(), 2);
        assert_eq!(state.current_view(), View::Board);
        assert_eq!(state.selected_task().unwrap().id, "todo-redesign-homepage");
    }

    #[test]
    fn tick_expires_notice() {
        let mut state = State::default();
        state.notify_success("Task created", "");
        for _ in 0..NOTICE_TICKS - 1 {
            state.tick();
        }
        assert!(state.get_notice().is_some());
        state.tick();
        assert!(state.get_notice().is_none());
    }

    #[test]
    fn spinner_wraps() {
        let mut state = State::default();
        for _ in 0..SPINNER_FRAME_COUNT {
            state.tick();
        }
        assert_eq!(state.get_spinner_index(), 0);
    }

    #[test]
    fn pop_view_keeps_board() {
        let mut state = State::default();
        assert_eq!(state.pop_view(), None);
        state.push_view(View::NewFolder);
        assert_eq!(state.pop_view(), Some(View::NewFolder));
        assert_eq!(state.current_view(), View::Board);
    }

    #[test]
    fn workspace_selection_prefers_stored_then_default() {
        let (mut state, rx, _) = connected();
        state.default_workspace_id = Some("ws-2".to_string());
        state.set_workspaces(vec![workspace("ws-1"), workspace("ws-2")]);
        assert_eq!(state.get_active_workspace().unwrap().id, "ws-2");
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkEvent::WorkspaceTree { ref workspace_id, delay_ms: 300 }) if workspace_id == "ws-2"
        ));

        let (mut state, _, _) = connected();
        state.preferences.set_string(SELECTED_WORKSPACE_KEY, "ws-1");
        state.default_workspace_id = Some("ws-2".to_string());
        state.set_workspaces(vec![workspace("ws-1"), workspace("ws-2")]);
        assert_eq!(state.get_active_workspace().unwrap().id, "ws-1");

        let (mut state, _, _) = connected();
        state.preferences.set_string(SELECTED_WORKSPACE_KEY, "gone");
        state.set_workspaces(vec![workspace("ws-3")]);
        assert_eq!(state.get_active_workspace().unwrap().id, "ws-3");
    }

    #[test]
    fn stale_tree_is_ignored() {
        let (mut state, _, _) = connected();
        state.set_workspaces(vec![workspace("ws-1"), workspace("ws-2")]);
        state.set_workspace_tree(tree("ws-2"));
        assert!(state.get_sidebar().is_none());
        assert!(state.is_tree_loading());
        state.set_workspace_tree(tree("ws-1"));
        assert_eq!(state.get_sidebar().unwrap().selected(), Some("ws-1-prj"));
        assert!(!state.is_tree_loading());
    }

    #[test]
    fn switching_workspace_saves_tree_state() {
        let (mut state, _, save_rx) = connected();
        state.set_workspaces(vec![workspace("ws-1"), workspace("ws-2")]);
        state.set_workspace_tree(tree("ws-1"));
        state.sidebar_key(TreeKey::CollapseFolder);
        state.activate_workspace("ws-2");

        assert!(state.get_sidebar().is_none());
        assert_eq!(
            state
                .get_preferences()
                .get_string_list(&expanded_folders_key("ws-1"))
                .unwrap(),
            Some(vec![])
        );
        assert_eq!(
            state
                .get_preferences()
                .get_string(&selected_node_key("ws-1"))
                .unwrap()
                .as_deref(),
            Some("ws-1-prj")
        );
        assert_eq!(
            state
                .get_preferences()
                .get_string(SELECTED_WORKSPACE_KEY)
                .unwrap()
                .as_deref(),
            Some("ws-2")
        );
        let snapshot = save_rx.try_iter().last().unwrap();
        assert_eq!(snapshot, *state.get_preferences());
    }

    #[test]
    fn created_folder_is_added_to_tree() {
        let (mut state, rx, _) = connected();
        state.set_workspaces(vec![workspace("ws-1")]);
        state.set_workspace_tree(tree("ws-1"));
        state.open_new_folder();
        "Research".chars().for_each(|c| state.get_folder_form_mut().input_char(c));
        state.submit_new_folder();
        assert_eq!(state.current_view(), View::Board);
        assert!(rx.try_iter().any(|event| matches!(
            event,
            NetworkEvent::CreateFolder { ref name, .. } if name == "Research"
        )));

        let mut folder: FolderNode = Faker.fake();
        folder.workspace_id = "ws-1".to_string();
        folder.projects = vec![];
        state.add_folder(folder.clone());
        let sidebar = state.get_sidebar().unwrap();
        assert_eq!(sidebar.folders().len(), 2);
        assert_eq!(sidebar.selected(), Some(folder.id.as_str()));
        assert_eq!(state.get_notice().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn empty_folder_name_keeps_dialog_open() {
        let (mut state, rx, _) = connected();
        state.set_workspaces(vec![workspace("ws-1")]);
        state.open_new_folder();
        state.submit_new_folder();
        assert_eq!(state.current_view(), View::NewFolder);
        assert_eq!(state.get_notice().unwrap().description, "Folder name is required");
        assert!(!rx
            .try_iter()
            .any(|event| matches!(event, NetworkEvent::CreateFolder { .. })));
    }

    #[test]
    fn keyboard_drag_dispatches_reorder() {
        let (mut state, rx, _) = connected();
        state.grab_selected_task();
        assert!(state.get_board().active_task().is_some());
        state.drag_cursor_down().drag_cursor_down();
        state.drop_task();
        assert!(!state.is_dragging());
        assert_eq!(state.selected_task().unwrap().id, "todo-redesign-homepage");
        assert_eq!(state.board_cursor(), (0, 2));
        assert!(rx
            .try_iter()
            .any(|event| matches!(event, NetworkEvent::PersistReorder { .. })));
    }

    #[test]
    fn rejected_reorder_rolls_back_with_notice() {
        let (mut state, rx, _) = connected();
        let before = state.get_sections().to_vec();
        state.grab_selected_task().drag_cursor_right().drop_task();
        let mutation = rx
            .try_iter()
            .find_map(|event| match event {
                NetworkEvent::PersistReorder { mutation, .. } => Some(mutation),
                _ => None,
            })
            .unwrap();
        state.reject_mutation(mutation);
        assert_eq!(state.get_sections(), before.as_slice());
        let notice = state.get_notice().unwrap();
        assert_eq!(notice.title, "Unable to reorder tasks");
        assert_eq!(notice.description, "Please try again.");
    }

    #[test]
    fn rejection_after_confirmation_is_ignored() {
        let (mut state, rx, _) = connected();
        state.grab_selected_task().drag_cursor_right().drop_task();
        let mutation = rx
            .try_iter()
            .find_map(|event| match event {
                NetworkEvent::PersistReorder { mutation, .. } => Some(mutation),
                _ => None,
            })
            .unwrap();
        state.confirm_reorder(mutation);
        let after = state.get_sections().to_vec();
        state.reject_mutation(mutation);
        assert_eq!(state.get_sections(), after.as_slice());
        assert!(state.get_notice().is_none());
    }

    #[test]
    fn new_project_targets_selected_folder() {
        let (mut state, rx, save_rx) = connected();
        state.set_workspaces(vec![workspace("ws-1")]);
        state.set_workspace_tree(tree("ws-1"));
        rx.try_iter().count();

        state.open_new_project();
        assert_eq!(state.current_view(), View::NewProject);
        assert_eq!(state.get_project_form().folder_index, 0);
        " Launch ".chars().for_each(|c| state.get_project_form_mut().input_char(c));
        state.submit_new_project();

        assert_eq!(state.current_view(), View::Board);
        assert!(state.is_project_pending());
        let (project, folder_name) = rx
            .try_iter()
            .find_map(|event| match event {
                NetworkEvent::CreateProject {
                    project,
                    folder_name,
                    ..
                } => Some((project, folder_name)),
                _ => None,
            })
            .unwrap();
        assert!(project.id.starts_with("prj_"));
        assert_eq!(project.name, "Launch");
        assert_eq!(project.folder_id, "ws-1-fld");
        assert_eq!(project.order, 2);
        assert_eq!(folder_name, "Design");

        save_rx.try_iter().count();
        state.add_project("ws-1", project.clone(), &folder_name);
        assert!(!state.is_project_pending());
        assert!(state.get_sidebar().unwrap().index().contains(&project.id));
        assert_eq!(state.get_notice().unwrap().title, "Project created");
        assert!(save_rx.try_iter().count() > 0);
    }

    #[test]
    fn new_project_without_folders_asks_for_one() {
        let (mut state, rx, _) = connected();
        state.set_workspaces(vec![workspace("ws-1")]);
        let mut empty = tree("ws-1");
        empty.folders.clear();
        state.set_workspace_tree(empty);
        rx.try_iter().count();

        state.open_new_project();
        state.get_project_form_mut().name = "Launch".to_string();
        state.submit_new_project();

        assert_eq!(state.current_view(), View::NewProject);
        assert!(!state.is_project_pending());
        assert_eq!(state.get_notice().unwrap().title, "Select a folder");
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn new_project_needs_loaded_tree() {
        let mut state = State::default();
        state.open_new_project();
        assert_eq!(state.current_view(), View::Board);
        assert_eq!(state.get_notice().unwrap().title, "Could not create project");
    }

    #[test]
    fn project_for_inactive_workspace_is_ignored() {
        let (mut state, _, _) = connected();
        state.set_workspaces(vec![workspace("ws-1")]);
        state.set_workspace_tree(tree("ws-1"));
        let project = ProjectNode {
            id: "prj_x".to_string(),
            folder_id: "ws-2-fld".to_string(),
            name: "Elsewhere".to_string(),
            order: 1,
            description: None,
        };
        state.add_project("ws-2", project, "Design");
        assert!(!state.get_sidebar().unwrap().index().contains("prj_x"));
        assert!(state.get_notice().is_none());
    }

    #[test]
    fn pointer_drag_moves_to_hit_target() {
        let (mut state, rx, _) = connected();
        state.get_hit_map_mut().push(
            Rect::new(0, 0, 10, 10),
            crate::board::drag::DropTarget::task("todo-redesign-homepage", "todo"),
        );
        state.get_hit_map_mut().push(
            Rect::new(20, 0, 10, 30),
            crate::board::drag::DropTarget::container("in-progress"),
        );
        state.mouse_down(1, 1).mouse_drag(21, 25).mouse_up(21, 25);
        let section = &state.get_sections()[1];
        assert_eq!(section.tasks.last().unwrap().id, "todo-redesign-homepage");
        assert!(rx
            .try_iter()
            .any(|event| matches!(event, NetworkEvent::PersistReorder { .. })));
    }

    #[test]
    fn pointer_release_outside_targets_cancels() {
        let (mut state, _, _) = connected();
        state.get_hit_map_mut().push(
            Rect::new(0, 0, 10, 10),
            crate::board::drag::DropTarget::task("todo-redesign-homepage", "todo"),
        );
        state.mouse_down(1, 1).mouse_up(50, 50);
        assert!(!state.is_dragging());
        assert!(state.get_board().active_task().is_none());
        assert_eq!(state.get_board().revision(), 0);
    }

    #[test]
    fn create_task_flow() {
        let (mut state, rx, _) = connected();
        state.next_column().open_create_task();
        assert_eq!(state.current_view(), View::CreateTask);
        {
            let form = state.get_task_form_mut();
            form.title = "Add dark mode".to_string();
            form.priority = Priority::High;
        }
        state.submit_create_task();
        assert_eq!(state.current_view(), View::Board);
        let created = rx
            .try_iter()
            .find_map(|event| match event {
                NetworkEvent::PersistCreate { mutation, task } => Some((mutation, task)),
                _ => None,
            })
            .unwrap();
        assert_eq!(created.1.status, "in-progress");
        assert_eq!(state.selected_task().unwrap().id, created.1.id);

        state.confirm_create(created.0, &created.1);
        let notice = state.get_notice().unwrap();
        assert_eq!(notice.title, "Task created");
        assert!(notice.description.contains("In Progress Task"));
    }

    #[test]
    fn create_task_without_sections_shows_error() {
        let (mut state, rx, _) = connected();
        state.set_board(Board::new(vec![]));
        state.open_create_task();
        state.get_task_form_mut().title = "Orphan".to_string();
        state.submit_create_task();
        assert_eq!(state.current_view(), View::CreateTask);
        assert_eq!(state.get_notice().unwrap().kind, NoticeKind::Error);
        assert!(!rx
            .try_iter()
            .any(|event| matches!(event, NetworkEvent::PersistCreate { .. })));
    }

    #[test]
    fn debug_log_is_bounded() {
        let mut state = State::default();
        for i in 0..MAX_LOG_ENTRIES + 5 {
            state.add_log_entry(format!("entry {}", i));
        }
        assert_eq!(state.get_debug_entries().len(), MAX_LOG_ENTRIES);
        state.enter_debug_mode();
        assert_eq!(state.get_current_debug().unwrap(), &format!("entry {}", MAX_LOG_ENTRIES + 4));
        state.next_debug();
        assert_eq!(state.get_debug_index(), 0);
        state.previous_debug();
        assert_eq!(state.get_debug_index(), MAX_LOG_ENTRIES - 1);
    }
}
