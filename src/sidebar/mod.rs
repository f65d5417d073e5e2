//! Sidebar folder tree.
//!
//! Tracks which folders are expanded, which node is selected and which node
//! holds keyboard focus. Expanded folders and the selection are stored per
//! workspace in the [`PreferenceStore`].

pub mod tree;

use crate::{
    api::resource::{FolderNode, ProjectNode},
    config::preferences::{expanded_folders_key, selected_node_key, PreferenceStore},
};
use log::*;
use tree::{NodeKind, TreeIndex};

/// Navigation keys understood by the tree.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeKey {
    Down,
    Up,
    Right,
    Left,
    CollapseFolder,
    ExpandFolder,
}

/// Defines sidebar tree state.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebar {
    workspace_id: String,
    folders: Vec<FolderNode>,
    index: TreeIndex,
    expanded: Vec<String>,
    selected: Option<String>,
    focused: Option<String>,
}

impl Sidebar {
    /// Mount the tree of a workspace, restoring its stored expansion and
    /// selection.
    ///
    pub fn mount(workspace_id: &str, folders: Vec<FolderNode>, preferences: &PreferenceStore) -> Self {
        let index = TreeIndex::build(&folders);
        let mut sidebar = Sidebar {
            workspace_id: workspace_id.to_owned(),
            folders,
            index,
            ..Sidebar::default()
        };
        sidebar.restore_expanded(preferences);
        sidebar.restore_selection(preferences);
        sidebar
    }

    fn restore_expanded(&mut self, preferences: &PreferenceStore) {
        let key = expanded_folders_key(&self.workspace_id);
        self.expanded = match preferences.get_string_list(&key) {
            Ok(Some(stored)) => stored
                .into_iter()
                .filter(|id| self.index.contains(id))
                .collect(),
            Ok(None) => self.index.folder_ids().cloned().collect(),
            Err(e) => {
                warn!("Failed to read sidebar expanded state: {}", e);
                self.index.folder_ids().cloned().collect()
            }
        };
    }

    fn restore_selection(&mut self, preferences: &PreferenceStore) {
        if self.index.is_empty() {
            return;
        }
        let key = selected_node_key(&self.workspace_id);
        let stored = match preferences.get_string(&key) {
            Ok(stored) => stored.filter(|id| self.index.contains(id)),
            Err(e) => {
                warn!("Failed to read selected node state: {}", e);
                None
            }
        };
        let selected = stored.or_else(|| self.index.default_selection());
        if let Some(parent) = selected
            .as_deref()
            .and_then(|id| self.index.get(id))
            .and_then(|node| node.parent_id.clone())
        {
            self.expand(&parent);
        }
        self.focused = selected.clone();
        self.selected = selected;
    }

    /// Write expansion and selection to the preference store.
    ///
    pub fn save(&self, preferences: &mut PreferenceStore) {
        preferences.set_string_list(&expanded_folders_key(&self.workspace_id), &self.expanded);
        let key = selected_node_key(&self.workspace_id);
        match &self.selected {
            Some(id) => preferences.set_string(&key, id),
            None => preferences.remove(&key),
        };
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn folders(&self) -> &[FolderNode] {
        &self.folders
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn expanded(&self) -> &[String] {
        &self.expanded
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn is_expanded(&self, folder_id: &str) -> bool {
        self.expanded.iter().any(|id| id == folder_id)
    }

    /// Replace the folder list and rebuild the lookup. Ids that vanished are
    /// dropped from the expanded set.
    ///
    pub fn set_folders(&mut self, folders: Vec<FolderNode>) {
        self.index = TreeIndex::build(&folders);
        self.folders = folders;
        let index = &self.index;
        self.expanded.retain(|id| index.contains(id));
    }

    /// Append a newly created folder and select it.
    ///
    pub fn push_folder(&mut self, folder: FolderNode) {
        let id = folder.id.clone();
        let mut folders = self.folders.clone();
        folders.push(folder);
        self.set_folders(folders);
        self.select(&id);
    }

    /// Return the order given to a project appended to the folder, one past
    /// the highest existing order.
    ///
    pub fn next_project_order(&self, folder_id: &str) -> Option<usize> {
        let folder = self.folders.iter().find(|folder| folder.id == folder_id)?;
        Some(folder.projects.iter().map(|project| project.order).max().unwrap_or(0) + 1)
    }

    /// Append a created project to its folder. Returns false if the folder
    /// is not in the tree.
    ///
    pub fn push_project(&mut self, project: ProjectNode) -> bool {
        let mut folders = self.folders.clone();
        match folders.iter_mut().find(|folder| folder.id == project.folder_id) {
            Some(folder) => folder.projects.push(project),
            None => return false,
        }
        self.set_folders(folders);
        true
    }

    pub fn expand(&mut self, folder_id: &str) {
        if !self.is_expanded(folder_id) {
            self.expanded.push(folder_id.to_owned());
        }
    }

    pub fn collapse(&mut self, folder_id: &str) {
        self.expanded.retain(|id| id != folder_id);
    }

    pub fn toggle(&mut self, folder_id: &str) {
        if self.is_expanded(folder_id) {
            self.collapse(folder_id);
        } else {
            self.expand(folder_id);
        }
    }

    /// Select and focus a node. Selecting a project expands its folder.
    ///
    pub fn select(&mut self, node_id: &str) {
        let node = match self.index.get(node_id) {
            Some(node) => node,
            None => return,
        };
        let parent = match node.kind {
            NodeKind::Project => node.parent_id.clone(),
            NodeKind::Folder => None,
        };
        self.selected = Some(node_id.to_owned());
        self.focused = Some(node_id.to_owned());
        if let Some(parent) = parent {
            self.expand(&parent);
        }
    }

    /// Activate a node: folders toggle and get selected, projects get
    /// selected.
    ///
    pub fn activate(&mut self, node_id: &str) {
        if let Some(NodeKind::Folder) = self.index.get(node_id).map(|node| node.kind) {
            self.toggle(node_id);
        }
        self.select(node_id);
    }

    /// Activate the node that currently holds the tab stop.
    ///
    pub fn activate_focused(&mut self) {
        if let Some(id) = self.tab_stop() {
            self.activate(&id);
        }
    }

    pub fn visible_ids(&self) -> Vec<String> {
        self.index.visible_ids(|id| self.is_expanded(id))
    }

    /// Return the focused node, or the first visible node.
    ///
    pub fn tab_stop(&self) -> Option<String> {
        self.focused
            .clone()
            .or_else(|| self.visible_ids().into_iter().next())
    }

    /// Apply a navigation key to the node holding the tab stop. Returns true
    /// if the tree state changed.
    ///
    pub fn handle_key(&mut self, key: TreeKey) -> bool {
        let node_id = match self.tab_stop() {
            Some(id) => id,
            None => return false,
        };
        let node = match self.index.get(&node_id) {
            Some(node) => node.clone(),
            None => return false,
        };
        let visible = self.visible_ids();
        let current = visible.iter().position(|id| *id == node_id);

        match key {
            TreeKey::Down => {
                let next = current.map_or(0, |index| index + 1);
                self.focus_visible(&visible, next)
            }
            TreeKey::Up => match current {
                Some(index) if index > 0 => self.focus_visible(&visible, index - 1),
                _ => false,
            },
            TreeKey::Right => {
                if node.kind != NodeKind::Folder || node.child_ids.is_empty() {
                    return false;
                }
                if !self.is_expanded(&node.id) {
                    self.expand(&node.id);
                } else {
                    self.focused = node.child_ids.first().cloned();
                }
                true
            }
            TreeKey::Left => match node.kind {
                NodeKind::Folder => {
                    if self.is_expanded(&node.id) && !node.child_ids.is_empty() {
                        self.collapse(&node.id);
                        true
                    } else {
                        false
                    }
                }
                NodeKind::Project => match node.parent_id {
                    Some(parent) => {
                        self.focused = Some(parent);
                        true
                    }
                    None => false,
                },
            },
            TreeKey::CollapseFolder => match folder_of(&node) {
                Some(folder) => {
                    self.collapse(&folder);
                    true
                }
                None => false,
            },
            TreeKey::ExpandFolder => match folder_of(&node) {
                Some(folder) => {
                    self.expand(&folder);
                    true
                }
                None => false,
            },
        }
    }

    fn focus_visible(&mut self, visible: &[String], index: usize) -> bool {
        match visible.get(index) {
            Some(id) => {
                self.focused = Some(id.clone());
                true
            }
            None => false,
        }
    }
}

fn folder_of(node: &tree::TreeNode) -> Option<String> {
    match node.kind {
        NodeKind::Folder => Some(node.id.clone()),
        NodeKind::Project => node.parent_id.clone(),
    }
}
