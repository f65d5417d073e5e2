//! Lookup built from the folder list.

use crate::api::resource::FolderNode;
use std::collections::HashMap;

/// Kind of a sidebar node.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Folder,
    Project,
}

/// Defines tree node data structure.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub depth: u8,
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,
}

/// Node lookup plus folder order.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeIndex {
    nodes: HashMap<String, TreeNode>,
    sequence: Vec<(String, Vec<String>)>, // Folder id with its project ids
}

impl TreeIndex {
    pub fn build(folders: &[FolderNode]) -> Self {
        let mut index = TreeIndex::default();
        for folder in folders {
            let project_ids: Vec<String> = folder.projects.iter().map(|p| p.id.clone()).collect();
            index.nodes.insert(
                folder.id.clone(),
                TreeNode {
                    id: folder.id.clone(),
                    label: folder.name.clone(),
                    kind: NodeKind::Folder,
                    depth: 1,
                    parent_id: None,
                    child_ids: project_ids.clone(),
                },
            );
            for project in &folder.projects {
                index.nodes.insert(
                    project.id.clone(),
                    TreeNode {
                        id: project.id.clone(),
                        label: project.name.clone(),
                        kind: NodeKind::Project,
                        depth: 2,
                        parent_id: Some(folder.id.clone()),
                        child_ids: vec![],
                    },
                );
            }
            index.sequence.push((folder.id.clone(), project_ids));
        }
        index
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn folder_ids(&self) -> impl Iterator<Item = &String> {
        self.sequence.iter().map(|(id, _)| id)
    }

    /// First project of the first folder, or the first folder itself.
    ///
    pub fn default_selection(&self) -> Option<String> {
        let (folder, projects) = self.sequence.first()?;
        Some(projects.first().unwrap_or(folder).clone())
    }

    /// Return the depth-first ids of nodes whose folder is expanded.
    ///
    pub fn visible_ids(&self, is_expanded: impl Fn(&str) -> bool) -> Vec<String> {
        let mut ids = Vec::new();
        for (folder, projects) in &self.sequence {
            ids.push(folder.clone());
            if is_expanded(folder) {
                ids.extend(projects.iter().cloned());
            }
        }
        ids
    }
}
