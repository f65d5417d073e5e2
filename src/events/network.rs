use crate::api::{Api, ApiError, ProjectNode};
use crate::board::{
    model::{ReorderPayload, Task},
    mutation::MutationId,
    persistence::PersistenceShim,
};
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Workspaces,
    WorkspaceTree {
        workspace_id: String,
        delay_ms: u64,
    },
    CreateFolder {
        workspace_id: String,
        name: String,
    },
    PersistReorder {
        mutation: MutationId,
        payload: ReorderPayload,
    },
    CreateProject {
        workspace_id: String,
        project: ProjectNode,
        folder_name: String,
    },
    PersistCreate {
        mutation: MutationId,
        task: Task,
    },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    api: &'a Api,
    persistence: &'a PersistenceShim,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, api: &'a Api, persistence: &'a PersistenceShim) -> Self {
        Handler {
            state,
            api,
            persistence,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Workspaces => self.workspaces().await?,
            Event::WorkspaceTree {
                workspace_id,
                delay_ms,
            } => self.workspace_tree(workspace_id, delay_ms).await?,
            Event::CreateFolder { workspace_id, name } => self.create_folder(workspace_id, name).await?,
            Event::PersistReorder { mutation, payload } => {
                self.persist_reorder(mutation, payload);
            }
            Event::PersistCreate { mutation, task } => {
                self.persist_create(mutation, task);
            }
            Event::CreateProject {
                workspace_id,
                project,
                folder_name,
            } => {
                self.create_project(workspace_id, project, folder_name);
            }
        }
        Ok(())
    }

    /// Update state with the available workspaces.
    ///
    async fn workspaces(&mut self) -> Result<()> {
        info!("Fetching workspaces from {}...", self.api.base_url());
        match self.api.workspaces().await {
            Ok(workspaces) => {
                info!("Received {} workspaces.", workspaces.len());
                let mut state = self.state.lock().await;
                state.set_workspaces(workspaces);
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.workspaces_failed(&failure_message(&e));
                Err(e.into())
            }
        }
    }

    /// Update state with the folder tree of a workspace.
    ///
    async fn workspace_tree(&mut self, workspace_id: String, delay_ms: u64) -> Result<()> {
        info!("Fetching tree for workspace {}...", workspace_id);
        let delay = if delay_ms > 0 { Some(delay_ms) } else { None };
        match self.api.workspace_tree(&workspace_id, delay).await {
            Ok(tree) => {
                info!(
                    "Received {} folders for workspace '{}'.",
                    tree.folders.len(),
                    tree.workspace.name
                );
                let mut state = self.state.lock().await;
                state.set_workspace_tree(tree);
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.workspace_tree_failed(&workspace_id, &failure_message(&e));
                Err(e.into())
            }
        }
    }

    /// Create a folder and add it to the tree.
    ///
    async fn create_folder(&mut self, workspace_id: String, name: String) -> Result<()> {
        info!("Creating folder '{}' in workspace {}...", name, workspace_id);
        match self.api.create_folder(&workspace_id, &name).await {
            Ok(folder) => {
                info!("Folder {} created.", folder.id);
                let mut state = self.state.lock().await;
                state.add_folder(folder);
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.folder_failed(&failure_message(&e));
                Err(e.into())
            }
        }
    }

    /// Confirm a reorder in the background so that later mutations are not
    /// held behind it.
    ///
    fn persist_reorder(&self, mutation: MutationId, payload: ReorderPayload) -> JoinHandle<()> {
        let state = Arc::clone(self.state);
        let persistence = self.persistence.clone();
        tokio::spawn(async move {
            let result = persistence.persist_reorder(payload).await;
            let mut state = state.lock().await;
            match result {
                Ok(_) => {
                    state.confirm_reorder(mutation);
                }
                Err(e) => {
                    warn!("Rolling back reorder {}: {}", mutation, e);
                    state.reject_mutation(mutation);
                }
            }
        })
    }

    /// Confirm a task creation in the background.
    ///
    fn persist_create(&self, mutation: MutationId, task: Task) -> JoinHandle<()> {
        let state = Arc::clone(self.state);
        let persistence = self.persistence.clone();
        tokio::spawn(async move {
            let result = persistence.persist_create(task).await;
            let mut state = state.lock().await;
            match result {
                Ok(task) => {
                    state.confirm_create(mutation, &task);
                }
                Err(e) => {
                    warn!("Rolling back creation {}: {}", mutation, e);
                    state.reject_mutation(mutation);
                }
            }
        })
    }

    /// Confirm a project creation in the background and add it to the tree.
    ///
    fn create_project(
        &self,
        workspace_id: String,
        project: ProjectNode,
        folder_name: String,
    ) -> JoinHandle<()> {
        let state = Arc::clone(self.state);
        let persistence = self.persistence.clone();
        tokio::spawn(async move {
            let result = persistence.persist_project(project).await;
            let mut state = state.lock().await;
            match result {
                Ok(project) => {
                    state.add_project(&workspace_id, project, &folder_name);
                }
                Err(e) => {
                    warn!("Project creation failed: {}", e);
                    state.project_failed(&e.to_string());
                }
            }
        })
    }
}

/// Word an API failure for a notice, preferring the server's own message.
///
fn failure_message(e: &ApiError) -> String {
    match e {
        ApiError::Api { message, .. } if e.is_not_found() => {
            format!("{}. It may have been removed.", message)
        }
        ApiError::Api { message, .. } => message.clone(),
        _ => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WorkspaceSummary;
    use crate::board::persistence::PersistenceSettings;
    use crate::state::{NoticeKind, View};
    use httpmock::prelude::*;
    use serde_json::json;

    fn shim(failure_rate: f64) -> PersistenceShim {
        PersistenceShim::new(PersistenceSettings {
            reorder_delay_ms: 0,
            create_delay_ms: 0,
            project_delay_ms: 0,
            failure_rate,
        })
    }

    fn workspaces_body() -> serde_json::Value {
        json!({
            "workspaces": [
                { "id": "ws-1", "name": "Acme", "slug": "acme" },
                { "id": "ws-2", "name": "Globex", "slug": "globex" }
            ]
        })
    }

    fn tree_body(id: &str) -> serde_json::Value {
        json!({
            "workspace": { "id": id, "name": "Acme", "slug": "acme" },
            "folders": [{
                "id": "fld-1",
                "workspaceId": id,
                "name": "Design",
                "order": 1,
                "projects": [{
                    "id": "prj-1",
                    "folderId": "fld-1",
                    "name": "Website",
                    "order": 1
                }]
            }]
        })
    }

    #[tokio::test]
    async fn workspaces_populate_state() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/workspaces");
                then.status(200).json_body(workspaces_body());
            })
            .await;

        let state = Arc::new(Mutex::new(State::default()));
        let api = Api::new(&server.base_url());
        let persistence = shim(0.0);
        let mut handler = Handler::new(&state, &api, &persistence);
        handler.handle(Event::Workspaces).await?;

        mock.assert_async().await;
        let state = state.lock().await;
        assert_eq!(state.get_workspaces().len(), 2);
        assert_eq!(state.get_active_workspace().unwrap().id, "ws-1");
        assert!(state.is_tree_loading());
        Ok(())
    }

    #[tokio::test]
    async fn workspace_tree_mounts_sidebar() -> Result<()> {
        let server = MockServer::start_async().await;
        let workspaces = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/workspaces");
                then.status(200).json_body(workspaces_body());
            })
            .await;
        let tree = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/workspaces/ws-1/tree")
                    .query_param("delay", "300");
                then.status(200).json_body(tree_body("ws-1"));
            })
            .await;

        let state = Arc::new(Mutex::new(State::default()));
        let api = Api::new(&server.base_url());
        let persistence = shim(0.0);
        let mut handler = Handler::new(&state, &api, &persistence);
        handler.handle(Event::Workspaces).await?;
        handler
            .handle(Event::WorkspaceTree {
                workspace_id: "ws-1".to_string(),
                delay_ms: 300,
            })
            .await?;

        workspaces.assert_async().await;
        tree.assert_async().await;
        let state = state.lock().await;
        let sidebar = state.get_sidebar().unwrap();
        assert_eq!(sidebar.selected(), Some("prj-1"));
        assert!(sidebar.is_expanded("fld-1"));
        Ok(())
    }

    #[tokio::test]
    async fn failed_workspaces_show_notice() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/workspaces");
                then.status(500).json_body(json!({ "error": "boom" }));
            })
            .await;

        let state = Arc::new(Mutex::new(State::default()));
        let api = Api::new(&server.base_url());
        let persistence = shim(0.0);
        let mut handler = Handler::new(&state, &api, &persistence);
        assert!(handler.handle(Event::Workspaces).await.is_err());

        mock.assert_async().await;
        let state = state.lock().await;
        assert!(!state.is_workspaces_loading());
        assert_eq!(state.get_notice().unwrap().kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn rejected_folder_shows_server_message() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/workspaces/ws-9/folders")
                    .json_body(json!({ "name": "Research" }));
                then.status(404).json_body(json!({ "error": "Workspace not found" }));
            })
            .await;

        let state = Arc::new(Mutex::new(State::default()));
        let api = Api::new(&server.base_url());
        let persistence = shim(0.0);
        let mut handler = Handler::new(&state, &api, &persistence);
        let result = handler
            .handle(Event::CreateFolder {
                workspace_id: "ws-9".to_string(),
                name: " Research ".to_string(),
            })
            .await;
        assert!(result.is_err());

        mock.assert_async().await;
        let state = state.lock().await;
        assert!(!state.is_folder_pending());
        assert_eq!(
            state.get_notice().unwrap().description,
            "Workspace not found. It may have been removed."
        );
    }

    #[tokio::test]
    async fn invalid_folder_shows_validation_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/workspaces/ws-1/folders");
                then.status(400).json_body(json!({ "error": "Folder name is required" }));
            })
            .await;

        let state = Arc::new(Mutex::new(State::default()));
        let api = Api::new(&server.base_url());
        let persistence = shim(0.0);
        let mut handler = Handler::new(&state, &api, &persistence);
        let result = handler
            .handle(Event::CreateFolder {
                workspace_id: "ws-1".to_string(),
                name: "x".to_string(),
            })
            .await;
        assert!(result.is_err());

        let state = state.lock().await;
        assert_eq!(state.get_notice().unwrap().description, "Folder name is required");
    }

    #[tokio::test]
    async fn confirmed_creation_clears_pending() {
        let state = Arc::new(Mutex::new(State::default()));
        let (mutation, task) = {
            let mut state = state.lock().await;
            state.set_board(crate::board::Board::new(crate::board::fixtures::initial_sections()));
            state.open_create_task();
            state.get_task_form_mut().title = "Ship it".to_string();
            state.submit_create_task();
            assert_eq!(state.current_view(), View::Board);
            assert_eq!(state.get_board().pending_len(), 1);
            let task = state.selected_task().unwrap().clone();
            (1, task)
        };

        let api = Api::new("http://localhost:1");
        let persistence = shim(0.0);
        let handler = Handler::new(&state, &api, &persistence);
        handler.persist_create(mutation, task).await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.get_board().pending_len(), 0);
        assert_eq!(state.get_notice().unwrap().title, "Task created");
    }

    #[tokio::test]
    async fn rejected_reorder_restores_board() {
        let state = Arc::new(Mutex::new(State::default()));
        let before = {
            let mut state = state.lock().await;
            state.set_board(crate::board::Board::new(crate::board::fixtures::initial_sections()));
            let before = state.get_sections().to_vec();
            state.grab_selected_task().drag_cursor_right().drop_task();
            assert_ne!(state.get_sections(), before.as_slice());
            before
        };
        let payload = state.lock().await.get_board().reorder_payload();

        let api = Api::new("http://localhost:1");
        let persistence = shim(1.0);
        let handler = Handler::new(&state, &api, &persistence);
        handler.persist_reorder(1, payload).await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.get_sections(), before.as_slice());
        assert_eq!(state.get_notice().unwrap().title, "Unable to reorder tasks");
    }

    async fn mounted_state() -> Arc<Mutex<State>> {
        let state = Arc::new(Mutex::new(State::default()));
        {
            let mut state = state.lock().await;
            state.set_workspaces(vec![WorkspaceSummary {
                id: "ws-1".to_string(),
                name: "Acme".to_string(),
                slug: "acme".to_string(),
            }]);
            state.set_workspace_tree(serde_json::from_value(tree_body("ws-1")).unwrap());
        }
        state
    }

    fn launch_project() -> ProjectNode {
        ProjectNode {
            id: "prj_launch".to_string(),
            folder_id: "fld-1".to_string(),
            name: "Launch".to_string(),
            order: 2,
            description: None,
        }
    }

    #[tokio::test]
    async fn confirmed_project_joins_tree() {
        let state = mounted_state().await;
        let api = Api::new("http://localhost:1");
        let persistence = shim(0.0);
        let handler = Handler::new(&state, &api, &persistence);
        handler
            .create_project("ws-1".to_string(), launch_project(), "Design".to_string())
            .await
            .unwrap();

        let state = state.lock().await;
        let sidebar = state.get_sidebar().unwrap();
        assert!(sidebar.index().contains("prj_launch"));
        let notice = state.get_notice().unwrap();
        assert_eq!(notice.title, "Project created");
        assert_eq!(notice.description, "\"Launch\" added under Design.");
    }

    #[tokio::test]
    async fn rejected_project_leaves_tree() {
        let state = mounted_state().await;
        let api = Api::new("http://localhost:1");
        let persistence = shim(1.0);
        let handler = Handler::new(&state, &api, &persistence);
        handler
            .create_project("ws-1".to_string(), launch_project(), "Design".to_string())
            .await
            .unwrap();

        let state = state.lock().await;
        assert!(!state.get_sidebar().unwrap().index().contains("prj_launch"));
        assert!(!state.is_project_pending());
        let notice = state.get_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Could not create project");
    }
}
