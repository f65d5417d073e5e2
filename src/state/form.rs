//! Dialog form state.

use super::StateError;
use crate::{
    api::resource::FolderNode,
    board::model::{CreateTaskInput, Priority, Section},
    utils::assignees::normalize_assignees,
};
use crossterm::event::KeyEvent;
use tui_textarea::TextArea;

/// Longest description accepted for tasks and projects, in characters.
///
pub const DESCRIPTION_LIMIT: usize = 320;

fn check_description(description: &str) -> Result<(), StateError> {
    if description.chars().count() > DESCRIPTION_LIMIT {
        return Err(StateError::Validation(format!(
            "Description must be at most {} characters",
            DESCRIPTION_LIMIT
        )));
    }
    Ok(())
}

/// Specifying create-task form fields, in tab order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TaskField {
    Title,
    Description,
    Priority,
    Status,
    Assignees,
}

impl TaskField {
    const ORDER: [TaskField; 5] = [
        TaskField::Title,
        TaskField::Description,
        TaskField::Priority,
        TaskField::Status,
        TaskField::Assignees,
    ];

    fn position(self) -> usize {
        TaskField::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        TaskField::ORDER[(self.position() + 1) % TaskField::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = TaskField::ORDER.len();
        TaskField::ORDER[(self.position() + len - 1) % len]
    }

    /// Return true for fields cycled with left and right instead of typed.
    ///
    pub fn is_select(self) -> bool {
        matches!(self, TaskField::Priority | TaskField::Status)
    }
}

/// Create-task dialog contents.
///
pub struct TaskForm {
    pub field: TaskField,
    pub title: String,
    pub description: TextArea<'static>,
    pub priority: Priority,
    pub status_index: usize,
    pub assignees: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm {
            field: TaskField::Title,
            title: String::new(),
            description: TextArea::default(),
            priority: Priority::default(),
            status_index: 0,
            assignees: String::new(),
        }
    }
}

impl TaskForm {
    /// Return an empty form targeting the given section.
    ///
    pub fn for_section(status_index: usize) -> Self {
        TaskForm {
            status_index,
            ..TaskForm::default()
        }
    }

    /// Route a typed character to the focused text field.
    ///
    pub fn input_char(&mut self, c: char) {
        match self.field {
            TaskField::Title => self.title.push(c),
            TaskField::Assignees => self.assignees.push(c),
            TaskField::Description => {
                self.description.insert_char(c);
            }
            TaskField::Priority | TaskField::Status => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            TaskField::Title => {
                self.title.pop();
            }
            TaskField::Assignees => {
                self.assignees.pop();
            }
            TaskField::Description => {
                self.description.delete_char();
            }
            TaskField::Priority | TaskField::Status => {}
        }
    }

    /// Forward an editing key to the description editor.
    ///
    pub fn input_description(&mut self, key: KeyEvent) {
        self.description.input(key);
    }

    /// Cycle the focused select field.
    ///
    pub fn cycle(&mut self, forward: bool, section_count: usize) {
        match self.field {
            TaskField::Priority => {
                self.priority = if forward {
                    self.priority.next()
                } else {
                    self.priority.previous()
                };
            }
            TaskField::Status if section_count > 0 => {
                self.status_index = if forward {
                    (self.status_index + 1) % section_count
                } else {
                    (self.status_index + section_count - 1) % section_count
                };
            }
            _ => {}
        }
    }

    pub fn description_text(&self) -> String {
        self.description.lines().join("\n")
    }

    /// Validate the form and build the creation input.
    ///
    pub fn to_input(&self, sections: &[Section]) -> Result<CreateTaskInput, StateError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(StateError::Validation("Title is required".to_owned()));
        }
        let description = self.description_text();
        let description = description.trim();
        check_description(description)?;
        let status = sections
            .get(self.status_index)
            .or_else(|| sections.first())
            .map(|section| section.id.clone())
            .unwrap_or_default();
        Ok(CreateTaskInput {
            title: title.to_owned(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_owned())
            },
            priority: self.priority,
            assignees: normalize_assignees(&self.assignees),
            status,
        })
    }
}

/// New-folder dialog contents.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FolderForm {
    pub name: String,
}

impl FolderForm {
    pub fn input_char(&mut self, c: char) {
        self.name.push(c);
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    /// Return the trimmed name, failing when it is empty.
    ///
    pub fn validated_name(&self) -> Result<String, StateError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StateError::Validation("Folder name is required".to_owned()));
        }
        Ok(name.to_owned())
    }
}

/// Specifying new-project form fields, in tab order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum ProjectField {
    #[default]
    Name,
    Folder,
    Description,
}

impl ProjectField {
    pub fn next(self) -> Self {
        match self {
            ProjectField::Name => ProjectField::Folder,
            ProjectField::Folder => ProjectField::Description,
            ProjectField::Description => ProjectField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ProjectField::Name => ProjectField::Description,
            ProjectField::Folder => ProjectField::Name,
            ProjectField::Description => ProjectField::Folder,
        }
    }
}

/// Validated new-project input.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub folder_id: String,
    pub folder_name: String,
    pub name: String,
    pub description: Option<String>,
}

/// New-project dialog contents.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub field: ProjectField,
    pub name: String,
    pub folder_index: usize,
    pub description: String,
}

impl ProjectForm {
    /// Return an empty form targeting the folder at `folder_index`.
    ///
    pub fn for_folder(folder_index: usize) -> Self {
        ProjectForm {
            folder_index,
            ..ProjectForm::default()
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.field {
            ProjectField::Name => self.name.push(c),
            ProjectField::Description => self.description.push(c),
            ProjectField::Folder => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            ProjectField::Name => {
                self.name.pop();
            }
            ProjectField::Description => {
                self.description.pop();
            }
            ProjectField::Folder => {}
        }
    }

    /// Cycle the folder selection when it has focus.
    ///
    pub fn cycle(&mut self, forward: bool, folder_count: usize) {
        if self.field != ProjectField::Folder || folder_count == 0 {
            return;
        }
        self.folder_index = if forward {
            (self.folder_index + 1) % folder_count
        } else {
            (self.folder_index + folder_count - 1) % folder_count
        };
    }

    /// Validate the form against the folders of the active tree.
    ///
    pub fn to_draft(&self, folders: &[FolderNode]) -> Result<ProjectDraft, StateError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StateError::Validation("Project name is required".to_owned()));
        }
        let description = self.description.trim();
        check_description(description)?;
        let folder = folders
            .get(self.folder_index)
            .ok_or(StateError::FolderNotSelected)?;
        Ok(ProjectDraft {
            folder_id: folder.id.clone(),
            folder_name: folder.name.clone(),
            name: name.to_owned(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_owned())
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fixtures::initial_sections;

    #[test]
    fn test_field_order_wraps() {
        assert_eq!(TaskField::Title.next(), TaskField::Description);
        assert_eq!(TaskField::Assignees.next(), TaskField::Title);
        assert_eq!(TaskField::Title.previous(), TaskField::Assignees);
        assert!(TaskField::Status.is_select());
        assert!(!TaskField::Title.is_select());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = TaskForm::default();
        "Ship".chars().for_each(|c| form.input_char(c));
        form.field = TaskField::Assignees;
        "Alex Li".chars().for_each(|c| form.input_char(c));
        form.backspace();
        assert_eq!(form.title, "Ship");
        assert_eq!(form.assignees, "Alex L");
    }

    #[test]
    fn test_cycle_status_wraps() {
        let mut form = TaskForm::for_section(1);
        form.field = TaskField::Status;
        form.cycle(true, 2);
        assert_eq!(form.status_index, 0);
        form.cycle(false, 2);
        assert_eq!(form.status_index, 1);
        form.field = TaskField::Priority;
        form.cycle(true, 2);
        assert_eq!(form.priority, Priority::Normal);
    }

    #[test]
    fn test_to_input_requires_title() {
        let form = TaskForm::default();
        assert!(matches!(
            form.to_input(&initial_sections()),
            Err(StateError::Validation(_))
        ));
    }

    #[test]
    fn test_to_input_normalizes() {
        let mut form = TaskForm::for_section(1);
        form.title = "  Audit logs ".to_string();
        form.assignees = "Alex Li, Morgan Bates, Dana Lee, Jordan Kim".to_string();
        let input = form.to_input(&initial_sections()).unwrap();
        assert_eq!(input.title, "Audit logs");
        assert_eq!(input.description, None);
        assert_eq!(input.status, "in-progress");
        assert_eq!(input.assignees, vec!["AL", "MB", "+2"]);
    }

    #[test]
    fn test_folder_name_validation() {
        let mut form = FolderForm::default();
        assert!(form.validated_name().is_err());
        " Ops ".chars().for_each(|c| form.input_char(c));
        assert_eq!(form.validated_name().unwrap(), "Ops");
    }

    #[test]
    fn test_task_description_limit() {
        let mut form = TaskForm::for_section(0);
        form.title = "Audit logs".to_string();
        form.description = TextArea::from(["x".repeat(DESCRIPTION_LIMIT)]);
        assert!(form.to_input(&initial_sections()).is_ok());

        form.description = TextArea::from(["x".repeat(DESCRIPTION_LIMIT + 1)]);
        match form.to_input(&initial_sections()) {
            Err(StateError::Validation(message)) => assert!(message.contains("320")),
            other => panic!("unexpected result: {:?}", other.map(|input| input.title)),
        }
    }

    fn folders() -> Vec<FolderNode> {
        vec![
            FolderNode {
                id: "fld-1".to_string(),
                workspace_id: "ws".to_string(),
                name: "Marketing".to_string(),
                order: 1,
                projects: vec![],
            },
            FolderNode {
                id: "fld-2".to_string(),
                workspace_id: "ws".to_string(),
                name: "Engineering".to_string(),
                order: 2,
                projects: vec![],
            },
        ]
    }

    #[test]
    fn test_project_draft() {
        let mut form = ProjectForm::for_folder(0);
        assert!(matches!(form.to_draft(&folders()), Err(StateError::Validation(_))));

        " Launch ".chars().for_each(|c| form.input_char(c));
        form.field = ProjectField::Folder;
        form.input_char('x');
        form.cycle(true, 2);
        form.field = form.field.next();
        "Q3 rollout".chars().for_each(|c| form.input_char(c));

        let draft = form.to_draft(&folders()).unwrap();
        assert_eq!(draft.name, "Launch");
        assert_eq!(draft.folder_id, "fld-2");
        assert_eq!(draft.folder_name, "Engineering");
        assert_eq!(draft.description.as_deref(), Some("Q3 rollout"));
    }

    #[test]
    fn test_project_needs_folder() {
        let mut form = ProjectForm::default();
        form.name = "Launch".to_string();
        assert!(matches!(form.to_draft(&[]), Err(StateError::FolderNotSelected)));

        form.description = "x".repeat(DESCRIPTION_LIMIT + 1);
        assert!(matches!(
            form.to_draft(&folders()),
            Err(StateError::Validation(_))
        ));
    }
}
