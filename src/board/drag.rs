//! Drag gestures.
//!
//! Keyboard and mouse input are both reduced to [`DragSignal`]s, which are
//! the only way a gesture reaches the [`Board`].

use super::{mutation::MutationId, model::ReorderPayload, Board};
use ratatui::layout::Rect;

/// Context carried by a draggable or droppable item.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragData {
    Container { section_id: String },
    Task { section_id: String },
}

impl DragData {
    pub fn section_id(&self) -> &str {
        match self {
            DragData::Container { section_id } | DragData::Task { section_id } => section_id,
        }
    }
}

/// Item under the pointer or drop cursor.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropTarget {
    pub id: String,
    pub data: Option<DragData>,
}

impl DropTarget {
    /// Empty tail of a section. Its id is the section id.
    ///
    pub fn container(section_id: &str) -> Self {
        DropTarget {
            id: section_id.to_owned(),
            data: Some(DragData::Container {
                section_id: section_id.to_owned(),
            }),
        }
    }

    pub fn task(task_id: &str, section_id: &str) -> Self {
        DropTarget {
            id: task_id.to_owned(),
            data: Some(DragData::Task {
                section_id: section_id.to_owned(),
            }),
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self.data, Some(DragData::Task { .. }))
    }
}

/// Gesture event consumed by the board.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragSignal {
    Start {
        id: String,
    },
    End {
        active_id: String,
        active_data: Option<DragData>,
        over: Option<DropTarget>,
    },
    Cancel,
}

/// Forward a gesture signal to the board. Returns the recorded mutation and
/// the payload to confirm when the drop changed the layout.
///
pub fn apply_signal(board: &mut Board, signal: DragSignal) -> Option<(MutationId, ReorderPayload)> {
    match signal {
        DragSignal::Start { id } => {
            board.begin_drag(&id);
            None
        }
        DragSignal::End {
            active_id,
            active_data,
            over,
        } => match over {
            Some(over) => board.end_drag(&active_id, active_data.as_ref(), Some(&over)),
            None => {
                board.cancel_drag();
                None
            }
        },
        DragSignal::Cancel => {
            board.cancel_drag();
            None
        }
    }
}

/// A drag in progress.
///
/// The pointer sets the hovered target directly. The keyboard moves a drop
/// cursor over the task slots of each column, where the slot past the last
/// task is the column container.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub active_id: String,
    pub active_data: DragData,
    pub over: Option<DropTarget>,
    column: usize,
    slot: usize,
}

impl DragSession {
    /// Pick up a task. Returns `None` if the board doesn't hold it.
    ///
    pub fn new(board: &Board, task_id: &str) -> Option<Self> {
        let (column, section) = board
            .sections()
            .iter()
            .enumerate()
            .find(|(_, section)| section.position(task_id).is_some())?;
        let slot = section.position(task_id)?;
        Some(DragSession {
            active_id: task_id.to_owned(),
            active_data: DragData::Task {
                section_id: section.id.clone(),
            },
            over: Some(DropTarget::task(task_id, &section.id)),
            column,
            slot,
        })
    }

    /// Return the signal that starts this drag.
    ///
    pub fn start_signal(&self) -> DragSignal {
        DragSignal::Start {
            id: self.active_id.clone(),
        }
    }

    /// Consume the session and return the signal that drops it.
    ///
    pub fn finish(self) -> DragSignal {
        DragSignal::End {
            active_id: self.active_id,
            active_data: Some(self.active_data),
            over: self.over,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Set the hovered target from a pointer hit-test.
    ///
    pub fn hover(&mut self, target: Option<DropTarget>) {
        self.over = target;
    }

    pub fn cursor_up(&mut self, board: &Board) {
        self.slot = self.slot.saturating_sub(1);
        self.retarget(board);
    }

    pub fn cursor_down(&mut self, board: &Board) {
        self.slot += 1;
        self.retarget(board);
    }

    pub fn cursor_left(&mut self, board: &Board) {
        self.column = self.column.saturating_sub(1);
        self.retarget(board);
    }

    pub fn cursor_right(&mut self, board: &Board) {
        if self.column + 1 < board.sections().len() {
            self.column += 1;
        }
        self.retarget(board);
    }

    fn retarget(&mut self, board: &Board) {
        let sections = board.sections();
        if sections.is_empty() {
            self.over = None;
            return;
        }
        self.column = self.column.min(sections.len() - 1);
        let section = &sections[self.column];
        self.slot = self.slot.min(section.tasks.len());
        self.over = Some(match section.tasks.get(self.slot) {
            Some(task) => DropTarget::task(&task.id, &section.id),
            None => DropTarget::container(&section.id),
        });
    }
}

/// Screen regions of the rendered board, recorded at draw time so mouse
/// positions can be resolved to drop targets.
///
#[derive(Clone, Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, DropTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Register a region. Later regions take precedence over earlier ones,
    /// so columns are pushed before the cards they contain.
    ///
    pub fn push(&mut self, area: Rect, target: DropTarget) {
        self.regions.push((area, target));
    }

    /// Return the topmost target at a screen cell.
    ///
    pub fn hit(&self, column: u16, row: u16) -> Option<&DropTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| contains(area, column, row))
            .map(|(_, target)| target)
    }

    /// Return the card at a screen cell, ignoring column containers.
    ///
    pub fn card(&self, column: u16, row: u16) -> Option<&DropTarget> {
        self.hit(column, row).filter(|target| target.is_task())
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn contains(area: &Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fixtures::initial_sections;

    fn ids(board: &Board, column: usize) -> Vec<String> {
        board.sections()[column]
            .tasks
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    #[test]
    fn start_then_cancel_leaves_layout() {
        let mut board = Board::new(initial_sections());
        let before = board.sections().to_vec();
        apply_signal(
            &mut board,
            DragSignal::Start {
                id: "todo-add-wishlist".to_string(),
            },
        );
        assert!(board.active_task().is_some());
        apply_signal(&mut board, DragSignal::Cancel);
        assert!(board.active_task().is_none());
        assert_eq!(board.sections(), before.as_slice());
    }

    #[test]
    fn end_without_target_cancels() {
        let mut board = Board::new(initial_sections());
        let session = DragSession::new(&board, "todo-add-wishlist").unwrap();
        apply_signal(&mut board, session.start_signal());
        let mut session = session;
        session.hover(None);
        let result = apply_signal(&mut board, session.finish());
        assert!(result.is_none());
        assert!(board.active_task().is_none());
        assert_eq!(board.revision(), 0);
    }

    #[test]
    fn keyboard_cursor_moves_to_other_column_container() {
        let mut board = Board::new(initial_sections());
        let mut session = DragSession::new(&board, "todo-redesign-homepage").unwrap();
        apply_signal(&mut board, session.start_signal());
        session.cursor_right(&board);
        for _ in 0..10 {
            session.cursor_down(&board);
        }
        assert_eq!(session.slot(), 4);
        assert_eq!(session.over, Some(DropTarget::container("in-progress")));

        let result = apply_signal(&mut board, session.finish());
        assert!(result.is_some());
        assert_eq!(ids(&board, 0).len(), 3);
        assert_eq!(ids(&board, 1).last().unwrap(), "todo-redesign-homepage");
    }

    #[test]
    fn keyboard_drop_in_place_is_noop() {
        let mut board = Board::new(initial_sections());
        let session = DragSession::new(&board, "todo-optimize-checkout").unwrap();
        apply_signal(&mut board, session.start_signal());
        assert!(apply_signal(&mut board, session.finish()).is_none());
        assert_eq!(board.revision(), 0);
    }

    #[test]
    fn hit_map_prefers_cards() {
        let mut map = HitMap::default();
        map.push(Rect::new(0, 0, 20, 20), DropTarget::container("todo"));
        map.push(Rect::new(1, 1, 18, 4), DropTarget::task("a", "todo"));
        assert_eq!(map.hit(2, 2), Some(&DropTarget::task("a", "todo")));
        assert_eq!(map.hit(2, 10), Some(&DropTarget::container("todo")));
        assert_eq!(map.card(2, 10), None);
        assert_eq!(map.hit(30, 2), None);
    }
}
