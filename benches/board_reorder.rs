//! Benchmarks for board mutations.
//!
//! These benchmarks measure drag-and-drop moves and rollback on a seeded board.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use workspace_board::board::{
    drag::{DragData, DropTarget},
    fixtures::initial_sections,
    Board,
};

fn bench_cross_section_move(c: &mut Criterion) {
    let board = Board::new(initial_sections());
    let data = DragData::Task {
        section_id: "todo".to_string(),
    };
    let over = DropTarget::container("in-progress");

    c.bench_function("board_cross_section_move", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| {
                board.end_drag(black_box("todo-redesign-homepage"), Some(&data), Some(&over))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_move_and_rollback(c: &mut Criterion) {
    let board = Board::new(initial_sections());
    let data = DragData::Task {
        section_id: "todo".to_string(),
    };
    let over = DropTarget::task("in-progress-stripe", "in-progress");

    c.bench_function("board_move_then_rollback", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| {
                if let Some((mutation, _)) =
                    board.end_drag("todo-redesign-homepage", Some(&data), Some(&over))
                {
                    let _ = board.rollback(black_box(mutation));
                }
                board
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_reorder_payload(c: &mut Criterion) {
    let board = Board::new(initial_sections());
    c.bench_function("board_reorder_payload", |b| b.iter(|| black_box(&board).reorder_payload()));
}

criterion_group!(
    benches,
    bench_cross_section_move,
    bench_move_and_rollback,
    bench_reorder_payload
);
criterion_main!(benches);
