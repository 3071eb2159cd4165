use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrion::core::{get_shape, Board, GameState, Position};
use tetrion::types::{Color, GameAction, PieceKind};

fn bench_step_tick(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("step_tick", |b| {
        b.iter(|| black_box(state).step(GameAction::Tick))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("step_hard_drop", |b| {
        b.iter(|| black_box(state).step(GameAction::HardDrop))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new();
    for y in 16..20 {
        for x in 0..10 {
            board.set(x, y, Color::new(1));
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| black_box(&board).clear_lines())
    });
}

fn bench_can_move(c: &mut Criterion) {
    let board = Board::new();
    let shape = get_shape(PieceKind::T);

    c.bench_function("can_move", |b| {
        b.iter(|| board.can_move(black_box(&shape), black_box(Position::new(4, 10))))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("snapshot", |b| b.iter(|| black_box(&state).snapshot()));
}

criterion_group!(
    benches,
    bench_step_tick,
    bench_hard_drop,
    bench_line_clear,
    bench_can_move,
    bench_snapshot
);
criterion_main!(benches);
