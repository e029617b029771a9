use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_2048::core::{
    available_moves, create_new_game, move_tiles, spawn_random_tile, to_snapshot,
    update_status_and_best, GameState, SimpleRng,
};
use tui_2048::storage::{decode_snapshot, encode_snapshot};
use tui_2048::term::{FrameBuffer, GameView, Viewport};
use tui_2048::types::Direction;

fn busy_board() -> GameState {
    GameState::from_values(
        4,
        &[2, 2, 4, 8, 16, 0, 16, 4, 2, 4, 0, 8, 128, 128, 64, 2],
    )
}

fn bench_new_game(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("create_new_game_4x4", |b| {
        b.iter(|| create_new_game(black_box(4), 0, 1, &mut rng))
    });
}

fn bench_move(c: &mut Criterion) {
    let state = busy_board();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("move_left_busy_board", |b| {
        b.iter(|| move_tiles(black_box(&state), Direction::Left, &mut rng))
    });
}

fn bench_spawn(c: &mut Criterion) {
    let state = busy_board();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("spawn_random_tile", |b| {
        b.iter(|| spawn_random_tile(black_box(&state), &mut rng))
    });
}

fn bench_status(c: &mut Criterion) {
    let state = busy_board();

    c.bench_function("update_status_and_best", |b| {
        b.iter(|| update_status_and_best(black_box(&state)))
    });
    c.bench_function("available_moves", |b| {
        b.iter(|| available_moves(black_box(&state)))
    });
}

fn bench_random_game(c: &mut Criterion) {
    c.bench_function("random_game_200_moves", |b| {
        b.iter(|| {
            let mut rng = SimpleRng::new(7);
            let mut state = create_new_game(4, 0, 1, &mut rng);
            for i in 0..200usize {
                let dir = Direction::ALL[i % 4];
                state = move_tiles(&state, dir, &mut rng).unwrap_or(state);
            }
            state
        })
    });
}

fn bench_snapshot_json(c: &mut Criterion) {
    let snap = to_snapshot(&busy_board());
    let json = encode_snapshot(&snap).unwrap();

    c.bench_function("encode_snapshot", |b| {
        b.iter(|| encode_snapshot(black_box(&snap)))
    });
    c.bench_function("decode_snapshot", |b| {
        b.iter(|| decode_snapshot(black_box(&json)))
    });
}

fn bench_render(c: &mut Criterion) {
    let state = busy_board();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_into_80x24", |b| {
        b.iter(|| view.render_into(black_box(&state), vp, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_new_game,
    bench_move,
    bench_spawn,
    bench_status,
    bench_random_game,
    bench_snapshot_json,
    bench_render
);
criterion_main!(benches);
