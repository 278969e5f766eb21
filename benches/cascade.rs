use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tilerise::core::{find_match, GameState, SimpleRng};
use tilerise::types::{Difficulty, Direction, GameSettings, GameSpeed};

fn bench_init(c: &mut Criterion) {
    let settings = GameSettings::new(6, 12, GameSpeed::Normal, Difficulty::Hard);
    let mut seed = 0u32;

    c.bench_function("init_hard", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            GameState::init(black_box(settings), seed)
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let settings = GameSettings::new(6, 12, GameSpeed::Fast, Difficulty::Normal);
    let mut game = GameState::init(settings, 12345).unwrap();

    c.bench_function("headless_tick", |b| {
        b.iter(|| {
            if game.game_over() {
                game = GameState::init(settings, 12345).unwrap();
            }
            game.tick();
            game.drain_events();
        })
    });
}

fn bench_swap_and_tick(c: &mut Criterion) {
    let settings = GameSettings::new(6, 12, GameSpeed::Fast, Difficulty::Hard);
    let mut game = GameState::init(settings, 777).unwrap();
    let mut rng = SimpleRng::new(777);

    c.bench_function("random_swap_then_tick", |b| {
        b.iter(|| {
            if game.game_over() {
                game = GameState::init(settings, 777).unwrap();
            }
            let x = rng.next_range(6) as usize;
            let y = rng.next_range(12) as usize;
            game.swap_at(x, y, Direction::Right);
            game.tick();
            game.drain_events();
        })
    });
}

fn bench_find_match(c: &mut Criterion) {
    let settings = GameSettings::new(6, 12, GameSpeed::Normal, Difficulty::Hard);
    let game = GameState::init(settings, 42).unwrap();
    let grid = game.grid();

    c.bench_function("find_match_full_scan", |b| {
        b.iter(|| {
            grid.iter()
                .filter(|&(x, y, _)| find_match(black_box(grid), x, y).is_some())
                .count()
        })
    });
}

criterion_group!(
    benches,
    bench_init,
    bench_tick,
    bench_swap_and_tick,
    bench_find_match
);
criterion_main!(benches);
