//! Benchmarks for state copying and random playouts.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tabletop_engine::core::{GameConfig, Observer, PlayerId};
use tabletop_engine::games::cave::Cave;
use tabletop_engine::games::monastery::Monastery;
use tabletop_engine::rules::ForwardModel;

fn cave_copy_benchmark(c: &mut Criterion) {
    let model = ForwardModel::new(Cave::default());
    let state = model.new_state(GameConfig::new(4).with_seed(42).partially_observable());

    c.bench_function("cave_copy_full", |b| b.iter(|| black_box(state.copy(Observer::Full))));
    c.bench_function("cave_copy_redacted", |b| {
        b.iter(|| black_box(state.copy(Observer::Player(PlayerId::new(1)))))
    });
}

fn monastery_copy_benchmark(c: &mut Criterion) {
    let model = ForwardModel::new(Monastery::default());
    let state = model.new_state(GameConfig::new(4).with_seed(42).partially_observable());

    c.bench_function("monastery_copy_full", |b| b.iter(|| black_box(state.copy(Observer::Full))));
    c.bench_function("monastery_copy_redacted", |b| {
        b.iter(|| black_box(state.copy(Observer::Player(PlayerId::new(2)))))
    });
}

fn monastery_playout_benchmark(c: &mut Criterion) {
    let model = ForwardModel::new(Monastery::default());

    c.bench_function("monastery_random_playout", |b| {
        b.iter(|| {
            let mut state = model.new_state(GameConfig::new(2).with_seed(7));
            while !state.is_terminal() {
                let actions = model.compute_available_actions(&state);
                let Some(&choice) = state.rng.choose(&actions) else {
                    break;
                };
                if model.next(&mut state, &choice).is_err() {
                    break;
                }
            }
            black_box(state.turn.turn_count)
        })
    });
}

criterion_group!(benches, cave_copy_benchmark, monastery_copy_benchmark, monastery_playout_benchmark);
criterion_main!(benches);
