use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tapsweep_core::*;

fn bench_cascade(c: &mut Criterion) {
    let config = GameConfig::new(16, 30, 1).unwrap();
    let placer = FixedMinePlacer::new(config, &[(15, 29)]).unwrap();

    c.bench_function("cascade_open_board", |b| {
        b.iter_batched(
            || GameEngine::new(config, GameMode::Classic, placer.clone()),
            |mut engine| {
                engine.reveal(black_box((0, 0)), 0);
                engine
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_random_first_reveal(c: &mut Criterion) {
    let config = Difficulty::Hard.config();

    c.bench_function("hard_first_reveal", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut engine = GameEngine::new(config, GameMode::Classic, RandomMinePlacer::new(seed));
            engine.reveal(black_box((8, 15)), 0);
            engine.cells_revealed()
        })
    });
}

criterion_group!(benches, bench_cascade, bench_random_first_reveal);
criterion_main!(benches);
