use criterion::{Criterion, criterion_group, criterion_main};
use saper_core::*;
use std::hint::black_box;

fn open_board(c: &mut Criterion) {
    let layout = MineLayout::from_mine_coords((255, 255), &[(0, 0)]).unwrap();

    c.bench_function("flood_fill_255x255", |b| {
        b.iter(|| {
            let mut engine = PlayEngine::with_layout(layout.clone());
            black_box(engine.reveal(black_box((254, 254))).unwrap())
        })
    });
}

fn seeded_placement(c: &mut Criterion) {
    let config = GameConfig::new((30, 16), 99, true).unwrap();

    c.bench_function("place_mines_expert", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(RandomMinefieldGenerator::new(seed, Some((15, 8))).generate(&config))
        })
    });

    let dense = GameConfig::new((255, 255), 65024, true).unwrap();
    c.bench_function("place_mines_dense", |b| {
        b.iter(|| black_box(RandomMinefieldGenerator::new(7, Some((0, 0))).generate(&dense)))
    });
}

criterion_group!(benches, open_board, seeded_placement);
criterion_main!(benches);
