use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mineclear_core::*;

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialize");
    for (size, mines) in [(15, 40), (30, 180), (100, 2000), (50, 2499)] {
        let config = GameConfig::new(size, mines);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}x{size}/{mines}")),
            &config,
            |b, &config| b.iter(|| Board::initialize(black_box(config), 42)),
        );
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for size in [15u8, 64, 255] {
        // a single corner mine leaves almost the whole board to a single fill
        let layout = MineLayout::from_mine_coords(size, &[(size - 1, size - 1)])
            .expect("corner is on the board");
        let board = Board::new(layout);
        group.bench_with_input(BenchmarkId::from_parameter(size), &board, |b, board| {
            b.iter(|| {
                let mut board = board.clone();
                board.reveal(black_box((0, 0))).expect("start is on the board")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_initialize, bench_flood_fill);
criterion_main!(benches);
