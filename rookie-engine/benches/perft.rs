use std::thread::available_parallelism;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rookie_engine::fen::Fen;
use rookie_engine::perft::*;
use rookie_engine::*;

fn perft_bench(c: &mut Criterion, name: &str, board: Board, ply: u8, threads: usize, nodes: u64) {
    c.bench_function(&format!("{name}: perft({ply}) threads: {threads}"), |b| {
        b.iter(|| {
            let info = perft(black_box(board), black_box(ply), black_box(threads));
            assert_eq!(info.nodes, nodes);
        })
    });
}

pub fn criterion_perft_small_benchmark(c: &mut Criterion) {
    // Setup
    let starting_position = Board::start_position();
    let num_threads = available_parallelism()
        .map(|inner| inner.get())
        .unwrap_or(1);

    // Benchmarks

    for (ply, nodes) in [(1, 20), (2, 400), (3, 8_902)] {
        perft_bench(c, "start_position", starting_position, ply, 1, nodes);
        perft_bench(c, "start_position", starting_position, ply, num_threads, nodes);
    }
}

/// Positions with castling, en passant and pins, over 100,000 leaves each.
pub fn criterion_perft_large_benchmark(c: &mut Criterion) {
    // Setup
    let starting_position = Board::start_position();
    let kiwipete =
        Board::parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let num_threads = available_parallelism()
        .map(|inner| inner.get())
        .unwrap_or(1);

    perft_bench(c, "start_position", starting_position, 4, num_threads, 197_281);
    perft_bench(c, "kiwipete", kiwipete, 3, num_threads, 97_862);
}

criterion_group! {
    name = small_benches;
    config = Criterion::default().without_plots().sample_size(50);
    targets = criterion_perft_small_benchmark
}
criterion_group! {
    name = large_benches;
    config = Criterion::default().without_plots().sample_size(10);
    targets = criterion_perft_large_benchmark
}
criterion_main!(small_benches, large_benches);
