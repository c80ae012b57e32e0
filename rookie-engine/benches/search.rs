use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rookie_engine::coretypes::Color::*;
use rookie_engine::fen::Fen;
use rookie_engine::search;
use rookie_engine::*;

pub fn criterion_mate_in_two_ladder(c: &mut Criterion) {
    // Setup
    let board = Board::parse_fen("7k/8/8/8/8/8/R7/1R4K1 w - -").unwrap();
    let ply = 3;
    let lead = Some(White);

    // Benchmarks

    c.bench_function("mate_in_two_ladder_alpha_beta", |b| {
        b.iter(|| {
            let mut board = black_box(board);
            let result =
                search::alpha_beta(&mut board, White, black_box(ply), Evaluation::Material, None)
                    .unwrap();
            assert_eq!(result.leading(), lead);
            assert_eq!(result.score, Cp::mate_in(3));
        })
    });

    c.bench_function("mate_in_two_ladder_minimax", |b| {
        b.iter(|| {
            let mut board = black_box(board);
            let result =
                search::minimax(&mut board, White, black_box(ply), Evaluation::Material).unwrap();
            assert_eq!(result.leading(), lead);
        })
    });
}

pub fn criterion_start_position(c: &mut Criterion) {
    // Setup
    let board = Board::start_position();

    // Benchmarks

    for evaluation in [Evaluation::Material, Evaluation::MaterialMobility] {
        c.bench_function(&format!("start_position_alpha_beta(3) {evaluation:?}"), |b| {
            b.iter(|| {
                let mut board = black_box(board);
                search::alpha_beta(&mut board, White, black_box(3), evaluation, None).unwrap();
            })
        });
    }

    c.bench_function("start_position_ids(100ms)", |b| {
        b.iter(|| {
            let mut board = black_box(board);
            let result =
                search::ids(&mut board, White, Duration::from_millis(100), Evaluation::Material)
                    .unwrap();
            assert!(board.is_legal_move(result.best_move));
        })
    });
}

criterion_group! {
    name = search_benches;
    config = Criterion::default().without_plots().sample_size(10);
    targets = criterion_mate_in_two_ladder, criterion_start_position
}
criterion_main!(search_benches);
