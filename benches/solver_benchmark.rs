//! Benchmarks for the solver and the move engine.
//!
//! The solver's inner loop (slide, apply, undo) is the hot path.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use ricochet::{Color, Deal, SolverConfig, assemble_board, moves, solve};

fn bench_assemble(c: &mut Criterion) {
    c.bench_function("assemble_board", |b| {
        b.iter(|| black_box(assemble_board(black_box(7))));
    });
}

fn bench_move_generation(c: &mut Criterion) {
    let deal = Deal::canonical(3);
    let state = deal.puzzle.initial_state();
    let board = deal.puzzle.board();

    c.bench_function("moves_all_robots", |b| {
        b.iter(|| black_box(moves(board, black_box(&state), &Color::ALL)));
    });
}

fn bench_solve_canonical(c: &mut Criterion) {
    let config = SolverConfig { max_depth: 6 };
    let puzzles: Vec<_> = (0..8).map(|seed| Deal::canonical(seed).puzzle).collect();

    let mut group = c.benchmark_group("solve");
    group.sample_size(10);
    group.bench_function("canonical_8_seeds", |b| {
        b.iter(|| {
            for puzzle in &puzzles {
                let _ = black_box(solve(black_box(puzzle), &config, None));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_assemble, bench_move_generation, bench_solve_canonical);
criterion_main!(benches);
