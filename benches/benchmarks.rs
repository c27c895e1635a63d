// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use archerss::attacks;
use archerss::eval::MaterialEvaluator;
use archerss::search::{IterativeDeepeningSearcher, SearchOptions, Searcher};
use archerss::{perft, Board, MoveGenerator, MoveVec, Position, Square};
use criterion::black_box;
use criterion::Criterion;

const MIDDLEGAME_FEN: &str = "r1bqkb1r/ppap1ppp/2n2n2/4p3/2A1P3/5N2/PP1P1APP/RNBQKB1R w KQkq - 0 5";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("archer attacks e4", |b| {
        b.iter(|| attacks::archer_attacks(black_box(Square::E4)))
    });

    c.bench_function("board copy", |b| {
        let board = Board::from_start_position();
        b.iter(|| *black_box(&board))
    });

    c.bench_function("generate moves start", |b| {
        let board = Board::from_start_position();
        b.iter(|| {
            let mut vec = MoveVec::default();
            let gen = MoveGenerator::new();
            gen.generate_moves(black_box(&board), &mut vec);
        });
    });

    c.bench_function("legal moves middlegame", |b| {
        let board = Board::from_fen(MIDDLEGAME_FEN).unwrap();
        b.iter(|| MoveGenerator::new().legal_moves(black_box(&board)))
    });

    c.bench_function("perft 3 start", |b| {
        let board = Board::from_start_position();
        b.iter(|| perft(black_box(&board), 3))
    });

    c.bench_function("search depth 3 middlegame", |b| {
        let pos = Position::from_fen(MIDDLEGAME_FEN).unwrap();
        b.iter(|| {
            let options = SearchOptions {
                depth: 3,
                seed: Some(1),
                ..Default::default()
            };
            let mut searcher: IterativeDeepeningSearcher<MaterialEvaluator> =
                IterativeDeepeningSearcher::new(options);
            searcher.search(black_box(&pos))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
