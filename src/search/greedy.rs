// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Opponents that do not look ahead.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::eval::{BoardEvaluator, Score};
use crate::moves::Move;
use crate::position::Position;
use crate::search::{SearchOptions, SearchResult, Searcher};

/// Plays whichever move leads to the best position one ply ahead, breaking
/// ties at random. A move that mates scores as well as anything can; a move
/// that ends the game in a draw scores as an even position.
pub struct GreedySearcher<E> {
    evaluator: E,
    rng: StdRng,
}

impl<E: BoardEvaluator> GreedySearcher<E> {
    pub fn new(options: &SearchOptions) -> GreedySearcher<E> {
        GreedySearcher {
            evaluator: Default::default(),
            rng: options.rng(),
        }
    }

    fn score_after(&self, pos: &Position) -> Score {
        if pos.in_checkmate() {
            Score::mate_for(pos.side_to_move().toggle())
        } else if pos.in_draw() {
            Score::DRAW
        } else {
            self.evaluator.evaluate(pos.board())
        }
    }
}

impl<E: BoardEvaluator> Searcher for GreedySearcher<E> {
    fn search(&mut self, pos: &Position) -> SearchResult {
        let mut pos = pos.clone();
        let side = pos.side_to_move();
        let moves = pos.legal_moves();

        let mut best_score = Score::worst_for(side);
        let mut best_moves: Vec<Move> = Vec::new();
        for &mov in moves.iter() {
            let score = {
                let child = pos.scoped_move(mov);
                self.score_after(&child)
            };

            if score.is_better_for(side, best_score) {
                best_score = score;
                best_moves.clear();
            }

            if score == best_score {
                best_moves.push(mov);
            }
        }

        let best_move = best_moves.choose(&mut self.rng).cloned();
        debug!(
            "greedy: {} candidates tied at {}",
            best_moves.len(),
            best_score
        );

        SearchResult {
            best_move,
            score: if best_move.is_some() {
                best_score
            } else {
                self.score_after(&pos)
            },
            depth: 1,
            nodes_searched: moves.len() as u64,
            aborted: false,
        }
    }
}

/// Plays a uniformly random legal move.
pub struct RandomSearcher {
    rng: StdRng,
}

impl RandomSearcher {
    pub fn new(options: &SearchOptions) -> RandomSearcher {
        RandomSearcher { rng: options.rng() }
    }
}

impl Searcher for RandomSearcher {
    fn search(&mut self, pos: &Position) -> SearchResult {
        let moves = pos.legal_moves();
        SearchResult {
            best_move: moves.choose(&mut self.rng).cloned(),
            score: Score::DRAW,
            depth: 0,
            nodes_searched: moves.len() as u64,
            aborted: false,
        }
    }
}
