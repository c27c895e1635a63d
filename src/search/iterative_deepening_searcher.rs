// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::eval::{BoardEvaluator, Score};
use crate::movegen::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::position::Position;
use crate::search::ordering;
use crate::search::{Bound, SearchOptions, SearchResult, Searcher, TranspositionTable};
use crate::types::Color;

/// The stop flag and clock are consulted once per this many nodes.
const CHECK_INTERVAL: u64 = 1024;

/// Minimax with alpha-beta pruning, run at increasing depths until the
/// requested depth is reached or the search is stopped. White maximizes and
/// Black minimizes.
///
/// The position cache lives as long as the searcher, so repeated searches
/// from the same searcher reuse earlier work.
pub struct IterativeDeepeningSearcher<E> {
    evaluator: E,
    ttable: TranspositionTable,
    options: SearchOptions,
    rng: StdRng,
    stop: Arc<AtomicBool>,
}

impl<E: BoardEvaluator> IterativeDeepeningSearcher<E> {
    pub fn new(options: SearchOptions) -> IterativeDeepeningSearcher<E> {
        IterativeDeepeningSearcher::with_stop_flag(options, Arc::new(AtomicBool::new(false)))
    }

    /// Creates a searcher that abandons its search once `stop` is set.
    pub fn with_stop_flag(
        options: SearchOptions,
        stop: Arc<AtomicBool>,
    ) -> IterativeDeepeningSearcher<E> {
        IterativeDeepeningSearcher {
            evaluator: Default::default(),
            ttable: TranspositionTable::new(),
            rng: options.rng(),
            options,
            stop,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Changes the options of later searches. The cache is kept.
    pub fn options_mut(&mut self) -> &mut SearchOptions {
        &mut self.options
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.ttable
    }

    /// Forgets every cached position.
    pub fn clear(&mut self) {
        self.ttable.clear();
    }
}

impl<E: BoardEvaluator> Searcher for IterativeDeepeningSearcher<E> {
    fn search(&mut self, pos: &Position) -> SearchResult {
        let mut pos = pos.clone();
        let mut search = IterativeSearch::new(self);
        search.search(&mut pos)
    }
}

impl<E: BoardEvaluator> Default for IterativeDeepeningSearcher<E> {
    fn default() -> IterativeDeepeningSearcher<E> {
        IterativeDeepeningSearcher::new(SearchOptions::default())
    }
}

struct IterativeSearch<'a, E> {
    searcher: &'a mut IterativeDeepeningSearcher<E>,
    start_time: Instant,
    nodes: u64,
    aborted: bool,
    /// Draws reached by the fifty-move rule or by repetition so far. Both
    /// depend on more than the board signature, so a node whose subtree
    /// reached one is not cached.
    history_draws: u64,
}

impl<'a, E: BoardEvaluator> IterativeSearch<'a, E> {
    fn new(searcher: &'a mut IterativeDeepeningSearcher<E>) -> IterativeSearch<'a, E> {
        IterativeSearch {
            searcher,
            start_time: Instant::now(),
            nodes: 0,
            aborted: false,
            history_draws: 0,
        }
    }

    fn search(&mut self, pos: &mut Position) -> SearchResult {
        let max_depth = cmp::max(self.searcher.options.depth, 1);
        let mut result = SearchResult {
            best_move: None,
            score: self.evaluate(pos),
            depth: 0,
            nodes_searched: 0,
            aborted: false,
        };

        for depth in 1..=max_depth {
            debug!("beginning search of depth {}", depth);
            let (best_move, score) = self.minimax(pos, depth, 0, Score::MIN, Score::MAX);
            if self.aborted {
                info!("search stopped during depth {}", depth);
                if result.best_move.is_none() {
                    // Nothing completed; a partial answer beats no answer.
                    result.best_move = best_move.or_else(|| pos.legal_moves().first().cloned());
                }

                break;
            }

            result.best_move = best_move;
            result.score = score;
            result.depth = depth;
            info!(
                "depth {}: best move {} score {} ({} nodes)",
                depth,
                best_move.map_or_else(|| "(none)".to_owned(), |m| m.to_string()),
                score,
                self.nodes
            );

            if best_move.is_none() {
                // Mate or stalemate at the root; deeper searches see the same.
                break;
            }
        }

        let stats = self.searcher.ttable.stats();
        debug!(
            "cache: {} hits, {} misses, {} stores, {} entries",
            stats.hits,
            stats.misses,
            stats.stores,
            self.searcher.ttable.len()
        );

        result.nodes_searched = self.nodes;
        result.aborted = self.aborted;
        result
    }

    /// Searches `pos` to `depth` plies inside the window `(alpha, beta)`,
    /// returning the best move found (if the node was expanded) and its
    /// score. `ply` is the distance from the root.
    fn minimax(
        &mut self,
        pos: &mut Position,
        depth: u32,
        ply: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> (Option<Move>, Score) {
        self.nodes += 1;
        if self.nodes % CHECK_INTERVAL == 0 && self.should_stop() {
            self.aborted = true;
        }

        if self.aborted {
            return (None, Score::DRAW);
        }

        // The halfmove clock and the path are not part of the signature, so
        // these draws are decided before the cache is consulted and never
        // stored.
        if let Some(score) = self.history_draw_score(pos) {
            self.history_draws += 1;
            return (None, score);
        }

        // The cache serves two purposes:
        //   1. If it holds a search of this position at least as deep as this
        //      one, whose bound is usable with the current window, that result
        //      stands in for the search entirely.
        //   2. Otherwise its best move is a good first guess for this search.
        // The root must answer with a move, so a moveless entry is not enough
        // there.
        let key = pos.zobrist_hash();
        let hash_move = match self.searcher.ttable.query(key) {
            Some(entry)
                if entry.depth >= depth
                    && entry.is_usable(alpha, beta)
                    && (ply > 0 || entry.best_move.is_some()) =>
            {
                debug!("cache hit at depth {}: {:?}", depth, entry);
                return (entry.best_move, entry.score);
            }
            Some(entry) => entry.best_move,
            None => None,
        };

        if let Some(score) = self.terminal_score(pos) {
            self.searcher
                .ttable
                .record(key, None, depth, score, Bound::Exact);
            return (None, score);
        }

        if depth == 0 {
            let score = self.evaluate(pos);
            self.searcher
                .ttable
                .record(key, None, depth, score, Bound::Exact);
            return (None, score);
        }

        let side = pos.side_to_move();
        let mut moves = pos.legal_moves();
        self.order_moves(pos, &mut moves, hash_move);

        let (alpha_orig, beta_orig) = (alpha, beta);
        let history_draws = self.history_draws;
        let mut best_move = None;
        let mut best_score = Score::worst_for(side);
        for mov in moves {
            let (_, score) = {
                let mut child = pos.scoped_move(mov);
                self.minimax(&mut child, depth - 1, ply + 1, alpha, beta)
            };

            if self.aborted {
                break;
            }

            if best_move.is_none() || score.is_better_for(side, best_score) {
                best_move = Some(mov);
                best_score = score;
            }

            match side {
                Color::White => alpha = cmp::max(alpha, score),
                Color::Black => beta = cmp::min(beta, score),
            }

            if beta <= alpha {
                break;
            }
        }

        if !self.aborted && self.history_draws == history_draws {
            let bound = if best_score <= alpha_orig {
                Bound::Upper
            } else if best_score >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };

            self.searcher
                .ttable
                .record(key, best_move, depth, best_score, bound);
        }

        (best_move, best_score)
    }

    /// The score of a position the board alone declares over: a mate scores
    /// in favor of the mating side, and stalemate or insufficient material
    /// gets the static evaluation.
    fn terminal_score(&self, pos: &Position) -> Option<Score> {
        let board = pos.board();
        if !MoveGenerator::new().has_legal_move(board) {
            if board.in_check() {
                return Some(Score::mate_for(board.side_to_move().toggle()));
            }

            return Some(self.evaluate(pos));
        }

        if board.insufficient_material() {
            return Some(self.evaluate(pos));
        }

        None
    }

    /// The static evaluation of a position drawn by the fifty-move rule or
    /// by threefold repetition. A position without legal moves is left to
    /// `terminal_score`, since mate outranks these draws.
    fn history_draw_score(&self, pos: &Position) -> Option<Score> {
        let board = pos.board();
        if (board.fifty_move_rule() || pos.in_threefold_repetition())
            && MoveGenerator::new().has_legal_move(board)
        {
            return Some(self.evaluate(pos));
        }

        None
    }

    fn order_moves(&mut self, pos: &Position, moves: &mut MoveVec, hash_move: Option<Move>) {
        if self.searcher.options.move_ordering {
            ordering::order_moves(pos.board(), moves);
        } else {
            moves.shuffle(&mut self.searcher.rng);
        }

        if let Some(hash_move) = hash_move {
            if let Some(idx) = moves.iter().position(|&m| m == hash_move) {
                moves[..=idx].rotate_right(1);
            }
        }
    }

    fn evaluate(&self, pos: &Position) -> Score {
        self.searcher.evaluator.evaluate(pos.board())
    }

    fn should_stop(&self) -> bool {
        if self.searcher.stop.load(Ordering::Relaxed) {
            return true;
        }

        match self.searcher.options.time_budget {
            Some(budget) => self.start_time.elapsed() > budget,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use super::IterativeDeepeningSearcher;
    use crate::eval::{MaterialEvaluator, Score};
    use crate::moves::Move;
    use crate::position::Position;
    use crate::search::{SearchOptions, Searcher};
    use crate::types::{Color, Square};

    fn options(depth: u32, move_ordering: bool) -> SearchOptions {
        SearchOptions {
            depth,
            move_ordering,
            time_budget: None,
            seed: Some(7),
        }
    }

    fn searcher(depth: u32, move_ordering: bool) -> IterativeDeepeningSearcher<MaterialEvaluator> {
        IterativeDeepeningSearcher::new(options(depth, move_ordering))
    }

    fn find_move(pos: &Position, from: Square, to: Square) -> Move {
        pos.legal_moves()
            .iter()
            .find(|m| m.source() == from && m.destination() == to)
            .cloned()
            .unwrap()
    }

    #[test]
    fn start_position_is_even() {
        let pos = Position::from_start_position();
        let result = searcher(2, true).search(&pos);
        assert_eq!(Score::new(0), result.score);
        assert!(result.best_move.is_some());
        assert_eq!(2, result.depth);
        assert!(!result.aborted);
    }

    #[test]
    fn takes_hanging_queen() {
        let pos =
            Position::from_fen("rnb1kbnr/pppppppp/8/8/8/7q/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        for &ordering in &[true, false] {
            let result = searcher(2, ordering).search(&pos);
            let best = result.best_move.unwrap();
            assert_eq!(Square::H3, best.destination());
            assert!(best.is_capture());
        }
    }

    #[test]
    fn finds_mate_in_one() {
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let result = searcher(3, true).search(&pos);
        assert_eq!(Square::A8, result.best_move.unwrap().destination());
        assert_eq!(Score::MATE, result.score);
    }

    #[test]
    fn black_minimizes() {
        let pos = Position::from_fen("3rk3/8/8/8/8/8/3Q4/4K3 b - - 0 1").unwrap();
        let result = searcher(1, true).search(&pos);
        assert_eq!(Square::D2, result.best_move.unwrap().destination());
        assert!(result.score < Score::new(0));
    }

    #[test]
    fn mated_side_has_no_move() {
        let pos = Position::from_fen("6Ak/5Qpp/8/8/8/8/8/K7 b - - 0 1").unwrap();
        let result = searcher(3, true).search(&pos);
        assert_eq!(None, result.best_move);
        assert_eq!(Score::mate_for(Color::White), result.score);
    }

    #[test]
    fn cache_is_reused_across_searches() {
        let pos = Position::from_start_position();
        let mut searcher = searcher(2, true);
        let first = searcher.search(&pos);
        assert!(!searcher.table().is_empty());
        let second = searcher.search(&pos);
        assert!(second.nodes_searched < first.nodes_searched);
        assert_eq!(first.score, second.score);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let pos = Position::from_start_position();
        let first = searcher(2, false).search(&pos);
        let second = searcher(2, false).search(&pos);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.nodes_searched, second.nodes_searched);
    }

    #[test]
    fn stop_flag_aborts_with_a_move() {
        let pos = Position::from_start_position();
        let stop = Arc::new(AtomicBool::new(true));
        let mut searcher: IterativeDeepeningSearcher<MaterialEvaluator> =
            IterativeDeepeningSearcher::with_stop_flag(options(6, false), stop);
        let result = searcher.search(&pos);
        assert!(result.aborted);
        assert!(result.best_move.is_some());
        assert!(result.nodes_searched <= 1024);
    }

    #[test]
    fn fifty_move_draw_does_not_leak_into_later_searches() {
        let mut searcher = searcher(2, true);
        let drawn = Position::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 100 80").unwrap();
        let result = searcher.search(&drawn);
        assert_eq!(None, result.best_move);
        assert!(!searcher.table().contains(drawn.zobrist_hash()));

        // Same signature, fresh clock.
        let live = Position::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 0 80").unwrap();
        assert_eq!(drawn.zobrist_hash(), live.zobrist_hash());
        let best = searcher.search(&live).best_move.unwrap();
        assert!(live.legal_moves().contains(&best));
    }

    #[test]
    fn repetition_keeps_parent_out_of_cache() {
        let mut pos = Position::from_fen("r3k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let shuffle = [
            (Square::A1, Square::A2),
            (Square::A8, Square::A7),
            (Square::A2, Square::A1),
            (Square::A7, Square::A8),
        ];

        // Cycle once and a half so that Ra8 from the final position repeats
        // the starting diagram a third time.
        for &(from, to) in shuffle.iter().chain(shuffle[..3].iter()) {
            let mov = find_move(&pos, from, to);
            pos.apply_move(mov);
        }
        assert_eq!(2, pos.repetition_count());

        let repeat = find_move(&pos, Square::A7, Square::A8);
        let repeated_key = {
            let child = pos.scoped_move(repeat);
            assert!(child.in_threefold_repetition());
            child.zobrist_hash()
        };

        let mut searcher = searcher(1, true);
        let result = searcher.search(&pos);
        assert!(pos.legal_moves().contains(&result.best_move.unwrap()));
        assert!(!searcher.table().contains(repeated_key));
        assert!(!searcher.table().contains(pos.zobrist_hash()));
        assert!(!searcher.table().is_empty());
    }

    #[test]
    fn search_leaves_position_alone() {
        let pos = Position::from_start_position();
        let before = pos.as_fen();
        searcher(2, false).search(&pos);
        assert_eq!(before, pos.as_fen());
    }
}
