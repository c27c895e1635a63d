// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::eval::Score;
use crate::moves::Move;
use crate::position::Position;

/// Knobs for a search session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum depth in plies.
    pub depth: u32,

    /// Search moves in heuristic order instead of shuffling them.
    pub move_ordering: bool,

    /// Abandon the search once this much time has passed, keeping the
    /// result of the last completed iteration.
    pub time_budget: Option<Duration>,

    /// Seed for the searcher's random source. Searches with the same seed,
    /// options and position make the same choices.
    pub seed: Option<u64>,
}

impl SearchOptions {
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SearchOptions {
    fn default() -> SearchOptions {
        SearchOptions {
            depth: 3,
            move_ordering: true,
            time_budget: None,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move, or `None` if the side to move has no legal moves.
    pub best_move: Option<Move>,

    /// The score of the position, from White's point of view.
    pub score: Score,

    /// The deepest iteration that ran to completion.
    pub depth: u32,

    pub nodes_searched: u64,

    /// Whether the search was cancelled or ran out of time.
    pub aborted: bool,
}

pub trait Searcher {
    /// Picks a move for the side to move in `pos`.
    fn search(&mut self, pos: &Position) -> SearchResult;
}
