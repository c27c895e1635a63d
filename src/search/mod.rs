// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod greedy;
mod iterative_deepening_searcher;
mod ordering;
mod searcher;
mod transposition_table;
mod worker;

pub use greedy::{GreedySearcher, RandomSearcher};
pub use iterative_deepening_searcher::IterativeDeepeningSearcher;
pub use ordering::{order_moves, ordering_value, score_move};
pub use searcher::{SearchOptions, SearchResult, Searcher};
pub use transposition_table::{Bound, TableEntry, TableStats, TranspositionTable};
pub use worker::{spawn_search, SearchHandle};
