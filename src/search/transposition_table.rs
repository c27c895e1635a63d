// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use hashbrown::HashMap;

use crate::eval::Score;
use crate::moves::Move;

/// How a stored score relates to the true minimax value of its node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact value of the node.
    Exact,

    /// The search failed high; the true value is at least the score.
    Lower,

    /// The search failed low; the true value is at most the score.
    Upper,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableEntry {
    pub zobrist_key: u64,
    pub best_move: Option<Move>,
    pub depth: u32,
    pub score: Score,
    pub bound: Bound,
}

impl TableEntry {
    /// Whether this entry's score can stand in for a search of the node
    /// with the window `(alpha, beta)`.
    pub fn is_usable(&self, alpha: Score, beta: Score) -> bool {
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
}

/// Position cache owned by a single searcher, keyed by board signature.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    table: HashMap<u64, TableEntry>,
    stats: TableStats,
}

impl TranspositionTable {
    pub fn new() -> TranspositionTable {
        TranspositionTable {
            table: HashMap::new(),
            stats: TableStats::default(),
        }
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Whether `key` has an entry. Unlike `query`, this does not count as a
    /// hit or a miss.
    pub fn contains(&self, key: u64) -> bool {
        self.table.contains_key(&key)
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.stats = TableStats::default();
    }

    pub fn query(&mut self, key: u64) -> Option<TableEntry> {
        let entry = self.table.get(&key).cloned();
        if entry.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }

        entry
    }

    pub fn record(
        &mut self,
        key: u64,
        best_move: Option<Move>,
        depth: u32,
        score: Score,
        bound: Bound,
    ) {
        self.stats.stores += 1;
        self.table.insert(
            key,
            TableEntry {
                zobrist_key: key,
                best_move,
                depth,
                score,
                bound,
            },
        );
    }
}
