// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Running a search off the calling thread, so that a caller can keep
//! responding and cancel the search when it is no longer wanted.
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

use crate::eval::MaterialEvaluator;
use crate::position::Position;
use crate::search::{IterativeDeepeningSearcher, SearchOptions, SearchResult, Searcher};

/// A search running on its own thread.
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<SearchResult>,
}

impl SearchHandle {
    /// Asks the search to stop. The result of the deepest completed
    /// iteration is still delivered by `join`.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Waits for the search to finish and returns its result.
    pub fn join(self) -> SearchResult {
        match self.thread.join() {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

/// Starts a minimax search of a copy of `pos` on a new thread.
pub fn spawn_search(pos: &Position, options: SearchOptions) -> io::Result<SearchHandle> {
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = stop.clone();
    let pos = pos.clone();
    let thread = Builder::new()
        .name("search-main".to_owned())
        .spawn(move || {
            info!("starting search thread, depth {}", options.depth);
            let mut searcher: IterativeDeepeningSearcher<MaterialEvaluator> =
                IterativeDeepeningSearcher::with_stop_flag(options, thread_stop);
            let result = searcher.search(&pos);
            info!(
                "search thread reports {:?} (score: {})",
                result.best_move.map(|m| m.to_string()),
                result.score
            );
            result
        })?;

    Ok(SearchHandle { stop, thread })
}

#[cfg(test)]
mod tests {
    use super::spawn_search;
    use crate::eval::Score;
    use crate::position::Position;
    use crate::search::SearchOptions;
    use crate::types::Square;

    #[test]
    fn runs_to_completion() {
        let pos =
            Position::from_fen("rnb1kbnr/pppppppp/8/8/8/7q/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let options = SearchOptions {
            depth: 2,
            seed: Some(3),
            ..Default::default()
        };
        let result = spawn_search(&pos, options).unwrap().join();
        assert_eq!(Square::H3, result.best_move.unwrap().destination());
        assert_eq!(2, result.depth);
        assert!(!result.aborted);
    }

    #[test]
    fn cancel_still_delivers_a_move() {
        let pos = Position::from_start_position();
        let options = SearchOptions {
            depth: 64,
            seed: Some(3),
            ..Default::default()
        };
        let handle = spawn_search(&pos, options).unwrap();
        handle.cancel();
        let result = handle.join();
        assert!(result.aborted);
        assert!(result.best_move.is_some());
        assert!(result.score.value().abs() < Score::MATE.value());
    }
}
