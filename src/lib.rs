// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rules engine for chess with Archers. An Archer steps like a king but
//! never captures by moving; instead it removes an enemy piece standing on
//! one of its ten pattern squares without leaving its own square.
//!
//! The crate is organized bottom-up: `types` and `bitboard` hold the core
//! vocabulary, `attacks` the precomputed attack tables, `board` the copyable
//! piece placement with move application and attack queries, `position` the
//! history and repetition tracking on top of a board, `movegen` legal move
//! generation, `notation` FEN and SAN, `status` game termination, and
//! `search` the automated opponent. `Game` ties it all together.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate pest_derive;

pub mod attacks;
mod bitboard;
mod board;
mod error;
pub mod eval;
mod game;
mod movegen;
mod moves;
pub mod notation;
mod perft;
mod position;
pub mod search;
mod status;
mod types;
mod zobrist;

pub use bitboard::{Bitboard, BitboardIterator};
pub use board::Board;
pub use error::{Error, Result};
pub use game::{Game, VerboseMove};
pub use movegen::{MoveGenerator, MoveVec};
pub use moves::{Move, MoveFlags};
pub use notation::FenParseError;
pub use perft::perft;
pub use position::{MoveGuard, Position};
pub use status::{CheckOutcome, GameStatus, FIFTY_MOVE_HALFMOVES};
pub use types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square};

/// The Archer starting position: the c- and f-pawns of both sides are
/// replaced by Archers.
pub const START_FEN: &str = "rnbqkbnr/ppappapp/8/8/8/8/PPAPPAPP/RNBQKBNR w KQkq - 0 1";
