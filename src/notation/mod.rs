// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Text encodings of boards and moves: board diagrams (FEN extended with the
//! `A`/`a` archer letters) and move notation (SAN extended with `*` for
//! ranged attacks, plus coordinate notation on input).
mod fen;
mod san;

pub use fen::FenParseError;
