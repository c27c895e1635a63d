// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use thiserror::Error;

use crate::notation::FenParseError;

/// Errors surfaced to callers of the engine. None of these leave a position
/// or game half-modified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid board diagram: {0}")]
    InvalidDiagram(#[from] FenParseError),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid placement: {0}")]
    InvalidPlacement(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
