// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::{BoardEvaluator, Score};
use crate::types::{Color, PieceKind, PIECE_KINDS};

const PAWN_WEIGHT: i32 = 10;
const ARCHER_WEIGHT: i32 = 20;
const KNIGHT_WEIGHT: i32 = 30;
const BISHOP_WEIGHT: i32 = 30;
const ROOK_WEIGHT: i32 = 50;
const QUEEN_WEIGHT: i32 = 90;
const KING_WEIGHT: i32 = 900;

/// The material value of one piece of the given kind.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_WEIGHT,
        PieceKind::Archer => ARCHER_WEIGHT,
        PieceKind::Knight => KNIGHT_WEIGHT,
        PieceKind::Bishop => BISHOP_WEIGHT,
        PieceKind::Rook => ROOK_WEIGHT,
        PieceKind::Queen => QUEEN_WEIGHT,
        PieceKind::King => KING_WEIGHT,
    }
}

/// Counts material and nothing else.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> Score {
        let total = PIECE_KINDS
            .iter()
            .map(|&kind| {
                let white = board.pieces_of_kind(Color::White, kind).count() as i32;
                let black = board.pieces_of_kind(Color::Black, kind).count() as i32;
                piece_value(kind) * (white - black)
            })
            .sum();

        Score::new(total)
    }
}
