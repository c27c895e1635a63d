// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Game termination. Checks, mates and material draws depend only on the
//! board; repetition depends on the path, so the full classification lives
//! on `Position`.
use crate::bitboard::BB_LIGHT_SQUARES;
use crate::board::Board;
use crate::movegen::MoveGenerator;
use crate::moves::Move;
use crate::position::Position;
use crate::types::Color;

/// Number of halfmoves without a capture or pawn move after which the game
/// is drawn.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    pub fn is_draw(self) -> bool {
        match self {
            GameStatus::Ongoing | GameStatus::Checkmate { .. } => false,
            _ => true,
        }
    }
}

/// What a move does to the opposing king.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    None,
    Check,
    Checkmate,
}

impl Board {
    pub fn in_check(&self) -> bool {
        self.is_check(self.side_to_move())
    }

    pub fn in_checkmate(&self) -> bool {
        self.in_check() && !MoveGenerator::new().has_legal_move(self)
    }

    pub fn in_stalemate(&self) -> bool {
        !self.in_check() && !MoveGenerator::new().has_legal_move(self)
    }

    /// Neither side has enough material to deliver mate: bare kings, a king
    /// and one minor piece against a king, or kings and bishops that all
    /// stand on squares of one color.
    pub fn insufficient_material(&self) -> bool {
        let mut bishops = 0;
        let mut knights = 0;
        for &color in &[Color::White, Color::Black] {
            let heavy = self.pawns(color)
                | self.rooks(color)
                | self.queens(color)
                | self.archers(color);
            if !heavy.empty() {
                return false;
            }

            bishops += self.bishops(color).count();
            knights += self.knights(color).count();
        }

        if bishops + knights <= 1 {
            return true;
        }

        if knights > 0 {
            return false;
        }

        let all_bishops = self.bishops(Color::White) | self.bishops(Color::Black);
        let light = (all_bishops & BB_LIGHT_SQUARES).count();
        light == 0 || light == all_bishops.count()
    }

    pub fn fifty_move_rule(&self) -> bool {
        self.halfmove_clock() >= FIFTY_MOVE_HALFMOVES
    }

    /// Whether `mov`, a legal move on this board, checks or mates the
    /// opponent.
    pub fn check_outcome(&self, mov: Move) -> CheckOutcome {
        let mut next = *self;
        next.apply_move(mov);
        if !next.in_check() {
            CheckOutcome::None
        } else if MoveGenerator::new().has_legal_move(&next) {
            CheckOutcome::Check
        } else {
            CheckOutcome::Checkmate
        }
    }
}

impl Position {
    pub fn in_check(&self) -> bool {
        self.board().in_check()
    }

    pub fn in_checkmate(&self) -> bool {
        self.board().in_checkmate()
    }

    pub fn in_stalemate(&self) -> bool {
        self.board().in_stalemate()
    }

    pub fn insufficient_material(&self) -> bool {
        self.board().insufficient_material()
    }

    pub fn in_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn in_draw(&self) -> bool {
        self.board().fifty_move_rule()
            || self.in_stalemate()
            || self.insufficient_material()
            || self.in_threefold_repetition()
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_over()
    }

    /// Classifies the position. Mate and stalemate take precedence over the
    /// draw rules, since a mate delivered on the hundredth halfmove still
    /// stands.
    pub fn status(&self) -> GameStatus {
        let board = self.board();
        if !MoveGenerator::new().has_legal_move(board) {
            return if board.in_check() {
                GameStatus::Checkmate {
                    winner: board.side_to_move().toggle(),
                }
            } else {
                GameStatus::Stalemate
            };
        }

        if board.fifty_move_rule() {
            GameStatus::FiftyMoveRule
        } else if self.in_threefold_repetition() {
            GameStatus::ThreefoldRepetition
        } else if board.insufficient_material() {
            GameStatus::InsufficientMaterial
        } else {
            GameStatus::Ongoing
        }
    }
}
