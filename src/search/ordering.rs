// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move ordering heuristics. Moves likely to cause cutoffs are searched
//! first: mates and checks, ranged attacks, then captures by most valuable
//! victim and least valuable attacker.
use std::cmp::Reverse;

use crate::bitboard::BB_CENTER;
use crate::board::Board;
use crate::moves::Move;
use crate::status::CheckOutcome;
use crate::types::PieceKind;

const RANGED_ATTACK_BONUS: i32 = 5000;
const RANGED_QUEEN_BONUS: i32 = 3000;
const CENTER_BONUS: i32 = 100;
const CASTLE_BONUS: i32 = 500;
const CHECK_BONUS: i32 = 8000;
const CHECKMATE_BONUS: i32 = 100_000;

/// Piece values used only for ordering, on a finer scale than the
/// evaluation's.
pub fn ordering_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
        PieceKind::Archer => 350,
    }
}

/// Scores a legal move of `board`. Higher is searched earlier.
pub fn score_move(board: &Board, mov: Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = mov.captured() {
        score += 10 * ordering_value(victim.kind) - ordering_value(mov.piece().kind);
    }

    if mov.is_ranged_attack() {
        score += RANGED_ATTACK_BONUS;
        if mov.captured().map(|p| p.kind) == Some(PieceKind::Queen) {
            score += RANGED_QUEEN_BONUS;
        }
    }

    if let Some(kind) = mov.promotion_piece() {
        score += ordering_value(kind);
    }

    if BB_CENTER.test(mov.destination()) {
        score += CENTER_BONUS;
    }

    if mov.is_castle() {
        score += CASTLE_BONUS;
    }

    score += match board.check_outcome(mov) {
        CheckOutcome::None => 0,
        CheckOutcome::Check => CHECK_BONUS,
        CheckOutcome::Checkmate => CHECKMATE_BONUS,
    };

    score
}

/// Sorts `moves` by descending score. Equal scores keep their relative
/// order.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&m| Reverse(score_move(board, m)));
}

#[cfg(test)]
mod tests {
    use super::{order_moves, score_move};
    use crate::board::Board;
    use crate::moves::Move;
    use crate::types::Square;

    fn find(board: &Board, from: Square, to: Square) -> Move {
        board
            .legal_moves()
            .into_iter()
            .find(|m| m.source() == from && m.destination() == to)
            .unwrap()
    }

    #[test]
    fn quiet_moves_score_zero_off_center() {
        let board = Board::from_fen(crate::START_FEN).unwrap();
        assert_eq!(0, score_move(&board, find(&board, Square::G1, Square::F3)));
        assert_eq!(100, score_move(&board, find(&board, Square::E2, Square::E4)));
    }

    #[test]
    fn ranged_attack_on_queen() {
        let board = Board::from_fen("4k3/8/8/8/3q4/2A5/8/4K3 w - - 0 1").unwrap();
        let attack = find(&board, Square::C3, Square::D4);
        assert!(attack.is_ranged_attack());
        // 10 * 900 - 350 + 5000 + 3000 + 100 for the center square.
        assert_eq!(16750, score_move(&board, attack));
    }

    #[test]
    fn mvv_lva() {
        let board = Board::from_fen("4k3/8/8/1r6/P7/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(4900, score_move(&board, find(&board, Square::A4, Square::B5)));
    }

    #[test]
    fn checks_and_mates_first() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mate = find(&board, Square::A1, Square::A8);
        assert_eq!(100_000, score_move(&board, mate));
        let mut moves: Vec<Move> = board.legal_moves().into_iter().collect();
        order_moves(&board, &mut moves);
        assert_eq!(mate, moves[0]);
    }

    #[test]
    fn castling_bonus() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let castle = board
            .legal_moves()
            .into_iter()
            .find(|m| m.is_castle())
            .unwrap();
        assert_eq!(500, score_move(&board, castle));
    }
}
