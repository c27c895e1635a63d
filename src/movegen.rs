// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation and the legality filter on top of it.
//!
//! Archers produce two disjoint kinds of moves: a step onto an empty
//! adjacent square, and a ranged attack on an enemy piece standing anywhere
//! in the archer's pattern. No generated move ever captures a king.
use arrayvec::ArrayVec;

use crate::attacks;
use crate::bitboard::{Bitboard, BB_RANK_1, BB_RANK_2, BB_RANK_7, BB_RANK_8};
use crate::board::{self, Board};
use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square, PROMOTION_KINDS};

pub type MoveVec = ArrayVec<[Move; 512]>;

/// Occupancy views shared by every piece generator.
struct Targets {
    color: Color,
    allies: Bitboard,
    // Enemy pieces that may be captured. Kings are never capture targets.
    enemies: Bitboard,
    occupancy: Bitboard,
}

impl Targets {
    fn new(board: &Board, color: Color) -> Targets {
        let enemy = color.toggle();
        Targets {
            color,
            allies: board.pieces(color),
            enemies: board.pieces(enemy) & !board.kings(enemy),
            occupancy: board.occupancy(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates pseudo-legal moves for the side to move.
    pub fn generate_moves(&self, board: &Board, moves: &mut MoveVec) {
        self.generate_moves_for(board, board.side_to_move(), moves)
    }

    /// Generates pseudo-legal moves for `color`. En passant is only produced
    /// when `color` is the side to move, since the en-passant square belongs
    /// to the side to move.
    pub fn generate_moves_for(&self, board: &Board, color: Color, moves: &mut MoveVec) {
        let targets = Targets::new(board, color);
        add_pawns(board, &targets, moves);
        add_leapers(board, &targets, PieceKind::Knight, moves);
        add_sliders(board, &targets, PieceKind::Bishop, moves);
        add_sliders(board, &targets, PieceKind::Rook, moves);
        add_sliders(board, &targets, PieceKind::Queen, moves);
        add_leapers(board, &targets, PieceKind::King, moves);
        add_castles(board, &targets, moves);
        add_archers(board, &targets, moves);
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self, board: &Board) -> MoveVec {
        let mut moves = MoveVec::new();
        self.generate_moves(board, &mut moves);
        moves.retain(|m| board.is_legal_given_pseudolegal(*m));
        moves
    }

    /// The legal moves of the piece standing on `square`.
    pub fn legal_moves_from(&self, board: &Board, square: Square) -> MoveVec {
        let mut moves = self.legal_moves(board);
        moves.retain(|m| m.source() == square);
        moves
    }

    /// Whether the side to move has at least one legal move.
    pub fn has_legal_move(&self, board: &Board) -> bool {
        let mut moves = MoveVec::new();
        self.generate_moves(board, &mut moves);
        moves.iter().any(|&m| board.is_legal_given_pseudolegal(m))
    }
}

impl Board {
    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> MoveVec {
        MoveGenerator::new().legal_moves(self)
    }
}

fn add_pawns(board: &Board, targets: &Targets, moves: &mut MoveVec) {
    let color = targets.color;
    let pawn = Piece::new(PieceKind::Pawn, color);
    let (start_rank, promo_rank, forward) = match color {
        Color::White => (BB_RANK_2, BB_RANK_8, 1),
        Color::Black => (BB_RANK_7, BB_RANK_1, -1),
    };

    let push_or_promote = |moves: &mut MoveVec, from: Square, to: Square, captured| {
        if promo_rank.test(to) {
            for &kind in PROMOTION_KINDS.iter() {
                moves.push(Move::promotion(from, to, pawn, kind, captured));
            }
        } else if let Some(victim) = captured {
            moves.push(Move::capture(from, to, pawn, victim));
        } else {
            moves.push(Move::quiet(from, to, pawn));
        }
    };

    for from in board.pawns(color) {
        // Pawns never stand on their promotion rank.
        let target = match from.offset(0, forward) {
            Some(target) => target,
            None => continue,
        };

        if !targets.occupancy.test(target) {
            push_or_promote(moves, from, target, None);
            if start_rank.test(from) {
                if let Some(two_push) = target.offset(0, forward) {
                    if !targets.occupancy.test(two_push) {
                        moves.push(Move::double_pawn_push(from, two_push, pawn));
                    }
                }
            }
        }

        for to in attacks::pawn_attacks(from, color) & targets.enemies {
            push_or_promote(moves, from, to, board.piece_at(to));
        }

        if color != board.side_to_move() {
            continue;
        }

        if let Some(ep_square) = board.en_passant_square() {
            let victim_square = Square::of(from.rank(), ep_square.file());
            let victim = Piece::new(PieceKind::Pawn, color.toggle());
            if attacks::pawn_attacks(from, color).test(ep_square)
                && !targets.occupancy.test(ep_square)
                && board.piece_at(victim_square) == Some(victim)
            {
                moves.push(Move::en_passant(from, ep_square, pawn));
            }
        }
    }
}

fn add_leapers(board: &Board, targets: &Targets, kind: PieceKind, moves: &mut MoveVec) {
    let piece = Piece::new(kind, targets.color);
    for from in board.pieces_of_kind(targets.color, kind) {
        for to in piece.attacks(from, targets.occupancy) & !targets.allies {
            push_simple(board, targets, piece, from, to, moves);
        }
    }
}

fn add_sliders(board: &Board, targets: &Targets, kind: PieceKind, moves: &mut MoveVec) {
    // Same shape as leapers; the occupancy passed to `attacks` is what stops
    // the rays.
    add_leapers(board, targets, kind, moves)
}

fn push_simple(
    board: &Board,
    targets: &Targets,
    piece: Piece,
    from: Square,
    to: Square,
    moves: &mut MoveVec,
) {
    if targets.enemies.test(to) {
        if let Some(victim) = board.piece_at(to) {
            moves.push(Move::capture(from, to, piece, victim));
        }
    } else if !targets.occupancy.test(to) {
        moves.push(Move::quiet(from, to, piece));
    }
}

fn add_castles(board: &Board, targets: &Targets, moves: &mut MoveVec) {
    let color = targets.color;
    let enemy = color.toggle();
    let king = Piece::new(PieceKind::King, color);
    let rook = Some(Piece::new(PieceKind::Rook, color));
    let home = board::king_home(color);
    if board.piece_at(home) != Some(king) || board.is_attacked(home, enemy) {
        // Can't castle out of check, or without a king on its home square.
        return;
    }

    let empty = |squares: &[Square]| squares.iter().all(|&sq| !targets.occupancy.test(sq));
    let safe = |squares: &[Square]| squares.iter().all(|&sq| !board.is_attacked(sq, enemy));

    if board.can_castle_kingside(color) && board.piece_at(board::kingside_rook(color)) == rook {
        let (one, two) = match color {
            Color::White => (Square::F1, Square::G1),
            Color::Black => (Square::F8, Square::G8),
        };

        if empty(&[one, two]) && safe(&[one, two]) {
            moves.push(Move::kingside_castle(home, two, king));
        }
    }

    if board.can_castle_queenside(color) && board.piece_at(board::queenside_rook(color)) == rook {
        // The rook crosses `three`, so it must be empty, but the king never
        // stands on it so it may be attacked.
        let (one, two, three) = match color {
            Color::White => (Square::D1, Square::C1, Square::B1),
            Color::Black => (Square::D8, Square::C8, Square::B8),
        };

        if empty(&[one, two, three]) && safe(&[one, two]) {
            moves.push(Move::queenside_castle(home, two, king));
        }
    }
}

fn add_archers(board: &Board, targets: &Targets, moves: &mut MoveVec) {
    let archer = Piece::new(PieceKind::Archer, targets.color);
    for from in board.archers(targets.color) {
        for to in attacks::king_attacks(from) & !targets.occupancy {
            moves.push(Move::quiet(from, to, archer));
        }

        for to in attacks::archer_attacks(from) & targets.enemies {
            if let Some(victim) = board.piece_at(to) {
                moves.push(Move::ranged_attack(from, to, archer, victim));
            }
        }
    }
}
