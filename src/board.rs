// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::moves::Move;
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, Piece, PieceKind, Square};
use crate::types::{FILES, PIECE_KINDS, RANKS};
use crate::zobrist;

/// Piece placement and game metadata. A `Board` is `Copy`, so copy-make is
/// the cheapest way to try a move out and throw the result away.
#[derive(Copy, Clone, Debug)]
pub struct Board {
    boards_by_piece: [Bitboard; 14],
    boards_by_color: [Bitboard; 2],
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_clock: u32,
    side_to_move: Color,
    castle_status: CastleStatus,
    zobrist_hash: u64,
}

/// The parts of a board that a move overwrites and that cannot be
/// recomputed from the move alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct IrreversibleState {
    pub castle_status: CastleStatus,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_clock: u32,
    pub zobrist_hash: u64,
}

//
// Board state getters
//

impl Board {
    /// An empty board with White to move.
    pub fn new() -> Board {
        Board {
            boards_by_piece: [Bitboard::none(); 14],
            boards_by_color: [Bitboard::none(); 2],
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
            side_to_move: Color::White,
            castle_status: CastleStatus::NONE,
            zobrist_hash: 0,
        }
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_clock(&self) -> u32 {
        self.fullmove_clock
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn zobrist_hash(&self) -> u64 {
        self.zobrist_hash
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.boards_by_color[color.as_index()]
    }

    pub fn occupancy(&self) -> Bitboard {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.boards_by_piece[board_index(color, kind)]
    }

    pub fn pawns(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Pawn)
    }

    pub fn knights(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Knight)
    }

    pub fn bishops(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Bishop)
    }

    pub fn rooks(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Rook)
    }

    pub fn queens(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Queen)
    }

    pub fn kings(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::King)
    }

    pub fn archers(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Archer)
    }

    /// The square of `color`'s king. Diagrams without a king are allowed, in
    /// which case this is `None`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings(color).first()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let color = if self.boards_by_color[Color::White.as_index()].test(square) {
            Color::White
        } else if self.boards_by_color[Color::Black.as_index()].test(square) {
            Color::Black
        } else {
            return None;
        };

        PIECE_KINDS
            .iter()
            .find(|&&kind| self.pieces_of_kind(color, kind).test(square))
            .map(|&kind| Piece::new(kind, color))
    }

    pub(crate) fn irreversible_state(&self) -> IrreversibleState {
        IrreversibleState {
            castle_status: self.castle_status,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_clock: self.fullmove_clock,
            zobrist_hash: self.zobrist_hash,
        }
    }
}

//
// Board manipulation. These keep the hash current but leave validation to
// the caller.
//

impl Board {
    pub(crate) fn add_piece(&mut self, square: Square, piece: Piece) {
        debug_assert!(
            self.piece_at(square).is_none(),
            "square {} already occupied",
            square
        );
        self.boards_by_color[piece.color.as_index()].set(square);
        self.boards_by_piece[board_index(piece.color, piece.kind)].set(square);
        zobrist::modify_piece(&mut self.zobrist_hash, square, piece);
    }

    pub(crate) fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        self.boards_by_color[piece.color.as_index()].unset(square);
        self.boards_by_piece[board_index(piece.color, piece.kind)].unset(square);
        zobrist::modify_piece(&mut self.zobrist_hash, square, piece);
        Some(piece)
    }

    pub(crate) fn set_side_to_move(&mut self, side: Color) {
        if side != self.side_to_move {
            self.side_to_move = side;
            zobrist::modify_side_to_move(&mut self.zobrist_hash);
        }
    }

    pub(crate) fn set_castle_status(&mut self, status: CastleStatus) {
        zobrist::modify_castle(&mut self.zobrist_hash, self.castle_status, status);
        self.castle_status = status;
    }

    pub(crate) fn set_en_passant_square(&mut self, square: Option<Square>) {
        zobrist::modify_en_passant(&mut self.zobrist_hash, self.en_passant_square, square);
        self.en_passant_square = square;
    }

    pub(crate) fn set_clocks(&mut self, halfmove: u32, fullmove: u32) {
        self.halfmove_clock = halfmove;
        self.fullmove_clock = fullmove;
    }

    /// Drops castle rights whose king or rook is no longer on its home
    /// square. Used after the board has been edited by hand.
    pub(crate) fn sanitize_castle_status(&mut self) {
        let mut status = self.castle_status;
        for &color in &[Color::White, Color::Black] {
            let king = Piece::new(PieceKind::King, color);
            let rook = Piece::new(PieceKind::Rook, color);
            if self.piece_at(king_home(color)) != Some(king) {
                status.remove(CastleStatus::both(color));
            }
            if self.piece_at(kingside_rook(color)) != Some(rook) {
                status.remove(CastleStatus::kingside(color));
            }
            if self.piece_at(queenside_rook(color)) != Some(rook) {
                status.remove(CastleStatus::queenside(color));
            }
        }

        self.set_castle_status(status);
    }

    /// Applies a move mechanically. No legality checking is done; the move
    /// must have been generated for this board.
    pub fn apply_move(&mut self, mov: Move) {
        let side = self.side_to_move;
        debug_assert_eq!(side, mov.color(), "move {} applied out of turn", mov);
        let mut castle_status = self.castle_status;
        let mut en_passant_square = None;

        if mov.is_ranged_attack() {
            // The archer stays put; only the target disappears.
            let removed = self.remove_piece(mov.destination());
            debug_assert!(removed.is_some(), "ranged attack on empty square");
            castle_status.remove(rook_rights(mov.destination(), side.toggle()));
        } else {
            if mov.is_capture() {
                let target = capture_square(mov);
                let removed = self.remove_piece(target);
                debug_assert!(removed.is_some(), "capture of empty square");
                castle_status.remove(rook_rights(target, side.toggle()));
            }

            if mov.is_castle() {
                let (rook_from, rook_to) = castle_rook_squares(side, mov.is_kingside_castle());
                if let Some(rook) = self.remove_piece(rook_from) {
                    self.add_piece(rook_to, rook);
                }
            }

            self.remove_piece(mov.source());
            let piece_to_add = match mov.promotion_piece() {
                Some(kind) => Piece::new(kind, side),
                None => mov.piece(),
            };
            self.add_piece(mov.destination(), piece_to_add);

            if mov.is_double_pawn_push() {
                en_passant_square = Some(Square::of(
                    RANKS[(mov.source().rank() as usize + mov.destination().rank() as usize) / 2],
                    mov.source().file(),
                ));
            }

            match mov.piece().kind {
                PieceKind::King => castle_status.remove(CastleStatus::both(side)),
                PieceKind::Rook => castle_status.remove(rook_rights(mov.source(), side)),
                _ => {}
            }
        }

        self.set_castle_status(castle_status);
        self.set_en_passant_square(en_passant_square);
        if mov.is_capture() || mov.piece().kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if side == Color::Black {
            self.fullmove_clock += 1;
        }

        self.set_side_to_move(side.toggle());
    }

    /// Reverses `apply_move`, given the state saved before the move was made.
    pub(crate) fn unmake_move(&mut self, mov: Move, state: IrreversibleState) {
        if mov.is_ranged_attack() {
            if let Some(victim) = mov.captured() {
                self.add_piece(mov.destination(), victim);
            }
        } else {
            self.remove_piece(mov.destination());
            self.add_piece(mov.source(), mov.piece());
            if mov.is_castle() {
                let (rook_from, rook_to) =
                    castle_rook_squares(mov.color(), mov.is_kingside_castle());
                if let Some(rook) = self.remove_piece(rook_to) {
                    self.add_piece(rook_from, rook);
                }
            }

            if let Some(captured) = mov.captured() {
                self.add_piece(capture_square(mov), captured);
            }
        }

        self.side_to_move = mov.color();
        self.castle_status = state.castle_status;
        self.en_passant_square = state.en_passant_square;
        self.halfmove_clock = state.halfmove_clock;
        self.fullmove_clock = state.fullmove_clock;
        self.zobrist_hash = state.zobrist_hash;
    }

    pub(crate) fn rehash(&mut self) {
        self.zobrist_hash = zobrist::hash(self);
    }
}

//
// Attack queries
//

impl Board {
    /// Every piece of color `by` that attacks `target`. Archers contribute
    /// their full pattern regardless of what stands in between.
    pub fn squares_attacking(&self, by: Color, target: Square) -> Bitboard {
        let occupancy = self.occupancy();
        let straight = self.rooks(by) | self.queens(by);
        let diagonal = self.bishops(by) | self.queens(by);

        attacks::rook_attacks(target, occupancy) & straight
            | attacks::bishop_attacks(target, occupancy) & diagonal
            | attacks::knight_attacks(target) & self.knights(by)
            | attacks::pawn_attacks(target, by.toggle()) & self.pawns(by)
            | attacks::king_attacks(target) & self.kings(by)
            | attacks::archer_attacks(target) & self.archers(by)
    }

    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        !self.squares_attacking(by, square).empty()
    }

    /// Whether `color`'s king is attacked. A side without a king is never in
    /// check.
    pub fn is_check(&self, color: Color) -> bool {
        self.kings(color)
            .iter()
            .any(|king| self.is_attacked(king, color.toggle()))
    }

    /// Legality test for a move known to be pseudo-legal: make the move on a
    /// copy and see whether the mover's king is left attacked.
    pub fn is_legal_given_pseudolegal(&self, mov: Move) -> bool {
        let mut next = *self;
        next.apply_move(mov);
        !next.is_check(mov.color())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

//
// Helper functions
//

fn board_index(color: Color, kind: PieceKind) -> usize {
    color.as_index() * 7 + kind.as_index()
}

/// The square of the piece removed by a capture. Only en passant differs
/// from the destination.
fn capture_square(mov: Move) -> Square {
    if mov.is_en_passant() {
        Square::of(mov.source().rank(), mov.destination().file())
    } else {
        mov.destination()
    }
}

pub(crate) fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

pub(crate) fn kingside_rook(color: Color) -> Square {
    match color {
        Color::White => Square::H1,
        Color::Black => Square::H8,
    }
}

pub(crate) fn queenside_rook(color: Color) -> Square {
    match color {
        Color::White => Square::A1,
        Color::Black => Square::A8,
    }
}

/// The castle rights lost by `color` when a piece leaves or is removed from
/// `square`.
fn rook_rights(square: Square, color: Color) -> CastleStatus {
    if square == kingside_rook(color) {
        CastleStatus::kingside(color)
    } else if square == queenside_rook(color) {
        CastleStatus::queenside(color)
    } else {
        CastleStatus::NONE
    }
}

fn castle_rook_squares(color: Color, kingside: bool) -> (Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (Square::H1, Square::F1),
        (Color::White, false) => (Square::A1, Square::D1),
        (Color::Black, true) => (Square::H8, Square::F8),
        (Color::Black, false) => (Square::A8, Square::D8),
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::moves::Move;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::Black)
    }

    mod attacks {
        use super::*;

        #[test]
        fn check_smoke() {
            let board = Board::from_fen(
                "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            )
            .unwrap();
            assert!(board.is_check(Color::Black));
            assert!(!board.is_check(Color::White));
        }

        #[test]
        fn archer_vertical_reach_is_check() {
            let board = Board::from_fen("8/8/3k4/8/3A4/8/8/K7 b - - 0 1").unwrap();
            assert!(board.is_check(Color::Black));
        }

        #[test]
        fn archer_adjacent_is_check() {
            let board = Board::from_fen("8/8/8/8/3Ak3/8/8/K7 b - - 0 1").unwrap();
            assert!(board.is_check(Color::Black));
            let board = Board::from_fen("8/8/8/8/8/2k5/3A4/K7 b - - 0 1").unwrap();
            assert!(board.is_check(Color::Black));
        }

        #[test]
        fn archer_attack_ignores_blockers() {
            let board = Board::from_fen("8/8/3k4/3p4/3A4/8/8/K7 b - - 0 1").unwrap();
            assert!(board.is_check(Color::Black));
        }

        #[test]
        fn archer_three_ranks_away_is_not_check() {
            let board = Board::from_fen("8/8/3k4/3p4/8/3A4/8/K7 b - - 0 1").unwrap();
            assert!(!board.is_check(Color::Black));
        }

        #[test]
        fn archer_has_no_horizontal_reach() {
            let board = Board::from_fen("8/8/8/1k1A4/8/8/8/K7 b - - 0 1").unwrap();
            assert!(!board.is_check(Color::Black));
            assert!(board.is_attacked(Square::C5, Color::White));
            assert!(!board.is_attacked(Square::B5, Color::White));
        }

        #[test]
        fn squares_attacking_lists_every_attacker() {
            let board = Board::from_fen("8/8/8/3p4/2A1N3/8/8/3R4 w - - 0 1").unwrap();
            let attackers = |sq| -> Vec<Square> {
                board.squares_attacking(Color::White, sq).iter().collect()
            };
            assert_eq!(vec![Square::D1, Square::C4], attackers(Square::D5));
            assert_eq!(vec![Square::D1, Square::E4], attackers(Square::D2));
            assert_eq!(vec![Square::C4], attackers(Square::C2));
        }

        #[test]
        fn kingless_side_is_never_in_check() {
            let board = Board::from_fen("8/8/8/3p4/2A5/8/8/8 w - - 0 1").unwrap();
            assert!(!board.is_check(Color::White));
            assert!(!board.is_check(Color::Black));
        }
    }

    mod apply {
        use super::*;

        #[test]
        fn opening_pawn() {
            let mut board = Board::from_fen(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 2 1",
            )
            .unwrap();
            board.apply_move(Move::quiet(Square::E2, Square::E3, white(PieceKind::Pawn)));

            assert_eq!(Color::Black, board.side_to_move());
            assert_eq!(1, board.fullmove_clock());
            assert_eq!(0, board.halfmove_clock());
            assert_eq!(Some(white(PieceKind::Pawn)), board.piece_at(Square::E3));
            assert_eq!(None, board.piece_at(Square::E2));
        }

        #[test]
        fn double_pawn_push_sets_ep() {
            let mut board = Board::from_fen("8/8/8/8/8/8/4P3/8 w - - 0 1").unwrap();
            board.apply_move(Move::double_pawn_push(
                Square::E2,
                Square::E4,
                white(PieceKind::Pawn),
            ));
            assert_eq!(Some(Square::E3), board.en_passant_square());
        }

        #[test]
        fn en_passant_capture() {
            let mut board = Board::from_fen("8/8/8/3pP3/8/8/8/8 w - d6 0 1").unwrap();
            board.apply_move(Move::en_passant(Square::E5, Square::D6, white(PieceKind::Pawn)));
            assert_eq!(None, board.piece_at(Square::D5));
            assert_eq!(Some(white(PieceKind::Pawn)), board.piece_at(Square::D6));
            assert_eq!(None, board.en_passant_square());
        }

        #[test]
        fn non_pawn_quiet_move_ticks_clock() {
            let mut board = Board::from_fen("8/8/8/8/8/8/4B3/8 w - - 5 2").unwrap();
            board.apply_move(Move::quiet(Square::E2, Square::G4, white(PieceKind::Bishop)));
            assert_eq!(6, board.halfmove_clock());
        }

        #[test]
        fn black_move_bumps_fullmove() {
            let mut board = Board::from_fen("8/8/8/8/8/8/8/4k3 b - - 0 7").unwrap();
            board.apply_move(Move::quiet(Square::E1, Square::E2, black(PieceKind::King)));
            assert_eq!(8, board.fullmove_clock());
        }

        #[test]
        fn moving_king_drops_rights() {
            let mut board = Board::from_fen("8/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
            board.apply_move(Move::quiet(Square::E1, Square::E2, white(PieceKind::King)));
            assert!(!board.can_castle_kingside(Color::White));
            assert!(!board.can_castle_queenside(Color::White));
        }

        #[test]
        fn moving_rook_drops_one_right() {
            let mut board = Board::from_fen("8/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
            board.apply_move(Move::quiet(Square::H1, Square::G1, white(PieceKind::Rook)));
            assert!(!board.can_castle_kingside(Color::White));
            assert!(board.can_castle_queenside(Color::White));
        }

        #[test]
        fn ranged_attack_on_rook_drops_rights() {
            let mut board = Board::from_fen("r3k3/1A6/8/8/8/8/8/4K3 w q - 0 1").unwrap();
            board.apply_move(Move::ranged_attack(
                Square::B7,
                Square::A8,
                white(PieceKind::Archer),
                black(PieceKind::Rook),
            ));
            assert!(!board.can_castle_queenside(Color::Black));
            assert_eq!(None, board.piece_at(Square::A8));
            assert_eq!(Some(white(PieceKind::Archer)), board.piece_at(Square::B7));
        }

        #[test]
        fn ranged_attack_keeps_archer_in_place() {
            let mut board = Board::from_fen("8/8/8/3p4/2A5/8/8/8 w - - 4 1").unwrap();
            board.apply_move(Move::ranged_attack(
                Square::C4,
                Square::D5,
                white(PieceKind::Archer),
                black(PieceKind::Pawn),
            ));
            assert_eq!(Some(white(PieceKind::Archer)), board.piece_at(Square::C4));
            assert_eq!(None, board.piece_at(Square::D5));
            assert_eq!(0, board.halfmove_clock());
            assert_eq!(Color::Black, board.side_to_move());
        }

        #[test]
        fn castles_move_the_rook() {
            let mut board = Board::from_fen("8/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
            let mut other = board;
            board.apply_move(Move::kingside_castle(Square::E1, Square::G1, white(PieceKind::King)));
            assert_eq!(Some(white(PieceKind::Rook)), board.piece_at(Square::F1));
            assert_eq!(Some(white(PieceKind::King)), board.piece_at(Square::G1));

            other.apply_move(Move::queenside_castle(Square::E1, Square::C1, white(PieceKind::King)));
            assert_eq!(Some(white(PieceKind::Rook)), other.piece_at(Square::D1));
            assert_eq!(Some(white(PieceKind::King)), other.piece_at(Square::C1));
        }

        #[test]
        fn promotion_capture() {
            let mut board = Board::from_fen("5b2/4P3/8/8/8/8/8/8 w - - 0 1").unwrap();
            board.apply_move(Move::promotion(
                Square::E7,
                Square::F8,
                white(PieceKind::Pawn),
                PieceKind::Queen,
                Some(black(PieceKind::Bishop)),
            ));
            assert_eq!(Some(white(PieceKind::Queen)), board.piece_at(Square::F8));
            assert_eq!(None, board.piece_at(Square::E7));
        }

        #[test]
        fn incremental_hash_matches_full_hash() {
            let mut board = Board::from_fen("r3k2r/8/8/8/4p3/8/3P4/R3K2R w KQkq - 0 1").unwrap();
            board.apply_move(Move::double_pawn_push(Square::D2, Square::D4, white(PieceKind::Pawn)));
            board.apply_move(Move::en_passant(Square::E4, Square::D3, black(PieceKind::Pawn)));
            board.apply_move(Move::kingside_castle(Square::E1, Square::G1, white(PieceKind::King)));
            let incremental = board.zobrist_hash();
            board.rehash();
            assert_eq!(board.zobrist_hash(), incremental);
        }
    }
}
