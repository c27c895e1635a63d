// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of `Move`.
//!
//! A move records everything needed to apply and later undo it without
//! consulting the board: the moving piece, the captured piece if any, the
//! promotion kind and a set of flags describing special moves. A ranged
//! attack is a move whose destination is the square of the victim; the
//! attacking archer stays on its source square.
use std::fmt::{self, Write};

use crate::types::{Color, Piece, PieceKind, Square};

bitflags! {
    pub struct MoveFlags: u8 {
        const QUIET = 0;
        const CAPTURE = 0b0000_0001;
        const EN_PASSANT = 0b0000_0010;
        const KINGSIDE_CASTLE = 0b0000_0100;
        const QUEENSIDE_CASTLE = 0b0000_1000;
        const PROMOTION = 0b0001_0000;
        const DOUBLE_PAWN_PUSH = 0b0010_0000;
        const RANGED_ATTACK = 0b0100_0000;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    piece: Piece,
    captured: Option<Piece>,
    promotion: Option<PieceKind>,
    flags: MoveFlags,
}

impl Move {
    fn new(source: Square, destination: Square, piece: Piece, flags: MoveFlags) -> Move {
        Move {
            source,
            destination,
            piece,
            captured: None,
            promotion: None,
            flags,
        }
    }

    /// Constructs a non-capturing move of `piece` from the source square to
    /// the destination square.
    pub fn quiet(source: Square, dest: Square, piece: Piece) -> Move {
        Move::new(source, dest, piece, MoveFlags::QUIET)
    }

    pub fn double_pawn_push(source: Square, dest: Square, piece: Piece) -> Move {
        Move::new(source, dest, piece, MoveFlags::DOUBLE_PAWN_PUSH)
    }

    /// Constructs a move that captures `captured`, standing on the
    /// destination square.
    pub fn capture(source: Square, dest: Square, piece: Piece, captured: Piece) -> Move {
        let mut mov = Move::new(source, dest, piece, MoveFlags::CAPTURE);
        mov.captured = Some(captured);
        mov
    }

    /// Constructs an en-passant capture. The destination is the en-passant
    /// square, not the square of the captured pawn.
    pub fn en_passant(source: Square, dest: Square, piece: Piece) -> Move {
        let mut mov = Move::new(
            source,
            dest,
            piece,
            MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
        );
        mov.captured = Some(Piece::new(PieceKind::Pawn, piece.color.toggle()));
        mov
    }

    pub fn promotion(
        source: Square,
        dest: Square,
        piece: Piece,
        promoted: PieceKind,
        captured: Option<Piece>,
    ) -> Move {
        let mut flags = MoveFlags::PROMOTION;
        if captured.is_some() {
            flags |= MoveFlags::CAPTURE;
        }

        let mut mov = Move::new(source, dest, piece, flags);
        mov.promotion = Some(promoted);
        mov.captured = captured;
        mov
    }

    /// Castles are encoded using the king's start and stop squares.
    pub fn kingside_castle(source: Square, dest: Square, piece: Piece) -> Move {
        Move::new(source, dest, piece, MoveFlags::KINGSIDE_CASTLE)
    }

    pub fn queenside_castle(source: Square, dest: Square, piece: Piece) -> Move {
        Move::new(source, dest, piece, MoveFlags::QUEENSIDE_CASTLE)
    }

    /// Constructs a ranged attack by the archer on `source` against
    /// `victim`, standing on `target`.
    pub fn ranged_attack(source: Square, target: Square, archer: Piece, victim: Piece) -> Move {
        let mut mov = Move::new(
            source,
            target,
            archer,
            MoveFlags::CAPTURE | MoveFlags::RANGED_ATTACK,
        );
        mov.captured = Some(victim);
        mov
    }

    pub fn source(self) -> Square {
        self.source
    }

    /// The destination of the move. For ranged attacks, this is the square
    /// of the removed piece.
    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn piece(self) -> Piece {
        self.piece
    }

    pub fn color(self) -> Color {
        self.piece.color
    }

    pub fn captured(self) -> Option<Piece> {
        self.captured
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn flags(self) -> MoveFlags {
        self.flags
    }

    pub fn is_quiet(self) -> bool {
        self.flags.is_empty()
    }

    /// True for every move that removes an enemy piece, ranged attacks
    /// included.
    pub fn is_capture(self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    pub fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    pub fn is_double_pawn_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    pub fn is_promotion(self) -> bool {
        self.flags.contains(MoveFlags::PROMOTION)
    }

    pub fn is_kingside_castle(self) -> bool {
        self.flags.contains(MoveFlags::KINGSIDE_CASTLE)
    }

    pub fn is_queenside_castle(self) -> bool {
        self.flags.contains(MoveFlags::QUEENSIDE_CASTLE)
    }

    pub fn is_castle(self) -> bool {
        self.flags
            .intersects(MoveFlags::KINGSIDE_CASTLE | MoveFlags::QUEENSIDE_CASTLE)
    }

    pub fn is_ranged_attack(self) -> bool {
        self.flags.contains(MoveFlags::RANGED_ATTACK)
    }

    /// The coordinate form of this move, e.g. `e2e4` or `e7e8q`.
    pub fn as_coordinate(self) -> String {
        let mut buf = String::new();
        write!(&mut buf, "{}{}", self.source, self.destination).unwrap();
        if let Some(kind) = self.promotion {
            buf.push(kind.as_char());
        }

        buf
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_ranged_attack() {
            write!(f, "{}*{}", self.source, self.destination)
        } else {
            write!(f, "{}", self.as_coordinate())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::Black)
    }

    #[test]
    fn quiet() {
        let quiet = Move::quiet(Square::A4, Square::A5, white(PieceKind::Rook));
        assert_eq!(Square::A4, quiet.source());
        assert_eq!(Square::A5, quiet.destination());
        assert!(quiet.is_quiet());
        assert!(!quiet.is_capture());
        assert_eq!(None, quiet.captured());
    }

    #[test]
    fn capture() {
        let capture = Move::capture(
            Square::B4,
            Square::C4,
            white(PieceKind::Rook),
            black(PieceKind::Knight),
        );
        assert!(capture.is_capture());
        assert!(!capture.is_quiet());
        assert_eq!(Some(black(PieceKind::Knight)), capture.captured());
    }

    #[test]
    fn en_passant_captures_a_pawn() {
        let ep = Move::en_passant(Square::E5, Square::D6, white(PieceKind::Pawn));
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());
        assert_eq!(Some(black(PieceKind::Pawn)), ep.captured());
    }

    #[test]
    fn promotion_capture() {
        let promo = Move::promotion(
            Square::E7,
            Square::F8,
            white(PieceKind::Pawn),
            PieceKind::Queen,
            Some(black(PieceKind::Bishop)),
        );
        assert!(promo.is_promotion());
        assert!(promo.is_capture());
        assert_eq!(Some(PieceKind::Queen), promo.promotion_piece());
        assert_eq!("e7f8q", promo.as_coordinate());
    }

    #[test]
    fn castles() {
        let king = white(PieceKind::King);
        assert!(Move::kingside_castle(Square::E1, Square::G1, king).is_castle());
        assert!(Move::queenside_castle(Square::E1, Square::C1, king).is_queenside_castle());
        assert!(!Move::quiet(Square::E1, Square::E2, king).is_castle());
    }

    #[test]
    fn ranged_attack() {
        let attack = Move::ranged_attack(
            Square::C4,
            Square::D5,
            white(PieceKind::Archer),
            black(PieceKind::Pawn),
        );
        assert!(attack.is_ranged_attack());
        assert!(attack.is_capture());
        assert_eq!(Square::C4, attack.source());
        assert_eq!(Square::D5, attack.destination());
        assert_eq!("c4*d5", attack.to_string());
    }
}
