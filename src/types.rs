// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::error::{Error, Result};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Square {
    A1,
    B1,
    C1,
    D1,
    E1,
    F1,
    G1,
    H1,
    A2,
    B2,
    C2,
    D2,
    E2,
    F2,
    G2,
    H2,
    A3,
    B3,
    C3,
    D3,
    E3,
    F3,
    G3,
    H3,
    A4,
    B4,
    C4,
    D4,
    E4,
    F4,
    G4,
    H4,
    A5,
    B5,
    C5,
    D5,
    E5,
    F5,
    G5,
    H5,
    A6,
    B6,
    C6,
    D6,
    E6,
    F6,
    G6,
    H6,
    A7,
    B7,
    C7,
    D7,
    E7,
    F7,
    G7,
    H7,
    A8,
    B8,
    C8,
    D8,
    E8,
    F8,
    G8,
    H8,
}

impl Square {
    pub fn of(rank: Rank, file: File) -> Square {
        SQUARES[rank as usize * 8 + file as usize]
    }

    /// Builds a square from zero-based file and rank coordinates, failing if
    /// either lies outside of the board.
    pub fn from_coords(file: i32, rank: i32) -> Result<Square> {
        if !on_board(file, rank) {
            return Err(Error::InvalidSquare(format!("({}, {})", file, rank)));
        }

        Ok(SQUARES[(rank * 8 + file) as usize])
    }

    pub fn rank(self) -> Rank {
        RANKS[self as usize >> 3]
    }

    pub fn file(self) -> File {
        FILES[self as usize & 7]
    }

    /// The square reached by stepping the given number of files and ranks
    /// away from this one, if it is still on the board.
    pub fn offset(self, file_delta: i32, rank_delta: i32) -> Option<Square> {
        let file = self.file() as i32 + file_delta;
        let rank = self.rank() as i32 + rank_delta;
        if on_board(file, rank) {
            Some(SQUARES[(rank * 8 + file) as usize])
        } else {
            None
        }
    }

    /// Whether this is a light square. a1 is dark.
    pub fn is_light(self) -> bool {
        (self.file() as usize + self.rank() as usize) % 2 == 1
    }
}

fn on_board(file: i32, rank: i32) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank)
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Square> {
        let mut chars = s.chars();
        let square = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => File::try_from(file)
                .and_then(|file| Rank::try_from(rank).map(|rank| Square::of(rank, file))),
            _ => Err(()),
        };

        square.map_err(|_| Error::InvalidSquare(s.to_owned()))
    }
}

pub static SQUARES: [Square; 64] = [
    Square::A1,
    Square::B1,
    Square::C1,
    Square::D1,
    Square::E1,
    Square::F1,
    Square::G1,
    Square::H1,
    Square::A2,
    Square::B2,
    Square::C2,
    Square::D2,
    Square::E2,
    Square::F2,
    Square::G2,
    Square::H2,
    Square::A3,
    Square::B3,
    Square::C3,
    Square::D3,
    Square::E3,
    Square::F3,
    Square::G3,
    Square::H3,
    Square::A4,
    Square::B4,
    Square::C4,
    Square::D4,
    Square::E4,
    Square::F4,
    Square::G4,
    Square::H4,
    Square::A5,
    Square::B5,
    Square::C5,
    Square::D5,
    Square::E5,
    Square::F5,
    Square::G5,
    Square::H5,
    Square::A6,
    Square::B6,
    Square::C6,
    Square::D6,
    Square::E6,
    Square::F6,
    Square::G6,
    Square::H6,
    Square::A7,
    Square::B7,
    Square::C7,
    Square::D7,
    Square::E7,
    Square::F7,
    Square::G7,
    Square::H7,
    Square::A8,
    Square::B8,
    Square::C8,
    Square::D8,
    Square::E8,
    Square::F8,
    Square::G8,
    Square::H8,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'1' + *self as u8) as char)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        match value {
            '1'..='8' => Ok(RANKS[value as usize - '1' as usize]),
            _ => Err(()),
        }
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        match value {
            'a'..='h' => Ok(FILES[value as usize - 'a' as usize]),
            _ => Err(()),
        }
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

/// The kinds of pieces on the board. `Archer` steps one square in any
/// direction and attacks at range without moving.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Archer,
}

impl PieceKind {
    /// The lowercase FEN letter for this kind.
    pub fn as_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Archer => 'a',
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        let res = match value.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            'a' => PieceKind::Archer,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Archer,
];

/// Kinds a pawn may promote to.
pub static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn as_vector(self) -> i32 {
        match self {
            Direction::North => 8,
            Direction::NorthEast => 9,
            Direction::East => 1,
            Direction::SouthEast => -7,
            Direction::South => -8,
            Direction::SouthWest => -9,
            Direction::West => -1,
            Direction::NorthWest => 7,
        }
    }
}

bitflags! {
    pub struct CastleStatus: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE =0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

impl CastleStatus {
    pub fn kingside(color: Color) -> CastleStatus {
        match color {
            Color::White => CastleStatus::WHITE_KINGSIDE,
            Color::Black => CastleStatus::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> CastleStatus {
        match color {
            Color::White => CastleStatus::WHITE_QUEENSIDE,
            Color::Black => CastleStatus::BLACK_QUEENSIDE,
        }
    }

    pub fn both(color: Color) -> CastleStatus {
        match color {
            Color::White => CastleStatus::WHITE,
            Color::Black => CastleStatus::BLACK,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// The squares this piece attacks from `sq`. Archer attacks ignore
    /// occupancy entirely.
    pub fn attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        match self.kind {
            PieceKind::Pawn => attacks::pawn_attacks(sq, self.color),
            PieceKind::Knight => attacks::knight_attacks(sq),
            PieceKind::Bishop => attacks::bishop_attacks(sq, occupancy),
            PieceKind::Rook => attacks::rook_attacks(sq, occupancy),
            PieceKind::Queen => attacks::queen_attacks(sq, occupancy),
            PieceKind::King => attacks::king_attacks(sq),
            PieceKind::Archer => attacks::archer_attacks(sq),
        }
    }

    /// The FEN letter for this piece: uppercase for White.
    pub fn as_char(&self) -> char {
        match self.color {
            Color::White => self.kind.as_char().to_ascii_uppercase(),
            Color::Black => self.kind.as_char(),
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> std::result::Result<Self, Self::Error> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.as_char())
    }
}
