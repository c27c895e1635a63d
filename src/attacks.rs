// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed attack tables. Leaper pieces (pawns, knights, kings and
//! archers) read a fixed table indexed by square; sliding pieces combine a
//! ray table with the current occupancy.
use crate::bitboard::Bitboard;
use crate::types::{Color, Direction, Square, TableIndex, COLORS, SQUARES};

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

// Every adjacent square, plus two squares straight up and straight down.
// No two-step along ranks or diagonals.
const ARCHER_OFFSETS: [(i32, i32); 10] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (0, 2),
    (0, -2),
];

/// A table of non-sliding attacks, one entry per square.
struct LeaperTable {
    table: [Bitboard; 64],
}

impl LeaperTable {
    fn new(offsets: &[(i32, i32)]) -> LeaperTable {
        let mut lt = LeaperTable {
            table: [Bitboard::none(); 64],
        };

        for &sq in SQUARES.iter() {
            lt.table[sq.as_index()] = offsets
                .iter()
                .filter_map(|&(file, rank)| sq.offset(file, rank))
                .collect();
        }

        lt
    }

    fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

struct PawnTable {
    table: [[Bitboard; 2]; 64],
}

impl PawnTable {
    fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[Bitboard::none(); 2]; 64],
        };

        for &sq in SQUARES.iter() {
            for &color in COLORS.iter() {
                let forward = match color {
                    Color::White => 1,
                    Color::Black => -1,
                };

                pt.table[sq.as_index()][color.as_index()] = [-1, 1]
                    .iter()
                    .filter_map(|&file| sq.offset(file, forward))
                    .collect();
            }
        }

        pt
    }

    fn attacks(&self, sq: Square, color: Color) -> Bitboard {
        self.table[sq.as_index()][color.as_index()]
    }
}

/// Rays cast from every square in every direction, stopping at the edge of
/// the board. The extra 65th row is an empty ray used when a ray has no
/// blocker.
struct RayTable {
    table: [[Bitboard; 8]; 65],
}

impl RayTable {
    fn new() -> RayTable {
        let mut rt = RayTable {
            table: [[Bitboard::none(); 8]; 65],
        };

        let directions = [
            (Direction::North, 0, 1),
            (Direction::East, 1, 0),
            (Direction::South, 0, -1),
            (Direction::West, -1, 0),
            (Direction::NorthEast, 1, 1),
            (Direction::NorthWest, -1, 1),
            (Direction::SouthEast, 1, -1),
            (Direction::SouthWest, -1, -1),
        ];

        for &sq in SQUARES.iter() {
            for &(dir, file_step, rank_step) in directions.iter() {
                let mut entry = Bitboard::none();
                let mut cursor = sq.offset(file_step, rank_step);
                while let Some(next) = cursor {
                    entry.set(next);
                    cursor = next.offset(file_step, rank_step);
                }

                rt.table[sq.as_index()][dir.as_index()] = entry;
            }
        }

        rt
    }

    fn attacks(&self, sq: usize, dir: Direction) -> Bitboard {
        self.table[sq][dir.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: LeaperTable = LeaperTable::new(&KING_OFFSETS);
    static ref KNIGHT_TABLE: LeaperTable = LeaperTable::new(&KNIGHT_OFFSETS);
    static ref ARCHER_TABLE: LeaperTable = LeaperTable::new(&ARCHER_OFFSETS);
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
    static ref RAY_TABLE: RayTable = RayTable::new();
}

fn positive_ray_attacks(sq: Square, occupancy: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.as_vector() > 0);
    let attacks = RAY_TABLE.attacks(sq.as_index(), dir);
    let blocker = attacks.and(occupancy).bits();
    let blocking_square = blocker.trailing_zeros() as usize;
    let blocking_ray = RAY_TABLE.attacks(blocking_square, dir);
    attacks.xor(blocking_ray)
}

fn negative_ray_attacks(sq: Square, occupancy: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.as_vector() < 0);
    let attacks = RAY_TABLE.attacks(sq.as_index(), dir);
    let blocker = attacks.and(occupancy).bits();
    let blocking_square = (64 - blocker.leading_zeros()).checked_sub(1).unwrap_or(64) as usize;
    let blocking_ray = RAY_TABLE.attacks(blocking_square, dir);
    attacks.xor(blocking_ray)
}

pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE.attacks(sq)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE.attacks(sq)
}

/// Squares attacked by an archer on `sq`. The pattern is unblockable, so no
/// occupancy is needed.
pub fn archer_attacks(sq: Square) -> Bitboard {
    ARCHER_TABLE.attacks(sq)
}

pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupancy, Direction::NorthWest)
        | negative_ray_attacks(sq, occupancy, Direction::SouthEast)
        | positive_ray_attacks(sq, occupancy, Direction::NorthEast)
        | negative_ray_attacks(sq, occupancy, Direction::SouthWest)
}

pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupancy, Direction::North)
        | negative_ray_attacks(sq, occupancy, Direction::South)
        | positive_ray_attacks(sq, occupancy, Direction::East)
        | negative_ray_attacks(sq, occupancy, Direction::West)
}

pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}
