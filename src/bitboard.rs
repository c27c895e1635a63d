// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions of the `Bitboard` type, a set of squares packed into a
//! single 64-bit integer. Bit `n` corresponds to the square with index `n`
//! (a1 = 0, h8 = 63), so set operations are plain bitwise operations.
use num_traits::FromPrimitive;
use std::fmt;
use std::iter::{FromIterator, Iterator};
use std::ops;

use crate::types::{self, Rank, Square};

const RANK_MASKS: [u64; 8] = [
    0x0000_0000_0000_00FF,
    0x0000_0000_0000_FF00,
    0x0000_0000_00FF_0000,
    0x0000_0000_FF00_0000,
    0x0000_00FF_0000_0000,
    0x0000_FF00_0000_0000,
    0x00FF_0000_0000_0000,
    0xFF00_0000_0000_0000,
];

const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

/// A set of squares.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    pub const fn from_bits(bits: u64) -> Bitboard {
        Bitboard { bits }
    }

    /// The empty set.
    pub const fn none() -> Bitboard {
        Bitboard::from_bits(0)
    }

    /// The set containing every square.
    pub const fn all() -> Bitboard {
        Bitboard::from_bits(!0)
    }

    /// The set containing only `square`.
    pub const fn single(square: Square) -> Bitboard {
        Bitboard::from_bits(1u64 << (square as u8))
    }

    pub const fn test(self, square: Square) -> bool {
        (self.bits & (1u64 << (square as u8))) != 0
    }

    pub fn set(&mut self, square: Square) {
        self.bits |= 1u64 << (square as u8);
    }

    pub fn unset(&mut self, square: Square) {
        self.bits &= !(1u64 << (square as u8));
    }

    pub const fn and(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & other.bits)
    }

    pub const fn or(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    pub const fn xor(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits ^ other.bits)
    }

    pub fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }

    /// The members of this set that lie on the given rank.
    pub const fn rank(self, rank: Rank) -> Bitboard {
        self.and(Bitboard::from_bits(RANK_MASKS[rank as usize]))
    }

    pub const fn bits(self) -> u64 {
        self.bits
    }

    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    pub const fn empty(self) -> bool {
        self.bits == 0
    }

    /// The lowest-indexed square in the set, if any.
    pub fn first(self) -> Option<Square> {
        self.into_iter().next()
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Bitboard").field(&self.bits).finish()
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in types::RANKS.iter().rev() {
            for &file in &types::FILES {
                if self.test(Square::of(rank, file)) {
                    write!(f, " 1 ")?
                } else {
                    write!(f, " . ")?
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        Ok(())
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, rhs: Bitboard) -> Bitboard {
        self.and(rhs)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Bitboard) {
        *self = self.and(rhs);
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Bitboard) -> Bitboard {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        *self = self.or(rhs);
    }
}

impl ops::BitXor for Bitboard {
    type Output = Bitboard;

    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        self.xor(rhs)
    }
}

impl ops::Not for Bitboard {
    type Output = Bitboard;

    fn not(self) -> Bitboard {
        Bitboard::from_bits(!self.bits)
    }
}

/// Iterates the squares of a bitboard from a1 towards h8.
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        FromPrimitive::from_u32(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> BitboardIterator {
        self.iter()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
        let mut board = Bitboard::none();
        for sq in iter {
            board.set(sq);
        }

        board
    }
}

pub const BB_RANK_1: Bitboard = Bitboard::from_bits(RANK_MASKS[0]);
pub const BB_RANK_2: Bitboard = Bitboard::from_bits(RANK_MASKS[1]);
pub const BB_RANK_7: Bitboard = Bitboard::from_bits(RANK_MASKS[6]);
pub const BB_RANK_8: Bitboard = Bitboard::from_bits(RANK_MASKS[7]);

pub const BB_BACK_RANKS: Bitboard = BB_RANK_1.or(BB_RANK_8);
pub const BB_LIGHT_SQUARES: Bitboard = Bitboard::from_bits(LIGHT_SQUARES);

/// d4, e4, d5 and e5.
pub const BB_CENTER: Bitboard = Bitboard::from_bits(0x0000_0018_1800_0000);
