// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zobrist hashing of board signatures. The signature covers piece
//! placement, side to move, castle rights and the en-passant file, but not
//! the move clocks, so two positions compare equal for repetition purposes
//! exactly when their signatures do.
use crate::board::Board;
use crate::types::{CastleStatus, Color, Piece, Square, TableIndex, SQUARES};

struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const fn new(seed: u64) -> Xorshift64 {
        Xorshift64 { state: seed }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        self.state
    }
}

// 64 squares, 7 piece kinds, 2 colors.
const PIECE_HASHES: usize = 64 * 14;
const SIDE_TO_MOVE_INDEX: usize = PIECE_HASHES;
const CASTLING_RIGHTS_INDEX: usize = SIDE_TO_MOVE_INDEX + 1;
const EN_PASSANT_INDEX: usize = CASTLING_RIGHTS_INDEX + 4;
const TABLE_SIZE: usize = EN_PASSANT_INDEX + 8;

struct ZobristHasher {
    magic_hashes: Vec<u64>,
}

impl ZobristHasher {
    fn new(seed: u64) -> ZobristHasher {
        let mut rng = Xorshift64::new(seed);
        let magic_hashes = (0..TABLE_SIZE).map(|_| rng.next()).collect();
        ZobristHasher { magic_hashes }
    }

    fn square_hash(&self, piece: Piece, square: Square) -> u64 {
        // [square][color][kind]
        let offset = 14 * square.as_index();
        let color_offset = 7 * piece.color.as_index();
        self.magic_hashes[offset + color_offset + piece.kind.as_index()]
    }

    fn side_to_move_hash(&self) -> u64 {
        self.magic_hashes[SIDE_TO_MOVE_INDEX]
    }

    fn en_passant_hash(&self, square: Square) -> u64 {
        self.magic_hashes[EN_PASSANT_INDEX + square.file().as_index()]
    }

    fn castle_hash(&self, status: CastleStatus) -> u64 {
        let mut hash = 0;
        for (i, &flag) in [
            CastleStatus::WHITE_KINGSIDE,
            CastleStatus::WHITE_QUEENSIDE,
            CastleStatus::BLACK_KINGSIDE,
            CastleStatus::BLACK_QUEENSIDE,
        ]
        .iter()
        .enumerate()
        {
            if status.contains(flag) {
                hash ^= self.magic_hashes[CASTLING_RIGHTS_INDEX + i];
            }
        }

        hash
    }

    fn hash(&self, board: &Board) -> u64 {
        let mut running_hash = 0u64;
        for &square in SQUARES.iter() {
            if let Some(piece) = board.piece_at(square) {
                running_hash ^= self.square_hash(piece, square);
            }
        }

        if board.side_to_move() == Color::Black {
            running_hash ^= self.side_to_move_hash();
        }

        running_hash ^= self.castle_hash(board.castle_status());
        if let Some(ep_square) = board.en_passant_square() {
            running_hash ^= self.en_passant_hash(ep_square);
        }

        running_hash
    }
}

const ZOBRIST_SEED: u64 = 0xf68e_34a4_e8cc_f09a;

lazy_static! {
    static ref ZOBRIST_HASHER: ZobristHasher = ZobristHasher::new(ZOBRIST_SEED);
}

/// Computes the signature of a board from scratch.
pub fn hash(board: &Board) -> u64 {
    ZOBRIST_HASHER.hash(board)
}

pub fn modify_piece(hash: &mut u64, square: Square, piece: Piece) {
    *hash ^= ZOBRIST_HASHER.square_hash(piece, square);
}

pub fn modify_side_to_move(hash: &mut u64) {
    *hash ^= ZOBRIST_HASHER.side_to_move_hash();
}

/// Swaps the contribution of the `old` castle rights for the `new` ones.
pub fn modify_castle(hash: &mut u64, old: CastleStatus, new: CastleStatus) {
    *hash ^= ZOBRIST_HASHER.castle_hash(old) ^ ZOBRIST_HASHER.castle_hash(new);
}

pub fn modify_en_passant(hash: &mut u64, old: Option<Square>, new: Option<Square>) {
    if let Some(old) = old {
        *hash ^= ZOBRIST_HASHER.en_passant_hash(old);
    }

    if let Some(new) = new {
        *hash ^= ZOBRIST_HASHER.en_passant_hash(new);
    }
}
