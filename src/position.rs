// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A `Position` is a `Board` together with the path that led to it: the
//! stack of applied moves (with enough saved state to undo each one) and the
//! number of times each board signature has occurred along that path.
use std::ops::{Deref, DerefMut};

use hashbrown::HashMap;

use crate::bitboard::BB_BACK_RANKS;
use crate::board::{Board, IrreversibleState};
use crate::error::{Error, Result};
use crate::movegen::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square};

#[derive(Copy, Clone, Debug)]
struct HistoryEntry {
    mov: Move,
    state: IrreversibleState,
}

#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    history: Vec<HistoryEntry>,
    repetitions: HashMap<u64, u32>,
}

impl Position {
    /// An empty board with White to move.
    pub fn new() -> Position {
        Position::from_board(Board::new())
    }

    pub fn from_board(board: Board) -> Position {
        let mut repetitions = HashMap::new();
        repetitions.insert(board.zobrist_hash(), 1);
        Position {
            board,
            history: Vec::new(),
            repetitions,
        }
    }

    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position> {
        let board = Board::from_fen(fen)?;
        Ok(Position::from_board(board))
    }

    pub fn from_start_position() -> Position {
        Position::from_board(Board::from_start_position())
    }

    /// Replaces the whole position with the one described by `fen`. On
    /// failure the position is left untouched.
    pub fn reset<S: AsRef<str>>(&mut self, fen: S) -> Result<()> {
        *self = Position::from_fen(fen)?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn zobrist_hash(&self) -> u64 {
        self.board.zobrist_hash()
    }

    pub fn as_fen(&self) -> String {
        self.board.as_fen()
    }

    pub fn legal_moves(&self) -> MoveVec {
        MoveGenerator::new().legal_moves(&self.board)
    }

    /// The moves applied so far, oldest first.
    pub fn history(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|entry| entry.mov)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// How many times the current board signature has occurred along the
    /// path from the last reset, the current occurrence included.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&self.board.zobrist_hash())
            .cloned()
            .unwrap_or(0)
    }
}

//
// Direct edits. These bypass move application, so the recorded history no
// longer describes how the position was reached and is discarded.
//

impl Position {
    /// Places `piece` on `square`, replacing whatever stood there. Fails
    /// without changing anything if the placement would put a pawn on a back
    /// rank or give a color a second king.
    pub fn set_piece(&mut self, square: Square, piece: Piece) -> Result<()> {
        if piece.kind == PieceKind::Pawn && BB_BACK_RANKS.test(square) {
            return Err(Error::InvalidPlacement(
                "pawns cannot stand on the first or last rank",
            ));
        }

        if piece.kind == PieceKind::King {
            if let Some(king) = self.board.king_square(piece.color) {
                if king != square {
                    return Err(Error::InvalidPlacement("a color may have only one king"));
                }
            }
        }

        self.board.remove_piece(square);
        self.board.add_piece(square, piece);
        self.after_edit();
        Ok(())
    }

    pub fn clear_square(&mut self, square: Square) -> Option<Piece> {
        let removed = self.board.remove_piece(square);
        if removed.is_some() {
            self.after_edit();
        }

        removed
    }

    /// Empties the board and resets all metadata.
    pub fn clear(&mut self) {
        *self = Position::new();
    }

    fn after_edit(&mut self) {
        self.board.sanitize_castle_status();
        if let Some(ep_square) = self.board.en_passant_square() {
            // An en-passant square only survives while the pawn that just
            // passed it is still there.
            let pusher = Piece::new(PieceKind::Pawn, self.board.side_to_move().toggle());
            let pawn_square = match pusher.color {
                Color::White => ep_square.offset(0, 1),
                Color::Black => ep_square.offset(0, -1),
            };

            if pawn_square.and_then(|sq| self.board.piece_at(sq)) != Some(pusher) {
                self.board.set_en_passant_square(None);
            }
        }

        self.history.clear();
        self.repetitions.clear();
        self.repetitions.insert(self.board.zobrist_hash(), 1);
    }
}

//
// Move application
//

impl Position {
    /// Applies a move without checking that it is legal. The move must have
    /// been generated for this position.
    pub fn apply_move(&mut self, mov: Move) {
        self.history.push(HistoryEntry {
            mov,
            state: self.board.irreversible_state(),
        });

        self.board.apply_move(mov);
        *self.repetitions.entry(self.board.zobrist_hash()).or_insert(0) += 1;
    }

    /// Takes back the last applied move, restoring the position exactly as it
    /// was, and returns the move. Returns `None` if there is no history.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        let hash = self.board.zobrist_hash();
        if let Some(count) = self.repetitions.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&hash);
            }
        }

        self.board.unmake_move(entry.mov, entry.state);
        Some(entry.mov)
    }

    /// Applies `mov` and returns a guard that undoes it when dropped.
    pub fn scoped_move(&mut self, mov: Move) -> MoveGuard {
        self.apply_move(mov);
        MoveGuard { position: self }
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::from_start_position()
    }
}

/// Borrows a position with one extra move applied. The move is taken back
/// when the guard goes out of scope.
pub struct MoveGuard<'a> {
    position: &'a mut Position,
}

impl<'a> Deref for MoveGuard<'a> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl<'a> DerefMut for MoveGuard<'a> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl<'a> Drop for MoveGuard<'a> {
    fn drop(&mut self) {
        self.position.undo();
    }
}
