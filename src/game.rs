// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Game` facade: a position, the notation of every move played on it,
//! and the queries a front end asks between moves.
use crate::error::{Error, Result};
use crate::movegen::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::position::Position;
use crate::status::GameStatus;
use crate::types::{Color, Piece, Square, FILES, RANKS};

/// A move as presented to a front end, with its notation filled in.
///
/// `flags` holds one letter per property of the move: `n` for a plain move,
/// `b` for a pawn's two-square push, `e` for en passant, `c` for a capture,
/// `p` for a promotion, `k` and `q` for castling and `a` for an Archer's
/// ranged attack. A ranged attack is also a capture, so it reads `ca`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerboseMove {
    pub color: Color,
    pub from: String,
    pub to: String,
    pub piece: char,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<char>,
    pub flags: String,
    pub san: String,
}

impl VerboseMove {
    fn new(mov: Move, san: String) -> VerboseMove {
        VerboseMove {
            color: mov.color(),
            from: mov.source().to_string(),
            to: mov.destination().to_string(),
            piece: mov.piece().kind.as_char(),
            captured: mov.captured().map(|p| p.kind.as_char()),
            promotion: mov.promotion_piece().map(|k| k.as_char()),
            flags: flag_letters(mov),
            san,
        }
    }
}

fn flag_letters(mov: Move) -> String {
    let mut flags = String::new();
    if mov.is_double_pawn_push() {
        flags.push('b');
    }

    if mov.is_en_passant() {
        flags.push('e');
    }

    if mov.is_capture() {
        flags.push('c');
    }

    if mov.is_promotion() {
        flags.push('p');
    }

    if mov.is_kingside_castle() {
        flags.push('k');
    }

    if mov.is_queenside_castle() {
        flags.push('q');
    }

    if mov.is_ranged_attack() {
        flags.push('a');
    }

    if flags.is_empty() {
        flags.push('n');
    }

    flags
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    notation: Vec<String>,
}

impl Game {
    /// A game from the Archer starting position.
    pub fn new() -> Game {
        Game::from_position(Position::from_start_position())
    }

    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Game> {
        Ok(Game::from_position(Position::from_fen(fen)?))
    }

    pub fn from_position(position: Position) -> Game {
        Game {
            position,
            notation: Vec::new(),
        }
    }

    /// Replaces the game with the position described by `fen`. On failure the
    /// game is left untouched.
    pub fn load<S: AsRef<str>>(&mut self, fen: S) -> Result<()> {
        self.position.reset(fen)?;
        self.notation.clear();
        Ok(())
    }

    /// Returns to the Archer starting position.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn turn(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn fen(&self) -> String {
        self.position.as_fen()
    }

    /// The notation of every move played since the game was created, loaded
    /// or last edited, oldest first.
    pub fn history(&self) -> &[String] {
        &self.notation
    }

    /// The legal moves of the side to move, optionally only those of the
    /// piece on `square`.
    pub fn legal_moves(&self, square: Option<Square>) -> MoveVec {
        let movegen = MoveGenerator::new();
        match square {
            Some(square) => movegen.legal_moves_from(self.position.board(), square),
            None => movegen.legal_moves(self.position.board()),
        }
    }

    pub fn moves_san(&self, square: Option<Square>) -> Vec<String> {
        let legal = self.position.legal_moves();
        self.legal_moves(square)
            .iter()
            .map(|&mov| self.position.board().san_given_legal_moves(mov, &legal))
            .collect()
    }

    pub fn moves_verbose(&self, square: Option<Square>) -> Vec<VerboseMove> {
        let legal = self.position.legal_moves();
        self.legal_moves(square)
            .iter()
            .map(|&mov| {
                let san = self.position.board().san_given_legal_moves(mov, &legal);
                VerboseMove::new(mov, san)
            })
            .collect()
    }

    /// Plays `mov` if it is legal in the current position.
    pub fn apply_move(&mut self, mov: Move) -> Result<Move> {
        let legal = self.position.legal_moves();
        if !legal.contains(&mov) {
            return Err(Error::IllegalMove(mov.to_string()));
        }

        let san = self.position.board().san_given_legal_moves(mov, &legal);
        self.play(mov, san);
        Ok(mov)
    }

    /// Plays the move written as `text`, in standard or coordinate notation.
    pub fn apply_notation(&mut self, text: &str) -> Result<Move> {
        let mov = self.position.board().move_from_notation(text)?;
        let san = self.position.board().move_to_san(mov);
        self.play(mov, san);
        Ok(mov)
    }

    fn play(&mut self, mov: Move, san: String) {
        debug!("playing {} ({})", san, mov);
        self.position.apply_move(mov);
        self.notation.push(san);
    }

    /// Takes back the last move played.
    pub fn undo(&mut self) -> Option<Move> {
        let mov = self.position.undo()?;
        self.notation.pop();
        Some(mov)
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check()
    }

    pub fn in_checkmate(&self) -> bool {
        self.position.in_checkmate()
    }

    pub fn in_stalemate(&self) -> bool {
        self.position.in_stalemate()
    }

    pub fn in_draw(&self) -> bool {
        self.position.in_draw()
    }

    pub fn in_threefold_repetition(&self) -> bool {
        self.position.in_threefold_repetition()
    }

    pub fn insufficient_material(&self) -> bool {
        self.position.insufficient_material()
    }

    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    /// The board as an 8x8 grid, rank 8 first and the a-file first within
    /// each rank.
    pub fn board(&self) -> [[Option<Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for (row, &rank) in RANKS.iter().rev().enumerate() {
            for (col, &file) in FILES.iter().enumerate() {
                grid[row][col] = self.position.piece_at(Square::of(rank, file));
            }
        }

        grid
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    /// Places `piece` on `square` outside of the rules of play. Editing the
    /// board forgets the move history.
    pub fn put(&mut self, piece: Piece, square: Square) -> Result<()> {
        self.position.set_piece(square, piece)?;
        self.notation.clear();
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed = self.position.clear_square(square);
        if removed.is_some() {
            self.notation.clear();
        }

        removed
    }

    /// Empties the board.
    pub fn clear(&mut self) {
        self.position.clear();
        self.notation.clear();
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
