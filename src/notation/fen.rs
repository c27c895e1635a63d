// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::board::Board;
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{FILES, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `Board`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("empty-square count must be between 1 and 8")]
    InvalidDigit,
    #[error("two empty-square counts in a row")]
    ConsecutiveDigits,
    #[error("rank does not sum to eight squares")]
    FileDoesNotSumToEight,
    #[error("unknown piece `{0}`")]
    UnknownPiece(char),
    #[error("side to move must be `w` or `b`")]
    InvalidSideToMove,
    #[error("invalid castle rights")]
    InvalidCastle,
    #[error("invalid en-passant square")]
    InvalidEnPassant,
    #[error("missing halfmove clock")]
    EmptyHalfmove,
    #[error("invalid halfmove clock")]
    InvalidHalfmove,
    #[error("missing fullmove number")]
    EmptyFullmove,
    #[error("invalid fullmove number")]
    InvalidFullmove,
    #[error("trailing characters after fullmove number")]
    TrailingCharacters,
    #[error("{0} has more than one king")]
    TooManyKings(Color),
}

type Stream<'a> = Peekable<Chars<'a>>;

fn eat(iter: &mut Stream, expected: char) -> Result<(), FenParseError> {
    match iter.next() {
        Some(c) if c == expected => Ok(()),
        Some(c) => Err(FenParseError::UnexpectedChar(c)),
        None => Err(FenParseError::UnexpectedEnd),
    }
}

fn advance(iter: &mut Stream) {
    let _ = iter.next();
}

fn peek(iter: &mut Stream) -> Result<char, FenParseError> {
    iter.peek().cloned().ok_or(FenParseError::UnexpectedEnd)
}

fn eat_side_to_move(iter: &mut Stream) -> Result<Color, FenParseError> {
    let side = match peek(iter)? {
        'w' => Color::White,
        'b' => Color::Black,
        _ => return Err(FenParseError::InvalidSideToMove),
    };

    advance(iter);
    Ok(side)
}

fn eat_castle_status(iter: &mut Stream) -> Result<CastleStatus, FenParseError> {
    if peek(iter)? == '-' {
        advance(iter);
        return Ok(CastleStatus::NONE);
    }

    // Rights must appear in the canonical KQkq order, each at most once.
    let order = [
        ('K', CastleStatus::WHITE_KINGSIDE),
        ('Q', CastleStatus::WHITE_QUEENSIDE),
        ('k', CastleStatus::BLACK_KINGSIDE),
        ('q', CastleStatus::BLACK_QUEENSIDE),
    ];

    let mut status = CastleStatus::NONE;
    let mut next = 0;
    while let Some(&c) = iter.peek() {
        if c == ' ' {
            break;
        }

        match order[next..].iter().position(|&(letter, _)| letter == c) {
            Some(offset) => {
                status |= order[next + offset].1;
                next += offset + 1;
            }
            None => return Err(FenParseError::InvalidCastle),
        }

        advance(iter);
    }

    if status.is_empty() {
        return Err(FenParseError::InvalidCastle);
    }

    Ok(status)
}

fn eat_en_passant(iter: &mut Stream, side: Color) -> Result<Option<Square>, FenParseError> {
    let c = peek(iter)?;
    if c == '-' {
        advance(iter);
        return Ok(None);
    }

    let file = File::try_from(c).map_err(|_| FenParseError::InvalidEnPassant)?;
    advance(iter);
    let rank = Rank::try_from(peek(iter)?).map_err(|_| FenParseError::InvalidEnPassant)?;
    advance(iter);

    // The square behind a pawn that just moved two squares.
    let expected_rank = match side {
        Color::White => Rank::Six,
        Color::Black => Rank::Three,
    };

    if rank != expected_rank {
        return Err(FenParseError::InvalidEnPassant);
    }

    Ok(Some(Square::of(rank, file)))
}

fn eat_number(iter: &mut Stream) -> Option<String> {
    let mut buf = String::new();
    while let Some(&c) = iter.peek() {
        if !c.is_digit(10) {
            break;
        }

        buf.push(c);
        advance(iter);
    }

    if buf.is_empty() {
        None
    } else {
        Some(buf)
    }
}

// Leading zeros would not survive a round trip through `as_fen`.
fn parse_clock(digits: &str) -> Option<u32> {
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }

    digits.parse::<u32>().ok()
}

fn eat_halfmove(iter: &mut Stream) -> Result<u32, FenParseError> {
    let digits = eat_number(iter).ok_or(FenParseError::EmptyHalfmove)?;
    parse_clock(&digits).ok_or(FenParseError::InvalidHalfmove)
}

fn eat_fullmove(iter: &mut Stream) -> Result<u32, FenParseError> {
    let digits = eat_number(iter).ok_or(FenParseError::EmptyFullmove)?;
    match parse_clock(&digits) {
        Some(0) | None => Err(FenParseError::InvalidFullmove),
        Some(fullmove) => Ok(fullmove),
    }
}

fn eat_placement(iter: &mut Stream, board: &mut Board) -> Result<(), FenParseError> {
    for &rank in RANKS.iter().rev() {
        let mut file = File::A as usize;
        let mut previous_was_digit = false;
        while file <= File::H as usize {
            let c = peek(iter)?;
            // digits 1 through 8 indicate empty squares.
            if c.is_digit(10) {
                if c < '1' || c > '8' {
                    return Err(FenParseError::InvalidDigit);
                }

                if previous_was_digit {
                    return Err(FenParseError::ConsecutiveDigits);
                }

                file += c as usize - '0' as usize;
                if file > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                previous_was_digit = true;
                advance(iter);
                continue;
            }

            // if it's not a digit, it represents a piece.
            let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
            board.add_piece(Square::of(rank, File::from_index(file)), piece);
            previous_was_digit = false;
            advance(iter);
            file += 1;
        }

        if rank != Rank::One {
            eat(iter, '/')?;
        }
    }

    Ok(())
}

fn validate(board: &Board) -> Result<(), FenParseError> {
    for &color in &[Color::White, Color::Black] {
        if board.kings(color).count() > 1 {
            return Err(FenParseError::TooManyKings(color));
        }
    }

    Ok(())
}

impl Board {
    /// The standard Archer opening setup.
    pub fn from_start_position() -> Board {
        let mut board = Board::new();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (&file, &kind) in FILES.iter().zip(back_rank.iter()) {
            let front = if file == File::C || file == File::F {
                PieceKind::Archer
            } else {
                PieceKind::Pawn
            };

            board.add_piece(Square::of(Rank::One, file), Piece::new(kind, Color::White));
            board.add_piece(Square::of(Rank::Two, file), Piece::new(front, Color::White));
            board.add_piece(Square::of(Rank::Seven, file), Piece::new(front, Color::Black));
            board.add_piece(Square::of(Rank::Eight, file), Piece::new(kind, Color::Black));
        }

        board.set_castle_status(CastleStatus::WHITE | CastleStatus::BLACK);
        board
    }

    /// Constructs a new board from a FEN representation of a board position.
    /// Kingless positions and pawns on a back rank are accepted; positions
    /// with two kings of one color are not.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Board, FenParseError> {
        let mut board = Board::new();
        let iter = &mut fen.as_ref().chars().peekable();
        eat_placement(iter, &mut board)?;
        eat(iter, ' ')?;
        let side = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        let castle_status = eat_castle_status(iter)?;
        eat(iter, ' ')?;
        let en_passant_square = eat_en_passant(iter, side)?;
        eat(iter, ' ')?;
        let halfmove = eat_halfmove(iter)?;
        eat(iter, ' ')?;
        let fullmove = eat_fullmove(iter)?;
        if iter.peek().is_some() {
            return Err(FenParseError::TrailingCharacters);
        }

        validate(&board)?;
        board.set_side_to_move(side);
        board.set_castle_status(castle_status);
        board.set_en_passant_square(en_passant_square);
        board.set_clocks(halfmove, fullmove);
        board.rehash();
        Ok(board)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                let square = Square::of(rank, file);
                if let Some(piece) = self.piece_at(square) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    buf.push(piece.as_char());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        match self.side_to_move() {
            Color::White => buf.push('w'),
            Color::Black => buf.push('b'),
        }
        buf.push(' ');
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        if self.castle_status().is_empty() {
            buf.push('-');
        }
        buf.push(' ');
        match self.en_passant_square() {
            Some(square) => write!(&mut buf, "{}", square).unwrap(),
            None => buf.push('-'),
        }

        write!(
            &mut buf,
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_clock()
        )
        .unwrap();
        buf
    }
}
