// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move notation. Output is SAN with two archer forms, `A<from><to>` for a
//! step and `A<from>*<target>` for a ranged attack; archers always name
//! their origin and never use `x`. Input additionally accepts coordinate
//! notation and archer steps written without an origin.
use std::convert::TryFrom;
use std::str::FromStr;

use pest::iterators::Pair;
use pest::Parser;

use crate::board::Board;
use crate::error::{Error, Result};
use crate::moves::Move;
use crate::status::CheckOutcome;
use crate::types::{File, PieceKind, Rank, Square};

#[derive(Parser)]
#[grammar = "notation/san.pest"]
struct SanParser;

/// A parsed but not yet resolved move.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Notation {
    Castle {
        kingside: bool,
    },
    Coordinate {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    Standard(StandardMove),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct StandardMove {
    kind: Option<PieceKind>,
    from_square: Option<Square>,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to: Option<Square>,
    capture: bool,
    ranged: bool,
    promotion: Option<PieceKind>,
}

impl Notation {
    fn matches(&self, mov: Move) -> bool {
        match *self {
            Notation::Castle { kingside } => {
                mov.is_castle() && mov.is_kingside_castle() == kingside
            }
            Notation::Coordinate {
                from,
                to,
                promotion,
            } => {
                mov.source() == from
                    && mov.destination() == to
                    && mov.promotion_piece() == promotion
            }
            Notation::Standard(ref standard) => standard.matches(mov),
        }
    }
}

impl StandardMove {
    fn matches(&self, mov: Move) -> bool {
        let kind = self.kind.unwrap_or(PieceKind::Pawn);
        if mov.piece().kind != kind || Some(mov.destination()) != self.to {
            return false;
        }

        if self.from_square.map_or(false, |sq| sq != mov.source())
            || self.from_file.map_or(false, |f| f != mov.source().file())
            || self.from_rank.map_or(false, |r| r != mov.source().rank())
        {
            return false;
        }

        if mov.promotion_piece() != self.promotion {
            return false;
        }

        if kind == PieceKind::Archer {
            mov.is_ranged_attack() == self.ranged
        } else {
            mov.is_capture() == self.capture
        }
    }
}

fn square(pair: Pair<Rule>) -> Result<Square> {
    Square::from_str(pair.as_str())
}

fn promotion_kind(pair: Pair<Rule>) -> Result<PieceKind> {
    let letter = pair
        .as_str()
        .chars()
        .last()
        .ok_or_else(|| Error::InvalidNotation(pair.as_str().to_owned()))?;
    PieceKind::try_from(letter).map_err(|_| Error::InvalidNotation(pair.as_str().to_owned()))
}

fn single_char(pair: &Pair<Rule>) -> Option<char> {
    pair.as_str().chars().next()
}

fn parse_standard(pair: Pair<Rule>, kind: Option<PieceKind>) -> Result<StandardMove> {
    let mut standard = StandardMove {
        kind,
        ..StandardMove::default()
    };

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::piece => {
                standard.kind = single_char(&inner).and_then(|c| PieceKind::try_from(c).ok());
            }
            Rule::from_square => standard.from_square = Some(square(inner)?),
            Rule::from_file => {
                standard.from_file = single_char(&inner).and_then(|c| File::try_from(c).ok());
            }
            Rule::from_rank => {
                standard.from_rank = single_char(&inner).and_then(|c| Rank::try_from(c).ok());
            }
            Rule::to_square => standard.to = Some(square(inner)?),
            Rule::capture => standard.capture = true,
            Rule::ranged => standard.ranged = true,
            Rule::promotion => standard.promotion = Some(promotion_kind(inner)?),
            _ => {}
        }
    }

    Ok(standard)
}

fn parse(text: &str) -> Result<Notation> {
    let invalid = || Error::InvalidNotation(text.to_owned());
    let notation = SanParser::parse(Rule::notation, text)
        .map_err(|_| invalid())?
        .next()
        .ok_or_else(invalid)?;

    for pair in notation.into_inner() {
        match pair.as_rule() {
            Rule::castle => {
                let kingside = pair
                    .into_inner()
                    .next()
                    .map_or(false, |side| side.as_rule() == Rule::kingside_castle);
                return Ok(Notation::Castle { kingside });
            }
            Rule::coordinate => {
                let mut inner = pair.into_inner();
                let from = square(inner.next().ok_or_else(invalid)?)?;
                let to = square(inner.next().ok_or_else(invalid)?)?;
                let promotion = match inner.next() {
                    Some(promo) => Some(promotion_kind(promo)?),
                    None => None,
                };

                return Ok(Notation::Coordinate {
                    from,
                    to,
                    promotion,
                });
            }
            Rule::archer_move => {
                return parse_standard(pair, Some(PieceKind::Archer)).map(Notation::Standard);
            }
            Rule::piece_move => return parse_standard(pair, None).map(Notation::Standard),
            Rule::pawn_move => {
                return parse_standard(pair, Some(PieceKind::Pawn)).map(Notation::Standard);
            }
            _ => {}
        }
    }

    Err(invalid())
}

impl Board {
    /// Resolves a move written in SAN or coordinate notation against the
    /// legal moves of this board.
    pub fn move_from_notation(&self, text: &str) -> Result<Move> {
        let notation = parse(text.trim())?;
        let mut candidates = self
            .legal_moves()
            .into_iter()
            .filter(|&m| notation.matches(m));

        match (candidates.next(), candidates.next()) {
            (Some(mov), None) => Ok(mov),
            (None, _) => Err(Error::IllegalMove(text.to_owned())),
            (Some(_), Some(_)) => Err(Error::IllegalMove(format!("{} is ambiguous", text))),
        }
    }

    /// Writes a legal move of this board in SAN.
    pub fn move_to_san(&self, mov: Move) -> String {
        let legal = self.legal_moves();
        self.san_given_legal_moves(mov, &legal)
    }

    pub(crate) fn san_given_legal_moves(&self, mov: Move, legal: &[Move]) -> String {
        let mut buf = String::new();
        let kind = mov.piece().kind;
        if mov.is_kingside_castle() {
            buf.push_str("O-O");
        } else if mov.is_queenside_castle() {
            buf.push_str("O-O-O");
        } else if kind == PieceKind::Archer {
            buf.push('A');
            buf.push_str(&mov.source().to_string());
            if mov.is_ranged_attack() {
                buf.push('*');
            }
            buf.push_str(&mov.destination().to_string());
        } else if kind == PieceKind::Pawn {
            if mov.is_capture() {
                buf.push_str(&mov.source().file().to_string());
                buf.push('x');
            }
            buf.push_str(&mov.destination().to_string());
            if let Some(promo) = mov.promotion_piece() {
                buf.push('=');
                buf.push(promo.as_char().to_ascii_uppercase());
            }
        } else {
            buf.push(kind.as_char().to_ascii_uppercase());
            buf.push_str(&disambiguation(mov, legal));
            if mov.is_capture() {
                buf.push('x');
            }
            buf.push_str(&mov.destination().to_string());
        }

        match self.check_outcome(mov) {
            CheckOutcome::Check => buf.push('+'),
            CheckOutcome::Checkmate => buf.push('#'),
            CheckOutcome::None => {}
        }

        buf
    }
}

/// The shortest origin prefix that tells `mov` apart from the other legal
/// moves of the same piece kind to the same square.
fn disambiguation(mov: Move, legal: &[Move]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|m| {
            m.piece() == mov.piece()
                && m.destination() == mov.destination()
                && m.source() != mov.source()
        })
        .map(|m| m.source())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let source = mov.source();
    if rivals.iter().all(|sq| sq.file() != source.file()) {
        source.file().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != source.rank()) {
        source.rank().to_string()
    } else {
        source.to_string()
    }
}
