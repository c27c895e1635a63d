// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::Neg;

use crate::types::Color;

const MATE_VALUE: i32 = 9999;

/// Score is the output of a board evaluation or search, measured in
/// material units from White's point of view. A checkmate is scored as
/// exactly `MATE` in favor of the side that delivered it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Score(i32);

impl Score {
    pub const MATE: Score = Score(MATE_VALUE);
    pub const DRAW: Score = Score(0);

    /// Bounds of the search window. Every real score lies strictly inside.
    pub const MIN: Score = Score(-MATE_VALUE - 1);
    pub const MAX: Score = Score(MATE_VALUE + 1);

    pub const fn new(value: i32) -> Score {
        Score(value)
    }

    /// The score of a position in which `winner` has delivered mate.
    pub fn mate_for(winner: Color) -> Score {
        match winner {
            Color::White => Score::MATE,
            Color::Black => -Score::MATE,
        }
    }

    /// The worst possible score for `color`, used to seed a best-so-far.
    pub fn worst_for(color: Color) -> Score {
        match color {
            Color::White => Score::MIN,
            Color::Black => Score::MAX,
        }
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_mate(self) -> bool {
        self.0.abs() >= MATE_VALUE
    }

    /// Whether `self` is strictly better than `other` for `color`.
    pub fn is_better_for(self, color: Color, other: Score) -> bool {
        match color {
            Color::White => self > other,
            Color::Black => self < other,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 >= MATE_VALUE {
            write!(f, "#+")
        } else if self.0 <= -MATE_VALUE {
            write!(f, "#-")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        Score(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Score;
    use crate::types::Color;

    #[test]
    fn mate_cmp() {
        assert!(Score::mate_for(Color::White) > Score::new(8999));
        assert!(Score::mate_for(Color::Black) < Score::new(-8999));
        assert!(Score::MIN < Score::mate_for(Color::Black));
        assert!(Score::MAX > Score::mate_for(Color::White));
        assert_eq!(9999, Score::MATE.value());
    }

    #[test]
    fn better_for() {
        assert!(Score::new(5).is_better_for(Color::White, Score::new(3)));
        assert!(Score::new(3).is_better_for(Color::Black, Score::new(5)));
        assert!(!Score::new(3).is_better_for(Color::Black, Score::new(3)));
    }

    #[test]
    fn display() {
        assert_eq!("#+", Score::MATE.to_string());
        assert_eq!("#-", (-Score::MATE).to_string());
        assert_eq!("-30", Score::new(-30).to_string());
    }
}
