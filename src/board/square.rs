use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board coordinate: file 0..7 (a..h), rank 0..7 (1..8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Panics if either coordinate is off the board; use `try_new` for
    /// untrusted input.
    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square out of range");
        Self { file, rank }
    }

    pub const fn try_new(file: i8, rank: i8) -> Option<Self> {
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Self { file: file as u8, rank: rank as u8 })
        }
    }

    pub const fn file(self) -> u8 {
        self.file
    }

    pub const fn rank(self) -> u8 {
        self.rank
    }

    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::try_new(self.file as i8 + df, self.rank as i8 + dr)
    }

    /// King-move distance.
    pub fn chebyshev(self, other: Square) -> u8 {
        let df = (self.file as i8 - other.file as i8).unsigned_abs();
        let dr = (self.rank as i8 - other.rank as i8).unsigned_abs();
        df.max(dr)
    }

    /// All 64 squares, rank 1 first, file a first within a rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return Err(format!("invalid square: {s:?}"));
        }
        Ok(Square { file: b[0] - b'a', rank: b[1] - b'1' })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_algebraic() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!((sq.file(), sq.rank()), (4, 3));
        assert_eq!(sq.to_string(), "e4");
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
    }

    #[test]
    fn offset_stays_on_board() {
        let a1 = Square::new(0, 0);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(1, 2), Some(Square::new(1, 2)));
        assert_eq!(Square::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn chebyshev_distance() {
        assert_eq!(Square::new(0, 0).chebyshev(Square::new(7, 3)), 7);
        assert_eq!(Square::new(4, 4).chebyshev(Square::new(3, 5)), 1);
        assert_eq!(Square::new(4, 4).chebyshev(Square::new(4, 4)), 0);
    }
}
