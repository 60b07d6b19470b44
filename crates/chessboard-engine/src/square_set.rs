//! Sets of squares.
//!
//! A square set is a 64-bit integer where each bit represents one square,
//! which is how legal destinations are returned to callers.

use chessboard_core::Square;
use std::fmt;
use std::ops::BitOr;

/// A set of board squares.
///
/// Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8 (little-endian rank-file mapping).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(pub u64);

impl SquareSet {
    /// No squares.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Creates a set with a single square.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        SquareSet(1u64 << sq.index())
    }

    /// Returns true if the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of squares in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is in the set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Adds the given square.
    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Pops and returns the lowest square.
    #[inline]
    pub fn pop_lowest(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let sq = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Square::from_index(sq)
        }
    }

    /// Returns an iterator over the squares, a1 first.
    #[inline]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self)
    }
}

impl BitOr for SquareSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 | rhs.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for SquareSet {
    /// Draws the set as a diagram, rank 8 on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = rank * 8 + file;
                if (self.0 >> sq) & 1 == 1 {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// Iterator over the squares in a set.
pub struct SquareSetIter(SquareSet);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lowest()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SquareSetIter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn from_square() {
        let set = SquareSet::from_square(Square::A1);
        assert_eq!(set.0, 1);
        assert!(set.contains(Square::A1));
        assert!(!set.contains(Square::B1));
    }

    #[test]
    fn count() {
        assert_eq!(SquareSet::EMPTY.count(), 0);
        let set: SquareSet = Square::all().collect();
        assert_eq!(set.count(), 64);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut set = SquareSet::EMPTY;
        set.insert(sq("e4"));
        set.insert(sq("e4"));
        set.insert(sq("d5"));
        assert_eq!(set.count(), 2);
        assert_eq!(set, SquareSet::from_square(sq("e4")) | SquareSet::from_square(sq("d5")));
    }

    #[test]
    fn iterates_lowest_first() {
        let set: SquareSet = [sq("h8"), sq("a1"), sq("e4")].into_iter().collect();
        let squares: Vec<Square> = set.into_iter().collect();
        assert_eq!(squares, vec![sq("a1"), sq("e4"), sq("h8")]);
    }

    #[test]
    fn debug_lists_square_names() {
        let set: SquareSet = [sq("e3"), sq("e4")].into_iter().collect();
        assert_eq!(format!("{:?}", set), "{Square(e3), Square(e4)}");
    }

    #[test]
    fn display_draws_a_diagram() {
        let drawn = SquareSet::from_square(Square::A8).to_string();
        assert!(drawn.starts_with("8 X . "));
        assert!(drawn.ends_with("  a b c d e f g h"));
    }
}
