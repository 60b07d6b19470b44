//! Team representation.

use serde::{Deserialize, Serialize};

use crate::Rank;

/// The two opposing sets of pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Team {
    White = 0,
    Black = 1,
}

impl Team {
    /// Returns the rank step a pawn of this team advances by (+1 for White,
    /// -1 for Black).
    ///
    /// On the drawing grid White moves toward row 0 and Black toward row 7.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }

    /// Returns the rank this team's pawns start on.
    #[inline]
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Team::White => Rank::R2,
            Team::Black => Rank::R7,
        }
    }

    /// Returns the back rank for this team.
    #[inline]
    pub const fn back_rank(self) -> Rank {
        match self {
            Team::White => Rank::R1,
            Team::Black => Rank::R8,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_direction() {
        assert_eq!(Team::White.pawn_direction(), 1);
        assert_eq!(Team::Black.pawn_direction(), -1);
    }

    #[test]
    fn home_ranks() {
        assert_eq!(Team::White.pawn_rank(), Rank::R2);
        assert_eq!(Team::Black.pawn_rank(), Rank::R7);
        assert_eq!(Team::White.back_rank(), Rank::R1);
        assert_eq!(Team::Black.back_rank(), Rank::R8);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Team::White), "White");
        assert_eq!(format!("{}", Team::Black), "Black");
    }
}
