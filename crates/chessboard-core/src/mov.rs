//! Move representation.

use crate::Square;
use std::fmt;

/// What kind of displacement a move was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Step or slide onto an empty square.
    Normal = 0,
    /// Pawn double step from its starting rank.
    DoublePush = 1,
    /// Move onto a square held by the opposing team.
    Capture = 2,
    /// King two files toward the h-side rook.
    CastleKingside = 3,
    /// King two files toward the a-side rook.
    CastleQueenside = 4,
}

impl MoveFlag {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A single displacement of one piece.
///
/// Encoded compactly: 6 bits from, 6 bits to, 4 bits flags = 16 bits total.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        let encoded = (from.index() as u16) | ((to.index() as u16) << 6) | ((flag as u16) << 12);
        Move(encoded)
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: masked to 6 bits, always valid square index
        unsafe { Square::from_index_unchecked((self.0 & 0x3F) as u8) }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: masked to 6 bits, always valid square index
        unsafe { Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as u8) }
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match (self.0 >> 12) as u8 {
            1 => MoveFlag::DoublePush,
            2 => MoveFlag::Capture,
            3 => MoveFlag::CastleKingside,
            4 => MoveFlag::CastleQueenside,
            _ => MoveFlag::Normal,
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}, {:?})", self.from(), self.to(), self.flag())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())
    }
}
