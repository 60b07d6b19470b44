//! Core types for an interactive chessboard.
//!
//! This crate provides the value types shared by the board and rules engine:
//! - [`PieceKind`] and [`Team`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates, including the
//!   `(row, col)` grid index used by drawing surfaces
//! - [`Move`] for recording a single displacement
//! - [`Rect`] for the pixel rectangle of a grid cell
//! - [`Placement`] for describing piece layouts as text

mod mov;
mod piece;
mod placement;
mod rect;
mod square;
mod team;

pub use mov::{Move, MoveFlag};
pub use piece::PieceKind;
pub use placement::{PlacedPiece, Placement, PlacementError};
pub use rect::Rect;
pub use square::{File, Rank, Square, SquareError};
pub use team::Team;
