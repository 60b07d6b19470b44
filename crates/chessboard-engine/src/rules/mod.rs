//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait, the move protocol the input
//! layer drives: ask for a piece's legal destinations, check a candidate
//! square, and apply a confirmed move. [`StandardRules`] is the
//! implementation for ordinary chess movement.

mod standard;

pub use standard::StandardRules;

use chessboard_core::{Move, Square};
use serde::{Deserialize, Serialize};

use crate::{Board, Geometry, Piece, PieceId, SquareSet};

/// Which rook qualifies a king for castling.
///
/// In both cases the king probes each horizontal direction and only looks
/// at the first piece it meets, so the squares between king and rook are
/// always empty, and the rook must sit at least three files away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CastlingRule {
    /// The first piece met must be an unmoved rook of the king's team.
    #[default]
    Standard,
    /// Any unmoved rook met first qualifies, whichever team it belongs to.
    /// It must still stand at least three files from the king, so the
    /// rook's landing square lies between the two.
    FirstPieceFound,
}

/// What happened to a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The request was illegal; nothing changed and the piece stays on
    /// `square` (`None` if the id no longer names a live piece).
    SnappedBack {
        piece: PieceId,
        square: Option<Square>,
    },
    /// The piece moved.
    Moved {
        piece: PieceId,
        mv: Move,
        /// The opposing piece that stood on the destination.
        captured: Option<Piece>,
        /// The rook that moved along with a castling king.
        castle: Option<(PieceId, Move)>,
    },
}

impl MoveOutcome {
    /// Returns true if the board changed.
    #[inline]
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    /// Returns the square the requested piece rests on afterwards.
    pub fn square(&self) -> Option<Square> {
        match self {
            MoveOutcome::SnappedBack { square, .. } => *square,
            MoveOutcome::Moved { mv, .. } => Some(mv.to()),
        }
    }
}

/// The move protocol.
///
/// Generation only reads the board; [`apply_move`](RuleSet::apply_move) is
/// the single writer, and it finishes every change (including a castling
/// rook) before it returns.
///
/// # Example
///
/// ```
/// use chessboard_engine::{Geometry, RuleSet, StandardRules};
///
/// let rules = StandardRules::default();
/// let mut board = rules.initial_board(Geometry::new(640.0, 640.0).unwrap());
/// let (pawn, _) = board.piece_at("e2".parse().unwrap()).unwrap();
/// assert_eq!(rules.legal_destinations(&board, pawn).count(), 2);
///
/// let outcome = rules.apply_move(&mut board, pawn, "e4".parse().unwrap());
/// assert!(outcome.is_moved());
/// ```
pub trait RuleSet {
    /// Returns a board in the starting layout.
    fn initial_board(&self, geometry: Geometry) -> Board;

    /// Returns every square the piece may move to. Empty for ids that no
    /// longer name a live piece.
    fn legal_destinations(&self, board: &Board, piece: PieceId) -> SquareSet;

    /// Returns true if `to` is one of the piece's legal destinations.
    fn is_legal(&self, board: &Board, piece: PieceId, to: Square) -> bool {
        self.legal_destinations(board, piece).contains(to)
    }

    /// Moves the piece if the move is legal, otherwise leaves the board
    /// untouched and reports a snap-back.
    fn apply_move(&self, board: &mut Board, piece: PieceId, to: Square) -> MoveOutcome;
}
