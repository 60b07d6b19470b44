//! Pointer-driven grab, drag and drop.
//!
//! A piece is at rest on its square until the pointer goes down on it. It
//! then follows the pointer until release, when it either lands on the
//! release square (if the move is legal) or snaps back to where it started.
//! At most one piece is grabbed at a time.

use chessboard_core::Square;
use tracing::trace;

use crate::{Board, MoveOutcome, PieceId, RuleSet};

/// The piece currently following the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub piece: PieceId,
    pub origin: Square,
    /// Last pointer position, where the piece is drawn while grabbed.
    pub pointer: (f64, f64),
}

/// Tracks the single grabbed piece between pointer events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    grabbed: Option<Grab>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the grabbed piece, if any.
    #[inline]
    pub fn grabbed(&self) -> Option<&Grab> {
        self.grabbed.as_ref()
    }

    /// Grabs the piece under the pointer.
    ///
    /// Returns `None` without changing anything when a piece is already
    /// grabbed, the point is off the board, or the square is empty.
    pub fn pointer_down(&mut self, board: &Board, x: f64, y: f64) -> Option<PieceId> {
        if self.grabbed.is_some() {
            return None;
        }
        let origin = board.point_to_square(x, y)?;
        let piece = board.occupant(origin)?;
        trace!(%origin, ?piece, "piece grabbed");
        self.grabbed = Some(Grab {
            piece,
            origin,
            pointer: (x, y),
        });
        Some(piece)
    }

    /// Moves the grabbed piece with the pointer. Returns false when nothing
    /// is grabbed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        match self.grabbed.as_mut() {
            Some(grab) => {
                grab.pointer = (x, y);
                true
            }
            None => false,
        }
    }

    /// Drops the grabbed piece on the square under the pointer.
    ///
    /// Off-board releases snap back. Returns `None` when nothing was
    /// grabbed.
    pub fn pointer_up<R>(&mut self, rules: &R, board: &mut Board, x: f64, y: f64) -> Option<MoveOutcome>
    where
        R: RuleSet + ?Sized,
    {
        let grab = self.grabbed.take()?;
        let outcome = match board.point_to_square(x, y) {
            Some(target) => rules.apply_move(board, grab.piece, target),
            None => MoveOutcome::SnappedBack {
                piece: grab.piece,
                square: board.piece(grab.piece).map(|p| p.square),
            },
        };
        trace!(origin = %grab.origin, moved = outcome.is_moved(), "piece released");
        Some(outcome)
    }

    /// Releases the grabbed piece without moving it.
    pub fn cancel(&mut self) -> Option<Grab> {
        self.grabbed.take()
    }
}
