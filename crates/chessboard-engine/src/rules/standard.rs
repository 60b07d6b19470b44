//! Standard chess movement.

use chessboard_core::{Move, MoveFlag, PieceKind, Square};
use tracing::{debug, trace};

use super::{CastlingRule, MoveOutcome, RuleSet};
use crate::{Board, Geometry, Piece, PieceId, SquareSet};

/// Offsets are `(files, ranks)`.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Ordinary piece movement, without check, turn order, en passant or
/// promotion.
///
/// - Pawns step forward onto empty squares, double step from their starting
///   rank before their first move, and capture diagonally forward.
/// - Knights and kings step to fixed offsets that are empty or hold an
///   opposing piece.
/// - Bishops, rooks and queens slide until the edge, stopping before an own
///   piece or on an opposing one.
/// - An unmoved king may castle two files toward an unmoved rook, as
///   selected by [`CastlingRule`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardRules {
    pub castling: CastlingRule,
}

impl StandardRules {
    pub const fn new(castling: CastlingRule) -> Self {
        StandardRules { castling }
    }

    fn pawn_destinations(board: &Board, pawn: &Piece) -> SquareSet {
        let mut destinations = SquareSet::EMPTY;
        let forward = pawn.team.pawn_direction();

        if let Some(one) = pawn.square.offset(0, forward) {
            if board.occupant(one).is_none() {
                destinations.insert(one);

                let at_start = !pawn.has_moved() && pawn.square.rank() == pawn.team.pawn_rank();
                if let Some(two) = one.offset(0, forward).filter(|_| at_start) {
                    if board.occupant(two).is_none() {
                        destinations.insert(two);
                    }
                }
            }
        }

        for side in [-1, 1] {
            if let Some(target) = pawn.square.offset(side, forward) {
                if let Some((_, other)) = board.piece_at(target) {
                    if other.team != pawn.team {
                        destinations.insert(target);
                    }
                }
            }
        }

        destinations
    }

    fn step_destinations(board: &Board, piece: &Piece, offsets: &[(i8, i8)]) -> SquareSet {
        offsets
            .iter()
            .filter_map(|&(files, ranks)| piece.square.offset(files, ranks))
            .filter(|&sq| match board.piece_at(sq) {
                Some((_, other)) => other.team != piece.team,
                None => true,
            })
            .collect()
    }

    fn slide_destinations(board: &Board, piece: &Piece, directions: &[(i8, i8)]) -> SquareSet {
        let mut destinations = SquareSet::EMPTY;
        for &(files, ranks) in directions {
            let mut current = piece.square;
            while let Some(next) = current.offset(files, ranks) {
                match board.piece_at(next) {
                    None => destinations.insert(next),
                    Some((_, other)) => {
                        if other.team != piece.team {
                            destinations.insert(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
        destinations
    }

    fn castling_destinations(&self, board: &Board, king: &Piece) -> SquareSet {
        let mut destinations = SquareSet::EMPTY;
        if king.has_moved() {
            return destinations;
        }

        for direction in [-1, 1] {
            let Some((rook_square, rook)) = first_piece(board, king.square, direction) else {
                continue;
            };
            let distance = (rook_square.file().index() as i8 - king.square.file().index() as i8).abs();
            let qualifies = rook.kind == PieceKind::Rook
                && !rook.has_moved()
                && distance >= 3
                && match self.castling {
                    CastlingRule::Standard => rook.team == king.team,
                    CastlingRule::FirstPieceFound => true,
                };
            trace!(
                king = %king.square,
                rook = %rook_square,
                qualifies,
                "castling probe"
            );
            if qualifies {
                if let Some(target) = king.square.offset(2 * direction, 0) {
                    destinations.insert(target);
                }
            }
        }

        destinations
    }

    /// Moves the rook beyond a castled king onto the square the king
    /// crossed. The rook's path runs through the king, so this goes straight
    /// to the commit without a legality check.
    fn shift_castling_rook(
        board: &mut Board,
        king_square: Square,
        direction: i8,
    ) -> Option<(PieceId, Move)> {
        let (rook_square, _) = first_piece(board, king_square, direction)?;
        let (rook, _) = board.piece_at(rook_square)?;
        let landing = king_square.offset(-direction, 0)?;

        board.relocate(rook, landing);
        trace!(from = %rook_square, to = %landing, "castling rook shifted");
        Some((rook, Move::normal(rook_square, landing)))
    }
}

/// Returns the first piece met walking along the rank from `from`.
fn first_piece(board: &Board, from: Square, direction: i8) -> Option<(Square, &Piece)> {
    let mut current = from;
    while let Some(next) = current.offset(direction, 0) {
        if let Some((_, piece)) = board.piece_at(next) {
            return Some((next, piece));
        }
        current = next;
    }
    None
}

impl RuleSet for StandardRules {
    fn initial_board(&self, geometry: Geometry) -> Board {
        Board::standard(geometry)
    }

    fn legal_destinations(&self, board: &Board, piece: PieceId) -> SquareSet {
        let Some(piece) = board.piece(piece) else {
            return SquareSet::EMPTY;
        };

        match piece.kind {
            PieceKind::Pawn => Self::pawn_destinations(board, piece),
            PieceKind::Knight => Self::step_destinations(board, piece, &KNIGHT_OFFSETS),
            PieceKind::Bishop => Self::slide_destinations(board, piece, &BISHOP_DIRECTIONS),
            PieceKind::Rook => Self::slide_destinations(board, piece, &ROOK_DIRECTIONS),
            PieceKind::Queen => Self::slide_destinations(board, piece, &QUEEN_DIRECTIONS),
            PieceKind::King => {
                Self::step_destinations(board, piece, &QUEEN_DIRECTIONS)
                    | self.castling_destinations(board, piece)
            }
        }
    }

    fn apply_move(&self, board: &mut Board, id: PieceId, to: Square) -> MoveOutcome {
        let Some(piece) = board.piece(id).copied() else {
            debug!(?id, %to, "move requested for a piece that is not on the board");
            return MoveOutcome::SnappedBack {
                piece: id,
                square: None,
            };
        };

        if !self.is_legal(board, id, to) {
            debug!(kind = %piece.kind, from = %piece.square, %to, "illegal move, snapping back");
            return MoveOutcome::SnappedBack {
                piece: id,
                square: Some(piece.square),
            };
        }

        let from = piece.square;
        let file_delta = to.file().index() as i8 - from.file().index() as i8;
        let rank_delta = to.rank().index() as i8 - from.rank().index() as i8;
        let castling = piece.kind == PieceKind::King && rank_delta == 0 && file_delta.abs() == 2;

        let flag = if castling && file_delta > 0 {
            MoveFlag::CastleKingside
        } else if castling {
            MoveFlag::CastleQueenside
        } else if board.occupant(to).is_some() {
            MoveFlag::Capture
        } else if piece.kind == PieceKind::Pawn && rank_delta.abs() == 2 {
            MoveFlag::DoublePush
        } else {
            MoveFlag::Normal
        };

        let captured = board.relocate(id, to);
        let castle = if flag.is_castling() {
            Self::shift_castling_rook(board, to, file_delta.signum())
        } else {
            None
        };

        let mv = Move::new(from, to, flag);
        debug!(kind = %piece.kind, team = %piece.team, mv = %mv, ?flag, "move applied");
        if let Some(victim) = &captured {
            debug!(kind = %victim.kind, team = %victim.team, square = %to, "piece captured");
        }

        MoveOutcome::Moved {
            piece: id,
            mv,
            captured,
            castle,
        }
    }
}
