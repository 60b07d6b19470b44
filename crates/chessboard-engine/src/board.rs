//! Board occupancy and the live piece set.

use chessboard_core::{File, PieceKind, PlacedPiece, Placement, PlacementError, Rect, Square, Team};
use thiserror::Error;

use crate::Geometry;

/// Errors raised while building or laying out a board.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    Occupied(Square),

    #[error("invalid board size {width}x{height}: both sides must be finite and positive")]
    InvalidGeometry { width: f64, height: f64 },

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Identifies one piece for the lifetime of a board.
///
/// Ids are handed out in placement order and never reused, so an id that
/// belonged to a captured piece simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u32);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One chess unit on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
    pub square: Square,
    /// Completed moves; gates the pawn double step and castling.
    pub move_count: u32,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    pub const fn new(kind: PieceKind, team: Team, square: Square) -> Self {
        Piece {
            kind,
            team,
            square,
            move_count: 0,
        }
    }

    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.move_count > 0
    }
}

/// A read-only view of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub square: Square,
    pub rect: Rect,
    pub piece: Option<PieceId>,
}

/// The 8x8 grid and every live piece on it.
///
/// The board is the single owner of "which piece stands where": cells hold
/// piece ids, pieces record their square, and both are only changed
/// together when a rule set applies a move.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    geometry: Geometry,
    occupancy: [Option<PieceId>; 64],
    pieces: Vec<Option<Piece>>,
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty(geometry: Geometry) -> Self {
        Board {
            geometry,
            occupancy: [None; 64],
            pieces: Vec::with_capacity(32),
        }
    }

    /// Creates a board with all 32 pieces on their starting squares.
    pub fn standard(geometry: Geometry) -> Self {
        let mut board = Board::empty(geometry);
        for team in [Team::White, Team::Black] {
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
                board.push(Piece::new(kind, team, Square::new(file, team.back_rank())));
            }
            for file in File::ALL {
                board.push(Piece::new(PieceKind::Pawn, team, Square::new(file, team.pawn_rank())));
            }
        }
        board
    }

    /// Creates a board from a placement string (see [`Placement`]).
    pub fn from_placement(placement: &str, geometry: Geometry) -> Result<Self, BoardError> {
        let placement = Placement::parse(placement)?;
        let mut board = Board::empty(geometry);
        for PlacedPiece { square, kind, team } in placement.pieces() {
            board.place(*kind, *team, *square)?;
        }
        Ok(board)
    }

    /// Places a new, unmoved piece.
    pub fn place(&mut self, kind: PieceKind, team: Team, square: Square) -> Result<PieceId, BoardError> {
        self.insert(Piece::new(kind, team, square))
    }

    /// Adds a piece on its own square. Fails if the square is taken.
    pub fn insert(&mut self, piece: Piece) -> Result<PieceId, BoardError> {
        if self.occupancy[piece.square.index() as usize].is_some() {
            return Err(BoardError::Occupied(piece.square));
        }
        Ok(self.push(piece))
    }

    fn push(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.pieces.len() as u32);
        self.occupancy[piece.square.index() as usize] = Some(id);
        self.pieces.push(Some(piece));
        id
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns a live piece by id.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the id of the piece on a square.
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<PieceId> {
        self.occupancy[square.index() as usize]
    }

    /// Returns the piece on a square together with its id.
    pub fn piece_at(&self, square: Square) -> Option<(PieceId, &Piece)> {
        let id = self.occupant(square)?;
        self.piece(id).map(|p| (id, p))
    }

    /// Iterates over live pieces in id order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (PieceId(i as u32), p)))
    }

    /// Returns the cell for a square: its rectangle and occupant.
    pub fn cell_at(&self, square: Square) -> Cell {
        Cell {
            square,
            rect: self.geometry.rect(square),
            piece: self.occupant(square),
        }
    }

    /// Iterates over all 64 cells in grid order (a8, b8, ..., h1).
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..8u8).flat_map(move |row| {
            (0..8u8).filter_map(move |col| Square::from_grid(row, col).ok().map(|sq| self.cell_at(sq)))
        })
    }

    /// Returns the square under a pixel point, if any.
    #[inline]
    pub fn point_to_square(&self, x: f64, y: f64) -> Option<Square> {
        self.geometry.point_to_square(x, y)
    }

    /// Returns the current layout.
    pub fn placement(&self) -> Placement {
        Placement::from_pieces(self.pieces().map(|(_, p)| PlacedPiece {
            square: p.square,
            kind: p.kind,
            team: p.team,
        }))
    }

    /// Returns true if cells and pieces agree: every occupied cell names a
    /// live piece standing on it, and every live piece is named by its cell.
    pub fn is_consistent(&self) -> bool {
        let cells_agree = Square::all().all(|sq| match self.occupant(sq) {
            Some(id) => self.piece(id).is_some_and(|p| p.square == sq),
            None => true,
        });
        let pieces_agree = self
            .pieces()
            .all(|(id, p)| self.occupant(p.square) == Some(id));
        cells_agree && pieces_agree
    }

    /// Moves a piece to `to` and counts the move, removing whatever stood
    /// there. Returns the removed piece.
    ///
    /// This is the only place occupancy changes after setup. It does not
    /// check legality.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) -> Option<Piece> {
        let from = self.piece(id)?.square;

        let captured = match self.occupancy[to.index() as usize] {
            Some(other) if other != id => self.pieces[other.index()].take(),
            _ => None,
        };

        self.occupancy[from.index() as usize] = None;
        self.occupancy[to.index() as usize] = Some(id);
        if let Some(piece) = self.pieces[id.index()].as_mut() {
            piece.square = to;
            piece.move_count += 1;
        }

        captured
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[cfg(test)]
mod tests {
    use super::*;
    use chessboard_core::Rank;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn geometry() -> Geometry {
        Geometry::new(640.0, 640.0).unwrap()
    }

    #[test]
    fn standard_board_has_32_pieces() {
        let board = Board::standard(geometry());
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.placement().to_string(), Placement::STANDARD);
        assert!(board.is_consistent());
    }

    #[test]
    fn standard_back_rank_order() {
        let board = Board::standard(geometry());
        let kinds: Vec<PieceKind> = File::ALL
            .iter()
            .map(|&f| board.piece_at(Square::new(f, Rank::R1)).unwrap().1.kind)
            .collect();
        assert_eq!(kinds, BACK_RANK.to_vec());
        assert_eq!(board.piece_at(Square::E8).unwrap().1.team, Team::Black);
        assert_eq!(board.piece_at(sq("d7")).unwrap().1.kind, PieceKind::Pawn);
        assert!(board.piece_at(sq("e4")).is_none());
    }

    #[test]
    fn place_rejects_occupied_square() {
        let mut board = Board::empty(geometry());
        board.place(PieceKind::Rook, Team::White, Square::A1).unwrap();
        assert_eq!(
            board.place(PieceKind::Knight, Team::Black, Square::A1),
            Err(BoardError::Occupied(Square::A1))
        );
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn from_placement_surfaces_parse_errors() {
        assert!(matches!(
            Board::from_placement("8/8/8", geometry()),
            Err(BoardError::Placement(PlacementError::RankCount(3)))
        ));
    }

    #[test]
    fn cell_at_reports_rect_and_occupant() {
        let board = Board::standard(geometry());
        let cell = board.cell_at(sq("e2"));
        assert_eq!(cell.square, sq("e2"));
        assert_eq!((cell.rect.x(), cell.rect.y()), (320.0, 480.0));
        let (id, pawn) = board.piece_at(sq("e2")).unwrap();
        assert_eq!(cell.piece, Some(id));
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert!(board.cell_at(sq("e4")).piece.is_none());
    }

    #[test]
    fn cells_run_in_grid_order() {
        let board = Board::empty(geometry());
        let squares: Vec<Square> = board.cells().map(|c| c.square).collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[7], Square::H8);
        assert_eq!(squares[63], Square::H1);
    }

    #[test]
    fn relocate_moves_and_counts() {
        let mut board = Board::standard(geometry());
        let (id, _) = board.piece_at(sq("g1")).unwrap();
        assert_eq!(board.relocate(id, sq("f3")), None);
        assert_eq!(board.occupant(sq("g1")), None);
        assert_eq!(board.occupant(sq("f3")), Some(id));
        let knight = board.piece(id).unwrap();
        assert_eq!(knight.square, sq("f3"));
        assert_eq!(knight.move_count, 1);
        assert!(knight.has_moved());
        assert!(board.is_consistent());
    }

    #[test]
    fn relocate_onto_a_piece_captures_it() {
        let mut board = Board::from_placement("8/8/8/3p4/4P3/8/8/8", geometry()).unwrap();
        let (pawn, _) = board.piece_at(sq("e4")).unwrap();
        let (victim, _) = board.piece_at(sq("d5")).unwrap();

        let captured = board.relocate(pawn, sq("d5")).unwrap();
        assert_eq!(captured.team, Team::Black);
        assert!(board.piece(victim).is_none());
        assert_eq!(board.pieces().count(), 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn ids_are_not_reused_after_capture() {
        let mut board = Board::from_placement("8/8/8/3p4/4P3/8/8/8", geometry()).unwrap();
        let (pawn, _) = board.piece_at(sq("e4")).unwrap();
        let (victim, _) = board.piece_at(sq("d5")).unwrap();
        board.relocate(pawn, sq("d5"));

        let fresh = board.place(PieceKind::Queen, Team::Black, sq("a8")).unwrap();
        assert_ne!(fresh, victim);
        assert!(board.piece(victim).is_none());
    }
}
