//! Pixel layout of the 8x8 grid.

use chessboard_core::{Rect, Square};

use crate::BoardError;

/// The pixel rectangles of all 64 cells, derived once from the board size.
///
/// Cell edges are `dimension / 8 * i`, so neighbouring cells share an edge
/// value bit for bit and the last edge equals the board dimension. Together
/// with half-open [`Rect::contains`] this makes hit-testing total over the
/// board and free of double matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    width: f64,
    height: f64,
    rects: [Rect; 64],
}

impl Geometry {
    /// Lays out a board of the given pixel size.
    pub fn new(width: f64, height: f64) -> Result<Self, BoardError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(BoardError::InvalidGeometry { width, height });
        }

        let edge = |dimension: f64, i: u8| dimension / 8.0 * f64::from(i);
        let mut rects = [Rect::from_edges(0.0, 0.0, 0.0, 0.0); 64];
        for sq in Square::all() {
            let (row, col) = sq.grid_index();
            rects[sq.index() as usize] = Rect::from_edges(
                edge(width, col),
                edge(height, row),
                edge(width, col + 1),
                edge(height, row + 1),
            );
        }

        Ok(Geometry {
            width,
            height,
            rects,
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the pixel rectangle of a square.
    #[inline]
    pub fn rect(&self, sq: Square) -> Rect {
        self.rects[sq.index() as usize]
    }

    /// Returns the square whose cell contains the point, or `None` when the
    /// point is off the board.
    pub fn point_to_square(&self, x: f64, y: f64) -> Option<Square> {
        Square::all().find(|&sq| self.rect(sq).contains(x, y))
    }
}
