//! Pixel rectangles for grid cells.

/// An axis-aligned rectangle in drawing-surface pixels.
///
/// Stored by its edges so that neighbouring cells built from the same edge
/// values share them exactly. Membership is half-open: the left and top
/// edges belong to the rectangle, the right and bottom edges do not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Rect {
    /// Creates a rectangle from its edges.
    #[inline]
    pub const fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.left
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.top
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Returns the centre point, where a piece at rest is drawn.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Returns true if the point lies inside, using half-open edges.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }
}
