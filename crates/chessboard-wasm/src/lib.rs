//! WebAssembly bindings for the interactive chessboard.
//!
//! The JavaScript host owns the canvas: it forwards pointer and touch
//! events here and redraws from [`ChessBoard::snapshot`] afterwards. This
//! crate never touches the DOM or images.
//!
//! # Usage
//!
//! ```javascript
//! import init, { ChessBoard } from 'chessboard-wasm';
//!
//! await init();
//!
//! const size = Math.round(Math.min(innerHeight, innerWidth) / 10) * 8;
//! const board = new ChessBoard(size, size);
//!
//! canvas.addEventListener("pointerdown", e => board.pointerDown(e.offsetX, e.offsetY) && draw());
//! canvas.addEventListener("pointermove", e => board.pointerMove(e.offsetX, e.offsetY) && draw());
//! window.addEventListener("pointerup", e => { board.pointerUp(e.offsetX, e.offsetY); draw(); });
//!
//! function draw() {
//!   const { cells, pieces, grabbed } = board.snapshot();
//!   for (const c of cells) {
//!     ctx.fillStyle = c.light ? light : dark;
//!     ctx.fillRect(c.x, c.y, c.w, c.h);
//!     ctx.fillText(c.square, c.x + 2, c.y + 12);
//!   }
//!   // then each piece in its rect, then the grabbed piece at the pointer
//! }
//! ```

use chessboard_core::{PieceKind, Square, Team};
use chessboard_engine::{Board, DragSession, EngineConfig, Geometry, RuleSet, StandardRules};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One square of the board, labelled with its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub square: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Light cells sit where row and column parity agree, a8 included.
    pub light: bool,
}

/// One piece as the host should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceView {
    pub square: String,
    pub kind: PieceKind,
    pub team: Team,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// True while the piece follows the pointer instead of resting in its
    /// cell.
    pub grabbed: bool,
}

/// The grabbed piece's floating position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrabView {
    pub origin: String,
    pub x: f64,
    pub y: f64,
    /// Squares the piece may be dropped on, for highlighting.
    pub destinations: Vec<String>,
}

/// Everything the host needs to redraw the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    /// All 64 cells in grid order, a8 first.
    pub cells: Vec<CellView>,
    pub pieces: Vec<PieceView>,
    pub grabbed: Option<GrabView>,
}

/// An interactive board that can be driven from JavaScript.
#[wasm_bindgen]
pub struct ChessBoard {
    board: Board,
    rules: StandardRules,
    drag: DragSession,
}

#[wasm_bindgen]
impl ChessBoard {
    /// Creates a board of the given pixel size in the starting layout.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<ChessBoard, JsError> {
        let geometry = Geometry::new(width, height).map_err(|e| JsError::new(&e.to_string()))?;
        let rules = StandardRules::default();
        Ok(ChessBoard {
            board: rules.initial_board(geometry),
            rules,
            drag: DragSession::new(),
        })
    }

    /// Creates a board from a TOML configuration string.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(toml: &str) -> Result<ChessBoard, JsError> {
        let config = EngineConfig::from_toml_str(toml).map_err(|e| JsError::new(&e.to_string()))?;
        let geometry = config.geometry().map_err(|e| JsError::new(&e.to_string()))?;
        let rules = config.rules();
        Ok(ChessBoard {
            board: rules.initial_board(geometry),
            rules,
            drag: DragSession::new(),
        })
    }

    /// Creates a board with a custom layout, e.g. "r3k2r/8/8/8/8/8/8/R3K2R".
    #[wasm_bindgen(js_name = fromPlacement)]
    pub fn from_placement(placement: &str, width: f64, height: f64) -> Result<ChessBoard, JsError> {
        let geometry = Geometry::new(width, height).map_err(|e| JsError::new(&e.to_string()))?;
        let board = Board::from_placement(placement, geometry).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ChessBoard {
            board,
            rules: StandardRules::default(),
            drag: DragSession::new(),
        })
    }

    /// Returns the current layout as a placement string.
    pub fn placement(&self) -> String {
        self.board.placement().to_string()
    }

    /// Returns the piece on a square as a letter ("P" white pawn, "k" black
    /// king), or null if the square is empty.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, square: &str) -> Result<Option<String>, JsError> {
        let sq = parse_square(square)?;
        Ok(self.piece_char(sq).map(String::from))
    }

    /// Returns the square under a canvas point, or null off the board.
    #[wasm_bindgen(js_name = squareAt)]
    pub fn square_at(&self, x: f64, y: f64) -> Option<String> {
        self.board.point_to_square(x, y).map(|sq| sq.to_string())
    }

    /// Returns `[x, y, w, h]` of a square's cell.
    #[wasm_bindgen(js_name = cellRect)]
    pub fn cell_rect(&self, square: &str) -> Result<Vec<f64>, JsError> {
        let rect = self.board.cell_at(parse_square(square)?).rect;
        Ok(vec![rect.x(), rect.y(), rect.width(), rect.height()])
    }

    /// Returns the squares the piece on `square` may move to.
    #[wasm_bindgen(js_name = legalDestinations)]
    pub fn legal_destinations(&self, square: &str) -> Result<Vec<String>, JsError> {
        let sq = parse_square(square)?;
        Ok(self.destinations_from(sq))
    }

    /// Starts dragging the piece under the pointer. Returns true if a piece
    /// was grabbed.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.drag.pointer_down(&self.board, x, y).is_some()
    }

    /// Moves the grabbed piece with the pointer. Returns true if a redraw is
    /// needed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.drag.pointer_move(x, y)
    }

    /// Drops the grabbed piece. Returns true if the board changed; false
    /// when the piece snapped back or nothing was grabbed.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.drag
            .pointer_up(&self.rules, &mut self.board, x, y)
            .is_some_and(|outcome| outcome.is_moved())
    }

    /// Returns the origin square of the grabbed piece, or null.
    #[wasm_bindgen(js_name = grabbedSquare)]
    pub fn grabbed_square(&self) -> Option<String> {
        self.drag.grabbed().map(|g| g.origin.to_string())
    }

    /// Returns the [`RenderSnapshot`] as a plain JavaScript object.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.render_snapshot()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Puts every piece back on its starting square.
    pub fn reset(&mut self) {
        self.drag.cancel();
        self.board = self.rules.initial_board(self.board.geometry().clone());
    }
}

impl ChessBoard {
    /// Builds the data behind [`ChessBoard::snapshot`].
    pub fn render_snapshot(&self) -> RenderSnapshot {
        let grab = self.drag.grabbed();
        let cells = self
            .board
            .cells()
            .map(|cell| {
                let (row, col) = cell.square.grid_index();
                CellView {
                    square: cell.square.to_string(),
                    x: cell.rect.x(),
                    y: cell.rect.y(),
                    w: cell.rect.width(),
                    h: cell.rect.height(),
                    light: row % 2 == col % 2,
                }
            })
            .collect();
        let pieces = self
            .board
            .pieces()
            .map(|(id, piece)| {
                let rect = self.board.cell_at(piece.square).rect;
                PieceView {
                    square: piece.square.to_string(),
                    kind: piece.kind,
                    team: piece.team,
                    x: rect.x(),
                    y: rect.y(),
                    w: rect.width(),
                    h: rect.height(),
                    grabbed: grab.is_some_and(|g| g.piece == id),
                }
            })
            .collect();
        let grabbed = grab.map(|g| GrabView {
            origin: g.origin.to_string(),
            x: g.pointer.0,
            y: g.pointer.1,
            destinations: self.destinations_from(g.origin),
        });
        RenderSnapshot {
            cells,
            pieces,
            grabbed,
        }
    }

    fn piece_char(&self, sq: Square) -> Option<char> {
        self.board
            .piece_at(sq)
            .map(|(_, piece)| piece.kind.to_char(piece.team))
    }

    fn destinations_from(&self, sq: Square) -> Vec<String> {
        match self.board.occupant(sq) {
            Some(id) => self
                .rules
                .legal_destinations(&self.board, id)
                .into_iter()
                .map(|d| d.to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

fn parse_square(square: &str) -> Result<Square, JsError> {
    square
        .parse::<Square>()
        .map_err(|e| JsError::new(&e.to_string()))
}
