//! Board grid and piece movement rules for an interactive chessboard.
//!
//! This crate provides:
//! - [`Geometry`] - the pixel rectangle of every cell, and hit-testing
//! - [`Board`] - occupancy of the 8x8 grid and the live [`Piece`]s
//! - [`RuleSet`] - the move protocol: legal destinations, legality checks
//!   and move application, implemented by [`StandardRules`]
//! - [`DragSession`] - the grab/drag/drop state machine driven by pointer
//!   events
//! - [`EngineConfig`] - board size and rule options loaded from TOML
//!
//! Drawing is left to the caller: the board hands out rectangles and
//! piece kinds, never images.
//!
//! # Example
//!
//! ```
//! use chessboard_engine::{DragSession, Geometry, RuleSet, StandardRules};
//!
//! let rules = StandardRules::default();
//! let mut board = rules.initial_board(Geometry::new(800.0, 800.0).unwrap());
//! let mut drag = DragSession::new();
//!
//! // Pick up the e2 pawn and drop it on e4 (cells are 100px wide).
//! drag.pointer_down(&board, 450.0, 650.0).unwrap();
//! drag.pointer_move(450.0, 500.0);
//! let outcome = drag.pointer_up(&rules, &mut board, 450.0, 450.0).unwrap();
//! assert!(outcome.is_moved());
//! assert_eq!(board.placement().to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
//! ```

mod board;
mod config;
mod drag;
mod geometry;
pub mod rules;
mod square_set;

pub use board::{Board, BoardError, Cell, Piece, PieceId};
pub use config::{BoardConfig, ConfigError, EngineConfig, RulesConfig};
pub use drag::{DragSession, Grab};
pub use geometry::Geometry;
pub use rules::{CastlingRule, MoveOutcome, RuleSet, StandardRules};
pub use square_set::{SquareSet, SquareSetIter};
