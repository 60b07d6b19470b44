//! Piece placement strings.
//!
//! A placement string is the board field of FEN: ranks 8 down to 1
//! separated by `/`, digits for runs of empty squares, and one letter per
//! piece (`PNBRQK` for White, `pnbrqk` for Black).

use std::fmt;

use thiserror::Error;

use crate::{File, PieceKind, Rank, Square, Team};

/// Errors that can occur when parsing placement strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("invalid placement: expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("invalid character '{ch}' in rank {rank}")]
    InvalidChar { ch: char, rank: u8 },

    #[error("rank {rank} has {squares} squares, expected 8")]
    RankWidth { rank: u8, squares: u32 },
}

/// One piece in a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub square: Square,
    pub kind: PieceKind,
    pub team: Team,
}

/// A parsed piece layout, in the order the string lists it (a8 first).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    pieces: Vec<PlacedPiece>,
}

impl Placement {
    /// The standard starting layout.
    pub const STANDARD: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Parses a placement string.
    pub fn parse(placement: &str) -> Result<Self, PlacementError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::RankCount(ranks.len()));
        }

        let mut pieces = Vec::new();
        for (rank_str, rank) in ranks.iter().zip(Rank::ALL.iter().rev()) {
            let rank_number = rank.index() + 1;
            let mut squares = 0u32;
            for ch in rank_str.chars() {
                if let Some(run) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    squares += run;
                } else if let Some((kind, team)) = PieceKind::from_char(ch) {
                    if let Some(file) = File::from_index(squares as u8) {
                        pieces.push(PlacedPiece {
                            square: Square::new(file, *rank),
                            kind,
                            team,
                        });
                    }
                    squares += 1;
                } else {
                    return Err(PlacementError::InvalidChar {
                        ch,
                        rank: rank_number,
                    });
                }
            }
            if squares != 8 {
                return Err(PlacementError::RankWidth {
                    rank: rank_number,
                    squares,
                });
            }
        }

        Ok(Placement { pieces })
    }

    /// Builds a placement from pieces in any order.
    pub fn from_pieces(pieces: impl IntoIterator<Item = PlacedPiece>) -> Self {
        Placement {
            pieces: pieces.into_iter().collect(),
        }
    }

    /// Returns the pieces in this placement.
    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    fn at(&self, square: Square) -> Option<&PlacedPiece> {
        self.pieces.iter().find(|p| p.square == square)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in Rank::ALL.iter().rev().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::ALL {
                match self.at(Square::new(file, *rank)) {
                    Some(p) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", p.kind.to_char(p.team))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_standard() {
        let placement = Placement::parse(Placement::STANDARD).unwrap();
        assert_eq!(placement.pieces().len(), 32);
        assert_eq!(
            placement.pieces()[0],
            PlacedPiece {
                square: Square::A8,
                kind: PieceKind::Rook,
                team: Team::Black,
            }
        );
        let e1 = placement.at(Square::E1).unwrap();
        assert_eq!((e1.kind, e1.team), (PieceKind::King, Team::White));
    }

    #[test]
    fn display_round_trips() {
        for s in [
            Placement::STANDARD,
            "r3k2r/8/8/8/8/8/8/R3K2R",
            "8/8/8/8/8/8/8/8",
            "4k3/8/8/3pP3/8/8/8/4K3",
        ] {
            assert_eq!(Placement::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn from_pieces_orders_by_board_when_displayed() {
        let placement = Placement::from_pieces([
            PlacedPiece {
                square: Square::E1,
                kind: PieceKind::King,
                team: Team::White,
            },
            PlacedPiece {
                square: Square::E8,
                kind: PieceKind::King,
                team: Team::Black,
            },
        ]);
        assert_eq!(placement.to_string(), "4k3/8/8/8/8/8/8/4K3");
    }

    #[test]
    fn invalid_rank_count() {
        assert_eq!(
            Placement::parse("8/8/8/8/8/8/8"),
            Err(PlacementError::RankCount(7))
        );
    }

    #[test]
    fn invalid_char() {
        assert_eq!(
            Placement::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR"),
            Err(PlacementError::InvalidChar { ch: 'X', rank: 2 })
        );
        assert!(matches!(
            Placement::parse("8/8/8/8/8/8/8/07"),
            Err(PlacementError::InvalidChar { ch: '0', rank: 1 })
        ));
    }

    #[test]
    fn invalid_rank_width() {
        assert_eq!(
            Placement::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(PlacementError::RankWidth {
                rank: 8,
                squares: 9
            })
        );
        assert_eq!(
            Placement::parse("8/8/8/8/8/8/8/7"),
            Err(PlacementError::RankWidth {
                rank: 1,
                squares: 7
            })
        );
    }

    #[test]
    fn error_display() {
        let err = PlacementError::RankCount(3);
        assert!(err.to_string().contains('3'));
        let err = PlacementError::InvalidChar { ch: 'x', rank: 4 };
        assert!(err.to_string().contains("'x'"));
    }
}
