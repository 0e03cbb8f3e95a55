//! Common types for the puzzle engine: solving errors.

use crate::tile::Value;
use core::fmt;

/// Errors raised while deducing cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// A single cell's requested value contradicts its current value under
    /// the refinement lattice.
    InvalidMove {
        row: usize,
        col: usize,
        current: Value,
        requested: Value,
    },
    /// A strategy derived a structurally impossible global state that is not
    /// attributable to one cell alone.
    InvalidBoard(String),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::InvalidMove {
                row,
                col,
                current,
                requested,
            } => write!(
                f,
                "invalid move at ({row},{col}): cannot change {current:?} to {requested:?}"
            ),
            PuzzleError::InvalidBoard(reason) => write!(f, "invalid board: {reason}"),
        }
    }
}

impl std::error::Error for PuzzleError {}
