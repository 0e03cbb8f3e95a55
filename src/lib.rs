//! Solver for Battleship-solitaire (bimaru) deduction puzzles.
//!
//! Given a square grid with per-row and per-column ship-cell targets and a
//! maximum ship length, the engine deduces, cell by cell, whether each cell
//! is water or a ship segment. Deduction is driven by a leveled fixed-point
//! loop of increasingly expensive strategies, up to a branch-and-prune
//! lookahead over cloned boards. The engine only ever derives facts forced
//! by the current state; it is not a general backtracking search.

mod board;
mod common;
mod journal;
mod logging;
mod puzzle;
mod ship;
mod solver;
mod tile;

pub use board::{Board, Lane};
pub use common::PuzzleError;
pub use journal::Journal;
pub use logging::init_logging;
pub use puzzle::{ParseError, Puzzle};
pub use ship::{Fleet, Orientation, Ship};
pub use solver::{apply_level, is_complete, solve, solve_easiest, MAX_LEVEL};
pub use tile::{Dir, Value};
