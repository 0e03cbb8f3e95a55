//! Ship placements: derived views over contiguous runs of board cells.
//!
//! A [`Ship`] is never stored on the board; it is re-derived from the
//! current cell values whenever candidates are enumerated. The same value
//! type doubles as the blacklist key, so equality and hashing are purely
//! structural: start coordinate, length and orientation.

use crate::board::{Board, Lane};
use crate::common::PuzzleError;
use crate::tile::Value;
use core::fmt;
use rustc_hash::FxHashMap;

/// Orientation of a multi-cell ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The lane type this orientation runs along.
    pub fn lane(self) -> Lane {
        match self {
            Orientation::Horizontal => Lane::Row,
            Orientation::Vertical => Lane::Col,
        }
    }
}

/// A confirmed or potential ship placement.
///
/// Singletons (submarines) carry no orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ship {
    row: usize,
    col: usize,
    size: usize,
    orientation: Option<Orientation>,
}

impl Ship {
    /// A single-cell placement at (`row`, `col`).
    pub fn sub(row: usize, col: usize) -> Self {
        Ship {
            row,
            col,
            size: 1,
            orientation: None,
        }
    }

    /// A multi-cell placement starting at its northern- or western-most cell.
    pub fn run(row: usize, col: usize, size: usize, orientation: Orientation) -> Self {
        debug_assert!(size >= 2);
        Ship {
            row,
            col,
            size,
            orientation: Some(orientation),
        }
    }

    /// Number of cells the placement occupies.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Northern- or western-most occupied cell.
    pub fn start(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Southern- or eastern-most occupied cell.
    pub fn end(&self) -> (usize, usize) {
        match self.orientation {
            Some(Orientation::Horizontal) => (self.row, self.col + self.size - 1),
            Some(Orientation::Vertical) => (self.row + self.size - 1, self.col),
            None => (self.row, self.col),
        }
    }

    /// Orientation of the placement; `None` for singletons.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Occupied cells from start to end.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = match self.orientation {
            Some(Orientation::Horizontal) => (0, 1),
            Some(Orientation::Vertical) => (1, 0),
            None => (0, 0),
        };
        (0..self.size).map(move |k| (self.row + k * dr, self.col + k * dc))
    }

    /// True if the placement occupies (`row`, `col`).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|cell| cell == (row, col))
    }

    /// True if every occupied cell already holds the specific value this
    /// placement implies: directional ends, orientation-specific interior,
    /// or the submarine value for singletons.
    pub fn is_confirmed(&self, board: &Board) -> bool {
        let Some(orientation) = self.orientation else {
            return board.value(self.row, self.col) == Value::ShipSub;
        };
        let (start, mid, end) = segment_values(orientation);
        self.cells().enumerate().all(|(k, (r, c))| {
            let expected = if k == 0 {
                start
            } else if k == self.size - 1 {
                end
            } else {
                mid
            };
            board.value(r, c) == expected
        })
    }

    /// Writes the specific segment values for this placement into the board.
    ///
    /// Returns whether any cell changed. Fails if the placement contradicts
    /// the current board state.
    pub fn confirm(&self, board: &mut Board) -> Result<bool, PuzzleError> {
        let Some(orientation) = self.orientation else {
            return board.set_value(self.row, self.col, Value::ShipSub);
        };
        let (start, mid, end) = segment_values(orientation);
        let (sr, sc) = self.start();
        let (er, ec) = self.end();
        let mut changed = board.set_value(sr, sc, start)?;
        changed |= board.set_value(er, ec, end)?;
        for (r, c) in self.cells().skip(1).take(self.size - 2) {
            changed |= board.set_value(r, c, mid)?;
        }
        Ok(changed)
    }

    /// True if this placement and `other` cannot both exist in any valid
    /// solution of `board`.
    ///
    /// Three tests, cheapest first: the mandatory water buffer (this
    /// placement's bounding box grown by one cell) touching the other's
    /// cells; two placements competing for the last missing ship of their
    /// size; and the combined newly-occupied cells overflowing a shared
    /// lane's target sum.
    pub fn conflicts(&self, other: &Ship, board: &Board) -> bool {
        let (sr, sc) = self.start();
        let (er, ec) = self.end();
        let (or1, oc1) = other.start();
        let (or2, oc2) = other.end();
        let r1 = sr as isize - 1;
        let c1 = sc as isize - 1;
        let r2 = er as isize + 1;
        let c2 = ec as isize + 1;
        if r1 <= or2 as isize
            && (or1 as isize) <= r2
            && c1 <= oc2 as isize
            && (oc1 as isize) <= c2
        {
            return true;
        }
        if self.size == other.size && board.fleet().missing(self.size) < 2 {
            return true;
        }
        // Lane accounting over the cells both placements would newly occupy.
        let mut row_adds: FxHashMap<usize, usize> = FxHashMap::default();
        let mut col_adds: FxHashMap<usize, usize> = FxHashMap::default();
        for (r, c) in self.cells().chain(other.cells()) {
            if !board.value(r, c).is_ship() {
                *row_adds.entry(r).or_insert(0) += 1;
                *col_adds.entry(c).or_insert(0) += 1;
            }
        }
        for (&row, &add) in &row_adds {
            if board.ship_count(Lane::Row, row) + add > board.lane_sum(Lane::Row, row) {
                return true;
            }
        }
        for (&col, &add) in &col_adds {
            if board.ship_count(Lane::Col, col) + add > board.lane_sum(Lane::Col, col) {
                return true;
            }
        }
        false
    }
}

fn segment_values(orientation: Orientation) -> (Value, Value, Value) {
    match orientation {
        Orientation::Horizontal => (Value::ShipWest, Value::ShipMidH, Value::ShipEast),
        Orientation::Vertical => (Value::ShipNorth, Value::ShipMidV, Value::ShipSouth),
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.orientation {
            Some(Orientation::Horizontal) => "horizontal",
            Some(Orientation::Vertical) => "vertical",
            None => "sub",
        };
        write!(
            f,
            "ship at ({},{}) size {} {}",
            self.row, self.col, self.size, kind
        )
    }
}

/// Candidate placements grouped by size, split into confirmed and still
/// potential, as produced by one enumeration pass over a board.
#[derive(Debug, Clone)]
pub struct Fleet {
    max_ship_size: usize,
    confirmed: Vec<Vec<Ship>>,
    potential: Vec<Vec<Ship>>,
}

impl Fleet {
    pub(crate) fn new(max_ship_size: usize) -> Self {
        Fleet {
            max_ship_size,
            confirmed: vec![Vec::new(); max_ship_size],
            potential: vec![Vec::new(); max_ship_size],
        }
    }

    pub(crate) fn push(&mut self, ship: Ship, confirmed: bool) {
        let bucket = if confirmed {
            &mut self.confirmed
        } else {
            &mut self.potential
        };
        bucket[ship.size() - 1].push(ship);
    }

    /// Drops all potential placements of any size whose confirmed count
    /// already meets the fleet requirement.
    pub(crate) fn prune_exhausted(&mut self) {
        for size in 1..=self.max_ship_size {
            if self.confirmed[size - 1].len() >= self.required(size) {
                self.potential[size - 1].clear();
            }
        }
    }

    /// Largest ship size in the fleet.
    pub fn max_ship_size(&self) -> usize {
        self.max_ship_size
    }

    /// Number of ships of `size` the puzzle requires.
    pub fn required(&self, size: usize) -> usize {
        self.max_ship_size - size + 1
    }

    /// Confirmed placements of `size`.
    pub fn confirmed(&self, size: usize) -> &[Ship] {
        &self.confirmed[size - 1]
    }

    /// Potential (unconfirmed) placements of `size`.
    pub fn potential(&self, size: usize) -> &[Ship] {
        &self.potential[size - 1]
    }

    /// Ships of `size` still to be located. Negative when the board holds
    /// more confirmed ships than the fleet allows.
    pub fn missing(&self, size: usize) -> isize {
        self.required(size) as isize - self.confirmed[size - 1].len() as isize
    }

    /// All potential placements across every size.
    pub fn all_potential(&self) -> impl Iterator<Item = &Ship> {
        self.potential.iter().flatten()
    }

    /// All confirmed placements across every size.
    pub fn all_confirmed(&self) -> impl Iterator<Item = &Ship> {
        self.confirmed.iter().flatten()
    }
}
