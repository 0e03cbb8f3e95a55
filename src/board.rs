//! Puzzle board: the cell grid, lane targets, blacklist and mutation engine.

use crate::common::PuzzleError;
use crate::journal::Journal;
use crate::ship::{Fleet, Orientation, Ship};
use crate::tile::{Dir, Value};
use core::fmt;
use itertools::iproduct;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// A row or column, addressed as a 1-D sequence of cells for sum checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Row,
    Col,
}

/// All state of one puzzle instance.
///
/// The grid is owned exclusively; cell values change only through
/// [`Board::set_value`], which enforces the refinement lattice and cascades
/// forced neighbor deductions. Cloning yields a structurally independent
/// copy, which is how the lookahead strategy tests hypotheses.
#[derive(Debug, Clone)]
pub struct Board {
    name: String,
    size: usize,
    max_ship_size: usize,
    row_sums: Vec<usize>,
    col_sums: Vec<usize>,
    grid: Vec<Value>,
    blacklist: FxHashSet<Ship>,
    journal: Journal,
}

impl Board {
    /// Creates a board of blank cells.
    ///
    /// Fails if the sum arrays do not match `size`, a sum exceeds the lane
    /// length, or `max_ship_size` does not fit the grid.
    pub fn new(
        name: impl Into<String>,
        size: usize,
        max_ship_size: usize,
        row_sums: Vec<usize>,
        col_sums: Vec<usize>,
    ) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::InvalidBoard("board size must be non-zero".into()));
        }
        if max_ship_size == 0 || max_ship_size > size {
            return Err(PuzzleError::InvalidBoard(format!(
                "max ship size {max_ship_size} does not fit a {size}x{size} grid"
            )));
        }
        if row_sums.len() != size || col_sums.len() != size {
            return Err(PuzzleError::InvalidBoard(format!(
                "expected {size} row and column sums, got {} and {}",
                row_sums.len(),
                col_sums.len()
            )));
        }
        if let Some(sum) = row_sums.iter().chain(&col_sums).find(|&&s| s > size) {
            return Err(PuzzleError::InvalidBoard(format!(
                "lane sum {sum} exceeds lane length {size}"
            )));
        }
        Ok(Board {
            name: name.into(),
            size,
            max_ship_size,
            row_sums,
            col_sums,
            grid: vec![Value::Blank; size * size],
            blacklist: FxHashSet::default(),
            journal: Journal::new(),
        })
    }

    /// Puzzle identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grid width and height.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of the largest ship in the fleet.
    pub fn max_ship_size(&self) -> usize {
        self.max_ship_size
    }

    /// Audit trail of every deduction made so far.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Discards the audit trail, e.g. after loading initial clues.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Value of the cell at (`row`, `col`). Panics if out of bounds.
    pub fn value(&self, row: usize, col: usize) -> Value {
        self.grid[self.idx(row, col)]
    }

    /// Target number of ship cells in the lane.
    pub fn lane_sum(&self, lane: Lane, idx: usize) -> usize {
        match lane {
            Lane::Row => self.row_sums[idx],
            Lane::Col => self.col_sums[idx],
        }
    }

    /// Number of cells in the lane currently confirmed as ship.
    pub fn ship_count(&self, lane: Lane, idx: usize) -> usize {
        self.lane_values(lane, idx).filter(|v| v.is_ship()).count()
    }

    /// Number of cells in the lane currently confirmed as water.
    pub fn water_count(&self, lane: Lane, idx: usize) -> usize {
        self.lane_values(lane, idx)
            .filter(|&v| v == Value::Water)
            .count()
    }

    /// Number of still-blank cells in the lane.
    pub fn blank_count(&self, lane: Lane, idx: usize) -> usize {
        self.lane_values(lane, idx)
            .filter(|&v| v == Value::Blank)
            .count()
    }

    /// True if the lane contains at least one blank cell.
    pub fn has_blanks(&self, lane: Lane, idx: usize) -> bool {
        self.lane_values(lane, idx).any(|v| v == Value::Blank)
    }

    /// True if the lane contains at least one unidentified ship cell.
    pub fn has_unid(&self, lane: Lane, idx: usize) -> bool {
        self.lane_values(lane, idx).any(|v| v.is_unid())
    }

    /// Coordinates of the `i`-th cell of the lane.
    pub fn lane_cell(&self, lane: Lane, idx: usize, i: usize) -> (usize, usize) {
        match lane {
            Lane::Row => (idx, i),
            Lane::Col => (i, idx),
        }
    }

    /// Coordinates of every cell currently holding `value`, row-major.
    pub fn tiles_with(&self, value: Value) -> Vec<(usize, usize)> {
        iproduct!(0..self.size, 0..self.size)
            .filter(|&(r, c)| self.value(r, c) == value)
            .collect()
    }

    /// True if the in-bounds cell holds a ship segment; off-grid cells are
    /// never ship.
    pub(crate) fn is_ship_at(&self, row: isize, col: isize) -> bool {
        self.at(row, col).is_some_and(Value::is_ship)
    }

    /// True if the cell holds water; off-grid cells count as water.
    pub(crate) fn is_water_at(&self, row: isize, col: isize) -> bool {
        self.at(row, col).map_or(true, |v| v == Value::Water)
    }

    /// Attempts to change the cell at (`row`, `col`) to `value`, cascading
    /// all forced neighbor deductions to exhaustion.
    ///
    /// Each committed value forces its mandatory-water neighbors toward
    /// `Water` and its ship-continuation neighbors toward `ShipUnid`;
    /// off-grid neighbors are ignored. The cascade is processed from an
    /// explicit queue, so its depth is independent of the grid size.
    /// Returns whether any cell changed. On error nothing further is
    /// applied.
    pub fn set_value(&mut self, row: usize, col: usize, value: Value) -> Result<bool, PuzzleError> {
        let mut changed = false;
        let mut pending = VecDeque::new();
        pending.push_back((row, col, value));
        while let Some((r, c, requested)) = pending.pop_front() {
            let current = self.value(r, c);
            let commit = current
                .refine(requested)
                .map_err(|()| PuzzleError::InvalidMove {
                    row: r,
                    col: c,
                    current,
                    requested,
                })?;
            if let Some(next) = commit {
                if next != current {
                    changed = true;
                    self.journal
                        .record(format!("changed ({r},{c}) from {current:?} to {next:?}"));
                    let idx = self.idx(r, c);
                    self.grid[idx] = next;
                }
            }
            let committed = self.value(r, c);
            for &dir in committed.water_directions() {
                if let Some((nr, nc)) = self.neighbor(r, c, dir) {
                    pending.push_back((nr, nc, Value::Water));
                }
            }
            for &dir in committed.ship_directions() {
                if let Some((nr, nc)) = self.neighbor(r, c, dir) {
                    if !self.value(nr, nc).is_ship() {
                        pending.push_back((nr, nc, Value::ShipUnid));
                    }
                }
            }
        }
        Ok(changed)
    }

    /// Enumerates every candidate placement consistent with the current
    /// grid, grouped by size into confirmed and potential lists.
    ///
    /// Recomputed from scratch on every call so the result always reflects
    /// the current cell values. Blacklisted placements are excluded, and
    /// potential lists of exhausted sizes are dropped.
    pub fn fleet(&self) -> Fleet {
        let mut fleet = Fleet::new(self.max_ship_size);
        for (i, j) in iproduct!(0..self.size, 0..self.size) {
            let start = self.value(i, j);
            if matches!(start, Value::Blank | Value::ShipUnid | Value::ShipWest)
                && !self.is_ship_at(i as isize, j as isize - 1)
            {
                self.grow_run(&mut fleet, i, j, Orientation::Horizontal);
            }
            if matches!(start, Value::Blank | Value::ShipUnid | Value::ShipNorth)
                && !self.is_ship_at(i as isize - 1, j as isize)
            {
                self.grow_run(&mut fleet, i, j, Orientation::Vertical);
            }
            if matches!(start, Value::Blank | Value::ShipUnid | Value::ShipSub)
                && Dir::CARDINAL.iter().all(|&d| {
                    let (dr, dc) = d.offset();
                    !self.is_ship_at(i as isize + dr, j as isize + dc)
                })
            {
                self.admit(&mut fleet, Ship::sub(i, j));
            }
        }
        fleet.prune_exhausted();
        fleet
    }

    /// Permanently marks a placement as impossible for this board.
    pub fn blacklist(&mut self, ship: Ship) {
        self.journal.record(format!("blacklisted {ship}"));
        log::debug!("{}: blacklisted {}", self.name, ship);
        self.blacklist.insert(ship);
    }

    /// Independent deep copy for hypothesis testing: fresh grid, fresh
    /// blacklist, empty journal.
    pub fn fork(&self) -> Board {
        let mut clone = self.clone();
        clone.name = format!("{} (hypothesis)", self.name);
        clone.journal = Journal::new();
        clone
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    fn at(&self, row: isize, col: isize) -> Option<Value> {
        if row < 0 || col < 0 || row as usize >= self.size || col as usize >= self.size {
            None
        } else {
            Some(self.value(row as usize, col as usize))
        }
    }

    fn neighbor(&self, row: usize, col: usize, dir: Dir) -> Option<(usize, usize)> {
        let (dr, dc) = dir.offset();
        let r = row as isize + dr;
        let c = col as isize + dc;
        self.at(r, c).map(|_| (r as usize, c as usize))
    }

    fn lane_values(&self, lane: Lane, idx: usize) -> impl Iterator<Item = Value> + '_ {
        (0..self.size).map(move |i| {
            let (r, c) = self.lane_cell(lane, idx, i);
            self.value(r, c)
        })
    }

    /// Grows a run of up to `max_ship_size` cells from (`row`, `col`),
    /// emitting a candidate at every length the lane budget still allows.
    fn grow_run(&self, fleet: &mut Fleet, row: usize, col: usize, orientation: Orientation) {
        let lane = orientation.lane();
        let lane_idx = match orientation {
            Orientation::Horizontal => row,
            Orientation::Vertical => col,
        };
        let budget = self.lane_sum(lane, lane_idx) as isize - self.ship_count(lane, lane_idx) as isize;
        let (dr, dc) = match orientation {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        };
        // Cells the run would newly convert from non-ship to ship.
        let mut fresh = 0isize;
        for k in 0..self.max_ship_size {
            let r = row + k * dr;
            let c = col + k * dc;
            if r >= self.size || c >= self.size {
                break;
            }
            let cur = self.value(r, c);
            if cur == Value::Water {
                break;
            }
            if !cur.is_ship() {
                fresh += 1;
            }
            let next_is_ship = self.is_ship_at(r as isize + dr as isize, c as isize + dc as isize);
            if k > 0 && !next_is_ship && budget >= fresh {
                self.admit(fleet, Ship::run(row, col, k + 1, orientation));
            }
        }
    }

    fn admit(&self, fleet: &mut Fleet, ship: Ship) {
        if self.blacklist.contains(&ship) {
            return;
        }
        let confirmed = ship.is_confirmed(self);
        fleet.push(ship, confirmed);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                write!(f, "{} ", self.value(r, c))?;
            }
            writeln!(f, "| {}", self.row_sums[r])?;
        }
        for _ in 0..self.size {
            write!(f, "_ ")?;
        }
        writeln!(f)?;
        for c in 0..self.size {
            write!(f, "{} ", self.col_sums[c])?;
        }
        Ok(())
    }
}
