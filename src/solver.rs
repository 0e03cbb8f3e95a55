//! Solving strategies and the difficulty-leveled fixed-point loop.
//!
//! Strategies are ordered from cheapest to most expensive. The loop runs
//! the current level's strategy, restarts from level 1 whenever progress
//! was made, and escalates otherwise; the highest level visited becomes
//! the puzzle's difficulty rating. Every strategy reports progress through
//! its return value, so no mutable flag is shared across the loop.

use crate::board::{Board, Lane};
use crate::common::PuzzleError;
use crate::ship::Ship;
use crate::tile::Value;
use itertools::iproduct;
use log::{debug, trace};

/// Highest strategy level; escalating past it without progress is a stall.
pub const MAX_LEVEL: u32 = 7;

/// Runs strategies against `board` until it is complete or no strategy at
/// any level makes progress.
///
/// Returns the highest level that was needed. The caller distinguishes a
/// solved board from a stall via [`is_complete`]; a stall is not an error.
/// Errors from levels 1-6 mean the puzzle is unsolvable as given and abort
/// immediately.
pub fn solve(board: &mut Board) -> Result<u32, PuzzleError> {
    let mut level = 1;
    let mut max_level = 1;
    loop {
        let changed = apply_level(board, level)?;
        trace!(
            "{}: level {} {}",
            board.name(),
            level,
            if changed { "progressed" } else { "no change" }
        );
        if is_complete(board) {
            break;
        }
        if changed {
            level = 1;
        } else {
            level += 1;
        }
        if level > MAX_LEVEL {
            debug!("{}: stalled past level {}", board.name(), MAX_LEVEL);
            break;
        }
        max_level = max_level.max(level);
    }
    Ok(max_level)
}

/// Runs the single strategy tier for `level`, returning whether it changed
/// the board. Levels outside 1..=7 do nothing.
pub fn apply_level(board: &mut Board, level: u32) -> Result<bool, PuzzleError> {
    match level {
        1 => fill_lanes(board),
        2 => identify_tiles(board),
        3 => complete_ship_sizes(board),
        4 => identify_ships(board),
        5 => place_shared_tiles(board),
        6 => fill_partial_lanes(board),
        7 => lookahead(board),
        _ => Ok(false),
    }
}

/// True when no lane has blanks or unidentified cells and every lane's ship
/// count equals its target.
pub fn is_complete(board: &Board) -> bool {
    (0..board.size()).all(|i| {
        [Lane::Row, Lane::Col].into_iter().all(|lane| {
            !board.has_blanks(lane, i)
                && !board.has_unid(lane, i)
                && board.ship_count(lane, i) == board.lane_sum(lane, i)
        })
    })
}

/// Alternates lane filling and tile identification until neither makes
/// progress. The cheapest useful solving tier; also run by callers that
/// want deductions without the full strategy ladder.
pub fn solve_easiest(board: &mut Board) -> Result<(), PuzzleError> {
    loop {
        while fill_lanes(board)? {}
        if !identify_tiles(board)? {
            break;
        }
    }
    Ok(())
}

//---------- Level 1: fill lanes ----------//

fn fill_lanes(board: &mut Board) -> Result<bool, PuzzleError> {
    let mut changed = false;
    for i in 0..board.size() {
        changed |= fill_lane(board, Lane::Col, i)?;
        changed |= fill_lane(board, Lane::Row, i)?;
    }
    Ok(changed)
}

/// Fills the remaining blanks of one lane when its counts force them: all
/// water once the target is met, all ship once only ship cells can remain.
fn fill_lane(board: &mut Board, lane: Lane, idx: usize) -> Result<bool, PuzzleError> {
    if !board.has_blanks(lane, idx) {
        return Ok(false);
    }
    let ships = board.ship_count(lane, idx);
    let water = board.water_count(lane, idx);
    let target = board.lane_sum(lane, idx);
    let fill = if ships == target {
        Value::Water
    } else if water == board.size() - target {
        Value::ShipUnid
    } else {
        return Ok(false);
    };
    let mut changed = false;
    for i in 0..board.size() {
        let (r, c) = board.lane_cell(lane, idx, i);
        if board.value(r, c) == Value::Blank {
            changed |= board.set_value(r, c, fill)?;
        }
    }
    Ok(changed)
}

//---------- Level 2: identify tiles ----------//

fn identify_tiles(board: &mut Board) -> Result<bool, PuzzleError> {
    let mut changed = false;
    for (r, c) in iproduct!(0..board.size(), 0..board.size()) {
        changed |= identify_unid(board, r, c)?;
        changed |= identify_mid(board, r, c)?;
    }
    Ok(changed)
}

/// Refines a `ShipUnid` cell from the known water/ship status of its four
/// orthogonal neighbors. Off-grid neighbors count as water.
fn identify_unid(board: &mut Board, row: usize, col: usize) -> Result<bool, PuzzleError> {
    if board.value(row, col) != Value::ShipUnid {
        return Ok(false);
    }
    let (r, c) = (row as isize, col as isize);
    let mut changed = false;
    if board.is_water_at(r - 1, c)
        && board.is_water_at(r + 1, c)
        && board.is_water_at(r, c + 1)
        && board.is_water_at(r, c - 1)
    {
        changed |= board.set_value(row, col, Value::ShipSub)?;
    }
    if board.is_water_at(r - 1, c) && board.is_ship_at(r + 1, c) {
        changed |= board.set_value(row, col, Value::ShipNorth)?;
    }
    if board.is_water_at(r + 1, c) && board.is_ship_at(r - 1, c) {
        changed |= board.set_value(row, col, Value::ShipSouth)?;
    }
    if board.is_water_at(r, c + 1) && board.is_ship_at(r, c - 1) {
        changed |= board.set_value(row, col, Value::ShipEast)?;
    }
    if board.is_water_at(r, c - 1) && board.is_ship_at(r, c + 1) {
        changed |= board.set_value(row, col, Value::ShipWest)?;
    }
    if board.is_ship_at(r - 1, c) && board.is_ship_at(r + 1, c) {
        changed |= board.set_value(row, col, Value::ShipMidV)?;
    }
    if board.is_ship_at(r, c + 1) && board.is_ship_at(r, c - 1) {
        changed |= board.set_value(row, col, Value::ShipMidH)?;
    }
    Ok(changed)
}

/// Resolves a generic `ShipMid` cell to horizontal or vertical, from its
/// neighbors or from lane-sum pressure. Both orientations being forced at
/// once means the board is contradictory.
fn identify_mid(board: &mut Board, row: usize, col: usize) -> Result<bool, PuzzleError> {
    if board.value(row, col) != Value::ShipMid {
        return Ok(false);
    }
    let (r, c) = (row as isize, col as isize);
    let mut horizontal = false;
    let mut vertical = false;
    if board.is_water_at(r - 1, c)
        || board.is_water_at(r + 1, c)
        || board.is_ship_at(r, c + 1)
        || board.is_ship_at(r, c - 1)
    {
        horizontal = true;
    } else if board.ship_count(Lane::Row, row) + 2 > board.lane_sum(Lane::Row, row) {
        // A horizontal mid would add both lateral neighbors to this row.
        vertical = true;
    }
    if board.is_water_at(r, c + 1)
        || board.is_water_at(r, c - 1)
        || board.is_ship_at(r - 1, c)
        || board.is_ship_at(r + 1, c)
    {
        vertical = true;
    } else if board.ship_count(Lane::Col, col) + 2 > board.lane_sum(Lane::Col, col) {
        horizontal = true;
    }
    match (horizontal, vertical) {
        (true, true) => Err(PuzzleError::InvalidBoard(format!(
            "mid segment at ({row},{col}) is forced both horizontal and vertical"
        ))),
        (true, false) => board.set_value(row, col, Value::ShipMidH),
        (false, true) => board.set_value(row, col, Value::ShipMidV),
        (false, false) => Ok(false),
    }
}

//---------- Level 3: complete ship sizes ----------//

/// When the potential placements of a size are exactly as many as the ships
/// of that size still missing, all of them must be real.
fn complete_ship_sizes(board: &mut Board) -> Result<bool, PuzzleError> {
    let mut changed = false;
    for size in 1..=board.max_ship_size() {
        let fleet = board.fleet();
        if fleet.missing(size) == fleet.potential(size).len() as isize {
            let placements = fleet.potential(size).to_vec();
            for ship in &placements {
                changed |= ship.confirm(board)?;
            }
        }
    }
    Ok(changed)
}

//---------- Level 4: identify ships ----------//

/// Confirms any placement that is the only remaining candidate covering
/// some unidentified cell.
fn identify_ships(board: &mut Board) -> Result<bool, PuzzleError> {
    let mut changed = false;
    for (r, c) in board.tiles_with(Value::ShipUnid) {
        if board.value(r, c) != Value::ShipUnid {
            continue;
        }
        let fleet = board.fleet();
        let mut covering = fleet.all_potential().filter(|ship| ship.contains(r, c));
        let (first, second) = (covering.next().copied(), covering.next());
        if let (Some(ship), None) = (first, second) {
            changed |= ship.confirm(board)?;
        }
    }
    Ok(changed)
}

//---------- Level 5: shared tiles ----------//

fn place_shared_tiles(board: &mut Board) -> Result<bool, PuzzleError> {
    let mut changed = false;
    for size in 2..=board.max_ship_size() {
        changed |= place_shared_tiles_for(board, size)?;
    }
    Ok(changed)
}

/// A cell covered by every remaining candidate of a size is part of a ship
/// no matter which candidate is real.
fn place_shared_tiles_for(board: &mut Board, size: usize) -> Result<bool, PuzzleError> {
    let placements = board.fleet().potential(size).to_vec();
    let mut changed = false;
    for &(r, c) in &candidate_cells(&placements) {
        if placements.iter().all(|ship| ship.contains(r, c)) {
            changed |= board.set_value(r, c, Value::ShipUnid)?;
        }
    }
    Ok(changed)
}

//---------- Level 6: partial lane fill ----------//

fn fill_partial_lanes(board: &mut Board) -> Result<bool, PuzzleError> {
    let mut changed = false;
    for size in 2..=board.max_ship_size() {
        changed |= fill_partial_lane(board, size)?;
    }
    Ok(changed)
}

/// When every remaining candidate of a size sits in one lane and the lane's
/// sum is fully accounted for by those candidates plus its other ship
/// cells, the lane's remaining blanks must be water.
fn fill_partial_lane(board: &mut Board, size: usize) -> Result<bool, PuzzleError> {
    let fleet = board.fleet();
    let placements = fleet.potential(size).to_vec();
    if placements.is_empty() {
        return Ok(false);
    }
    let cells = candidate_cells(&placements);
    let (r0, c0) = cells[0];
    let same_row = cells.iter().all(|&(r, _)| r == r0);
    let same_col = cells.iter().all(|&(_, c)| c == c0);
    let (lane, idx) = if same_row {
        (Lane::Row, r0)
    } else if same_col {
        (Lane::Col, c0)
    } else {
        return Ok(false);
    };
    let mut outside_ships = 0isize;
    let mut blanks = Vec::new();
    for i in 0..board.size() {
        let (r, c) = board.lane_cell(lane, idx, i);
        if !cells.contains(&(r, c)) {
            match board.value(r, c) {
                Value::Blank => blanks.push((r, c)),
                v if v.is_ship() => outside_ships += 1,
                _ => {}
            }
        }
    }
    let unaccounted =
        board.lane_sum(lane, idx) as isize - outside_ships - size as isize * fleet.missing(size);
    let mut changed = false;
    if unaccounted == 0 {
        for (r, c) in blanks {
            changed |= board.set_value(r, c, Value::Water)?;
        }
    }
    Ok(changed)
}

//---------- Level 7: simple lookahead ----------//

fn lookahead(board: &mut Board) -> Result<bool, PuzzleError> {
    let mut changed = false;
    for size in 2..=board.max_ship_size() {
        changed |= lookahead_for(board, size)?;
    }
    Ok(changed)
}

/// Tries each remaining candidate of a size on a cloned board; candidates
/// whose hypothesis contradicts the lane or fleet invariants are
/// blacklisted on the real board. Errors inside a hypothesis never escape.
fn lookahead_for(board: &mut Board, size: usize) -> Result<bool, PuzzleError> {
    let fleet = board.fleet();
    if fleet.missing(size) > 2 {
        return Ok(false);
    }
    let placements = fleet.potential(size).to_vec();
    if placements.len() > 4 {
        return Ok(false);
    }
    let mut changed = false;
    for ship in placements {
        let mut clone = board.fork();
        if let Err(err) = test_hypothesis(&mut clone, &ship) {
            debug!("{}: hypothesis {} refuted: {}", board.name(), ship, err);
            board.blacklist(ship);
            changed = true;
        }
    }
    Ok(changed)
}

/// Confirms the placement on the clone, fills lanes to a local fixed point
/// and checks the global invariants.
fn test_hypothesis(clone: &mut Board, ship: &Ship) -> Result<(), PuzzleError> {
    ship.confirm(clone)?;
    while fill_lanes(clone)? {}
    validate_lane_counts(clone)?;
    validate_ship_counts(clone)?;
    Ok(())
}

fn validate_lane_counts(board: &Board) -> Result<(), PuzzleError> {
    for lane in [Lane::Row, Lane::Col] {
        for idx in 0..board.size() {
            let ships = board.ship_count(lane, idx);
            let water = board.water_count(lane, idx);
            let target = board.lane_sum(lane, idx);
            if ships > target || board.size() - water < target {
                return Err(PuzzleError::InvalidBoard(format!(
                    "{lane:?} {idx} cannot meet its target sum of {target}"
                )));
            }
        }
    }
    Ok(())
}

fn validate_ship_counts(board: &Board) -> Result<(), PuzzleError> {
    let fleet = board.fleet();
    for size in 1..=board.max_ship_size() {
        if fleet.confirmed(size).len() > fleet.required(size) {
            return Err(PuzzleError::InvalidBoard(format!(
                "more than {} confirmed ships of size {size}",
                fleet.required(size)
            )));
        }
    }
    Ok(())
}

/// Distinct cells covered by any of the placements, in discovery order.
fn candidate_cells(placements: &[Ship]) -> Vec<(usize, usize)> {
    let mut cells: Vec<(usize, usize)> = Vec::new();
    for ship in placements {
        for cell in ship.cells() {
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}
