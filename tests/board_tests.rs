use bimaru::{Board, Lane, Orientation, PuzzleError, Ship, Value};

fn board(size: usize, max_ship: usize, rows: Vec<usize>, cols: Vec<usize>) -> Board {
    Board::new("test", size, max_ship, rows, cols).unwrap()
}

fn plain(size: usize) -> Board {
    board(size, 2, vec![size; size], vec![size; size])
}

#[test]
fn test_construction_rejects_bad_dimensions() {
    assert!(Board::new("t", 0, 1, vec![], vec![]).is_err());
    assert!(Board::new("t", 3, 0, vec![1; 3], vec![1; 3]).is_err());
    assert!(Board::new("t", 3, 4, vec![1; 3], vec![1; 3]).is_err());
    assert!(Board::new("t", 3, 2, vec![1; 2], vec![1; 3]).is_err());
    assert!(Board::new("t", 3, 2, vec![1; 3], vec![1; 4]).is_err());
    // a lane sum larger than the lane itself can never be met
    assert!(Board::new("t", 3, 2, vec![4, 0, 0], vec![1, 1, 2]).is_err());
    assert!(Board::new("t", 3, 3, vec![3, 0, 0], vec![1, 1, 1]).is_ok());
}

#[test]
fn test_water_is_terminal() {
    let mut b = plain(5);
    assert_eq!(b.set_value(2, 2, Value::Water), Ok(true));
    assert_eq!(b.set_value(2, 2, Value::Water), Ok(false));
    assert_eq!(
        b.set_value(2, 2, Value::ShipUnid),
        Err(PuzzleError::InvalidMove {
            row: 2,
            col: 2,
            current: Value::Water,
            requested: Value::ShipUnid,
        })
    );
}

#[test]
fn test_unid_refines_to_specific_only() {
    let mut b = plain(5);
    assert_eq!(b.set_value(2, 2, Value::ShipUnid), Ok(true));
    assert_eq!(b.set_value(2, 2, Value::ShipUnid), Ok(false));
    assert!(b.set_value(2, 2, Value::Water).is_err());
    assert_eq!(b.set_value(2, 2, Value::ShipSub), Ok(true));
    // specific values are terminal apart from reaffirmation
    assert_eq!(b.set_value(2, 2, Value::ShipSub), Ok(false));
    assert_eq!(b.set_value(2, 2, Value::ShipUnid), Ok(false));
    assert!(b.set_value(2, 2, Value::ShipNorth).is_err());
}

#[test]
fn test_mid_resolves_to_orientation() {
    let mut b = plain(5);
    assert_eq!(b.set_value(2, 2, Value::ShipMid), Ok(true));
    assert!(b.set_value(2, 2, Value::Water).is_err());
    assert_eq!(b.set_value(2, 2, Value::ShipMidH), Ok(true));
    // a horizontal mid continues east and west and waters above and below
    assert_eq!(b.value(2, 1), Value::ShipUnid);
    assert_eq!(b.value(2, 3), Value::ShipUnid);
    assert_eq!(b.value(1, 2), Value::Water);
    assert_eq!(b.value(3, 2), Value::Water);
}

#[test]
fn test_sub_waters_all_eight_neighbors() {
    let mut b = plain(5);
    assert_eq!(b.set_value(2, 2, Value::ShipSub), Ok(true));
    assert_eq!(b.value(2, 2), Value::ShipSub);
    for r in 1..=3 {
        for c in 1..=3 {
            if (r, c) != (2, 2) {
                assert_eq!(b.value(r, c), Value::Water, "at ({r},{c})");
            }
        }
    }
    assert_eq!(b.tiles_with(Value::Water).len(), 8);
    assert_eq!(b.tiles_with(Value::Blank).len(), 16);
}

#[test]
fn test_north_cascades_continuation_and_water() {
    let mut b = plain(5);
    assert_eq!(b.set_value(2, 2, Value::ShipNorth), Ok(true));
    // the cell below is forced to ship; its own diagonals become water
    assert_eq!(b.value(3, 2), Value::ShipUnid);
    for (r, c) in [
        (1, 1),
        (1, 2),
        (1, 3),
        (2, 1),
        (2, 3),
        (3, 1),
        (3, 3),
        (4, 1),
        (4, 3),
    ] {
        assert_eq!(b.value(r, c), Value::Water, "at ({r},{c})");
    }
    // the run may still continue past the forced cell
    assert_eq!(b.value(4, 2), Value::Blank);
}

#[test]
fn test_cascade_clips_at_the_edge() {
    let mut b = plain(3);
    assert_eq!(b.set_value(0, 0, Value::ShipSub), Ok(true));
    assert_eq!(b.value(0, 1), Value::Water);
    assert_eq!(b.value(1, 0), Value::Water);
    assert_eq!(b.value(1, 1), Value::Water);
    assert_eq!(b.tiles_with(Value::Blank).len(), 5);
}

#[test]
fn test_cascade_detects_contradiction() {
    let mut b = plain(5);
    assert_eq!(b.set_value(2, 2, Value::ShipSub), Ok(true));
    // the neighbor was watered by the first sub
    assert_eq!(
        b.set_value(2, 3, Value::ShipSub),
        Err(PuzzleError::InvalidMove {
            row: 2,
            col: 3,
            current: Value::Water,
            requested: Value::ShipSub,
        })
    );
}

#[test]
fn test_lane_queries() {
    let mut b = board(4, 2, vec![2, 0, 1, 1], vec![1, 2, 0, 1]);
    b.set_value(0, 0, Value::ShipUnid).unwrap();
    b.set_value(2, 3, Value::Water).unwrap();
    assert_eq!(b.lane_sum(Lane::Row, 0), 2);
    assert_eq!(b.lane_sum(Lane::Col, 1), 2);
    assert_eq!(b.ship_count(Lane::Row, 0), 1);
    assert_eq!(b.ship_count(Lane::Col, 0), 1);
    // the unid's diagonal cascade watered (1,1)
    assert_eq!(b.water_count(Lane::Row, 1), 1);
    assert_eq!(b.water_count(Lane::Row, 2), 1);
    assert_eq!(b.blank_count(Lane::Row, 0), 3);
    assert!(b.has_blanks(Lane::Row, 0));
    assert!(b.has_unid(Lane::Col, 0));
    assert!(!b.has_unid(Lane::Row, 3));
    assert_eq!(b.lane_cell(Lane::Row, 2, 3), (2, 3));
    assert_eq!(b.lane_cell(Lane::Col, 2, 3), (3, 2));
}

#[test]
fn test_tiles_with_covers_whole_grid() {
    let mut b = plain(3);
    assert_eq!(b.tiles_with(Value::Blank).len(), 9);
    assert!(b.tiles_with(Value::Blank).contains(&(0, 0)));
    b.set_value(0, 0, Value::Water).unwrap();
    assert_eq!(b.tiles_with(Value::Water), vec![(0, 0)]);
}

#[test]
fn test_journal_records_changes() {
    let mut b = plain(5);
    assert!(b.journal().is_empty());
    b.set_value(2, 2, Value::ShipSub).unwrap();
    // the cell itself plus its eight watered neighbors
    assert_eq!(b.journal().entries().len(), 9);
    assert!(b.journal().entries()[0].contains("(2,2)"));
    b.clear_journal();
    assert!(b.journal().is_empty());
}

#[test]
fn test_fork_is_independent() {
    let mut b = plain(5);
    b.set_value(0, 0, Value::Water).unwrap();
    let mut clone = b.fork();
    assert!(clone.journal().is_empty());
    assert_eq!(clone.value(0, 0), Value::Water);
    clone.set_value(2, 2, Value::ShipSub).unwrap();
    assert_eq!(clone.value(2, 2), Value::ShipSub);
    assert_eq!(b.value(2, 2), Value::Blank);
    assert_ne!(clone.name(), b.name());
}

#[test]
fn test_fleet_enumeration_on_blank_board() {
    let b = board(3, 2, vec![2, 0, 1], vec![1, 1, 1]);
    let fleet = b.fleet();
    // only the first row has budget for a two-cell run
    assert_eq!(
        fleet.potential(2),
        &[
            Ship::run(0, 0, 2, Orientation::Horizontal),
            Ship::run(0, 1, 2, Orientation::Horizontal),
        ]
    );
    assert_eq!(fleet.potential(1).len(), 9);
    assert!(fleet.confirmed(1).is_empty());
    assert!(fleet.confirmed(2).is_empty());
    assert_eq!(fleet.required(2), 1);
    assert_eq!(fleet.missing(2), 1);
}

#[test]
fn test_blacklisted_placements_are_not_enumerated() {
    let mut b = board(3, 2, vec![2, 0, 1], vec![1, 1, 1]);
    b.blacklist(Ship::run(0, 0, 2, Orientation::Horizontal));
    b.blacklist(Ship::sub(1, 1));
    let fleet = b.fleet();
    assert_eq!(fleet.potential(2), &[Ship::run(0, 1, 2, Orientation::Horizontal)]);
    assert_eq!(fleet.potential(1).len(), 8);
    assert!(!fleet.potential(1).contains(&Ship::sub(1, 1)));
    assert!(b.journal().entries().iter().any(|e| e.contains("blacklisted")));
}

#[test]
fn test_fleet_prunes_exhausted_sizes() {
    let mut b = board(3, 1, vec![1, 0, 0], vec![1, 0, 0]);
    b.set_value(0, 0, Value::ShipSub).unwrap();
    let fleet = b.fleet();
    // the single required sub is placed, so no potential subs remain
    assert_eq!(fleet.confirmed(1), &[Ship::sub(0, 0)]);
    assert!(fleet.potential(1).is_empty());
    assert_eq!(fleet.missing(1), 0);
}

#[test]
fn test_fleet_recognizes_confirmed_run() {
    let mut b = board(4, 2, vec![0, 2, 0, 0], vec![1, 1, 0, 0]);
    let ship = Ship::run(1, 0, 2, Orientation::Horizontal);
    assert!(!ship.is_confirmed(&b));
    assert_eq!(ship.confirm(&mut b), Ok(true));
    assert!(ship.is_confirmed(&b));
    let fleet = b.fleet();
    assert_eq!(fleet.confirmed(2), &[ship]);
    assert!(fleet.potential(2).is_empty());
}

#[test]
fn test_display_renders_grid_and_sums() {
    let mut b = board(3, 2, vec![2, 0, 1], vec![1, 1, 1]);
    b.set_value(0, 0, Value::ShipWest).unwrap();
    let text = b.to_string();
    assert!(text.contains("< ? ."));
    assert!(text.contains("| 2"));
    assert!(text.contains("1 1 1"));
}
