//! Cell values and the refinement lattice that governs how they change.

use core::fmt;

/// One of the eight neighbor directions of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Dir {
    /// The four orthogonal directions.
    pub const CARDINAL: [Dir; 4] = [Dir::North, Dir::South, Dir::East, Dir::West];

    /// Row and column offset of the neighbor in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Dir::North => (-1, 0),
            Dir::South => (1, 0),
            Dir::East => (0, 1),
            Dir::West => (0, -1),
            Dir::NorthEast => (-1, 1),
            Dir::NorthWest => (-1, -1),
            Dir::SouthEast => (1, 1),
            Dir::SouthWest => (1, -1),
        }
    }
}

/// The state of a single grid cell.
///
/// A cell starts `Blank` and is only ever refined: `Water` and the specific
/// ship segments are terminal, `ShipUnid` may become any ship segment, and
/// the generic `ShipMid` may resolve to `ShipMidH` or `ShipMidV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// Undetermined cell.
    Blank,
    /// Confirmed water.
    Water,
    /// Confirmed ship segment of unknown kind.
    ShipUnid,
    /// Single-cell ship (submarine).
    ShipSub,
    /// Interior segment of unknown orientation.
    ShipMid,
    /// Interior segment of a horizontal ship.
    ShipMidH,
    /// Interior segment of a vertical ship.
    ShipMidV,
    /// Top end of a vertical ship.
    ShipNorth,
    /// Bottom end of a vertical ship.
    ShipSouth,
    /// Right end of a horizontal ship.
    ShipEast,
    /// Left end of a horizontal ship.
    ShipWest,
}

impl Value {
    /// True if the cell is confirmed to hold a ship segment of any kind.
    pub fn is_ship(self) -> bool {
        !matches!(self, Value::Blank | Value::Water)
    }

    /// True if the cell holds a ship segment whose kind or orientation is
    /// still undetermined.
    pub fn is_unid(self) -> bool {
        matches!(self, Value::ShipUnid | Value::ShipMid)
    }

    /// Character used for this value in puzzle files and board rendering.
    pub fn to_char(self) -> char {
        match self {
            Value::Blank => '.',
            Value::Water => '=',
            Value::ShipUnid => '?',
            Value::ShipSub => 'O',
            Value::ShipMid => '+',
            Value::ShipMidH => '-',
            Value::ShipMidV => '|',
            Value::ShipNorth => '^',
            Value::ShipSouth => 'v',
            Value::ShipEast => '>',
            Value::ShipWest => '<',
        }
    }

    /// Parses a puzzle-file character; `None` for anything outside the
    /// alphabet.
    pub fn from_char(c: char) -> Option<Value> {
        Some(match c {
            '.' => Value::Blank,
            '=' => Value::Water,
            '?' => Value::ShipUnid,
            'O' => Value::ShipSub,
            '+' => Value::ShipMid,
            '-' => Value::ShipMidH,
            '|' => Value::ShipMidV,
            '^' => Value::ShipNorth,
            'v' => Value::ShipSouth,
            '>' => Value::ShipEast,
            '<' => Value::ShipWest,
            _ => return None,
        })
    }

    /// Applies the refinement lattice for a requested change.
    ///
    /// Returns `Ok(Some(v))` when the cell must be rewritten to `v`,
    /// `Ok(None)` when the request is a permitted no-op reaffirmation, and
    /// `Err(())` when the request contradicts the current value.
    pub(crate) fn refine(self, requested: Value) -> Result<Option<Value>, ()> {
        match self {
            Value::Blank => Ok(Some(requested)),
            Value::Water => {
                if requested == Value::Water {
                    Ok(None)
                } else {
                    Err(())
                }
            }
            Value::ShipUnid => match requested {
                Value::Blank | Value::Water => Err(()),
                Value::ShipUnid => Ok(None),
                specific => Ok(Some(specific)),
            },
            Value::ShipMid => match requested {
                Value::ShipMidH | Value::ShipMidV => Ok(Some(requested)),
                _ => Err(()),
            },
            current => {
                if requested == current || requested == Value::ShipUnid {
                    Ok(None)
                } else {
                    Err(())
                }
            }
        }
    }

    /// Neighbor directions that must contain water given this value.
    ///
    /// Segment ends leave their continuation side open; a submarine is
    /// surrounded on all eight sides.
    pub(crate) fn water_directions(self) -> &'static [Dir] {
        use Dir::*;
        match self {
            Value::ShipUnid | Value::ShipMid => &[NorthEast, NorthWest, SouthEast, SouthWest],
            Value::ShipMidH => &[North, South, NorthEast, NorthWest, SouthEast, SouthWest],
            Value::ShipMidV => &[East, West, NorthEast, NorthWest, SouthEast, SouthWest],
            Value::ShipSub => &[
                North, South, East, West, NorthEast, NorthWest, SouthEast, SouthWest,
            ],
            Value::ShipNorth => &[
                North, East, West, NorthEast, NorthWest, SouthEast, SouthWest,
            ],
            Value::ShipSouth => &[
                South, East, West, NorthEast, NorthWest, SouthEast, SouthWest,
            ],
            Value::ShipEast => &[
                North, South, East, NorthEast, NorthWest, SouthEast, SouthWest,
            ],
            Value::ShipWest => &[
                North, South, West, NorthEast, NorthWest, SouthEast, SouthWest,
            ],
            _ => &[],
        }
    }

    /// Neighbor directions that must contain a ship continuation given this
    /// value.
    pub(crate) fn ship_directions(self) -> &'static [Dir] {
        use Dir::*;
        match self {
            Value::ShipNorth => &[South],
            Value::ShipSouth => &[North],
            Value::ShipEast => &[West],
            Value::ShipWest => &[East],
            Value::ShipMidH => &[East, West],
            Value::ShipMidV => &[North, South],
            _ => &[],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
