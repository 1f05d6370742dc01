//! Board Model
//!
//! Grid coordinates, per-cell pill/occupancy state, and the redacted
//! projection served to pollers.
//!
//! Cells are value types: every mutation builds a fresh `Cell` and reinserts
//! it at its key, so a reader holding a snapshot never observes a
//! half-updated cell.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::player::PlayerId;
use crate::game::GameError;

/// One grid coordinate. Equality and ordering are by (row, column), so a
/// `BTreeMap<Location, Cell>` iterates in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Row index, 0 at the top.
    pub row: i32,
    /// Column index, 0 at the left.
    pub col: i32,
}

impl Location {
    /// Create a location.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring location one step in `direction`.
    ///
    /// May fall outside the board; callers bound-check against the grid.
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Decreasing row.
    Up,
    /// Increasing row.
    Down,
    /// Decreasing column.
    Left,
    /// Increasing column.
    Right,
}

impl Direction {
    /// Unit (row, column) offset for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Parse a direction from a request-layer string, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::DirectionNotRecognized),
        }
    }
}

/// Pill and occupancy state of one grid coordinate.
///
/// Never mutated in place: use the `with_*` constructors and reinsert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Where this cell sits on the grid.
    pub location: Location,
    /// Is there a pill waiting to be eaten here?
    pub pill_available: bool,
    /// Identity of the occupying player, if any. Identity only, not
    /// ownership; the roster owns the `Player`.
    pub occupied_by: Option<PlayerId>,
}

impl Cell {
    /// A fresh round-start cell: pill available, unoccupied.
    pub const fn fresh(location: Location) -> Self {
        Self {
            location,
            pill_available: true,
            occupied_by: None,
        }
    }

    /// Copy with `player` occupying and the pill gone.
    pub const fn with_occupant(self, player: PlayerId) -> Self {
        Self {
            occupied_by: Some(player),
            pill_available: false,
            ..self
        }
    }

    /// Copy with the occupant gone. The pill flag is unchanged: a vacated
    /// cell is never repopulated with a pill by ordinary movement.
    pub const fn vacated(self) -> Self {
        Self {
            occupied_by: None,
            ..self
        }
    }

    /// Copy with the occupant gone and the pill restored. Used when a
    /// combatant is eliminated on this cell.
    pub const fn reclaimed(self) -> Self {
        Self {
            occupied_by: None,
            pill_available: true,
            ..self
        }
    }
}

/// Occupant fields safe to expose to any poller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantView {
    /// Public player id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Current score.
    pub score: i64,
}

/// A cell as served by `board_state`: the token is never exposed, only the
/// occupant's id, name, and score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedCell {
    /// Grid coordinate.
    pub location: Location,
    /// Pill flag.
    pub pill_available: bool,
    /// Redacted occupant, if any.
    pub occupied_by: Option<OccupantView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_ordering_is_row_major() {
        let a = Location::new(0, 5);
        let b = Location::new(1, 0);
        let c = Location::new(1, 1);

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_step_offsets() {
        let origin = Location::new(3, 3);

        assert_eq!(origin.step(Direction::Up), Location::new(2, 3));
        assert_eq!(origin.step(Direction::Down), Location::new(4, 3));
        assert_eq!(origin.step(Direction::Left), Location::new(3, 2));
        assert_eq!(origin.step(Direction::Right), Location::new(3, 4));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" Right ".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Down);
        assert!(matches!(
            "north".parse::<Direction>(),
            Err(GameError::DirectionNotRecognized)
        ));
    }

    #[test]
    fn test_cell_copy_on_write() {
        let cell = Cell::fresh(Location::new(0, 0));
        assert!(cell.pill_available);
        assert!(cell.occupied_by.is_none());

        let occupied = cell.with_occupant(PlayerId(7));
        assert_eq!(occupied.occupied_by, Some(PlayerId(7)));
        assert!(!occupied.pill_available);
        // Original untouched
        assert!(cell.occupied_by.is_none());

        let vacated = occupied.vacated();
        assert!(vacated.occupied_by.is_none());
        assert!(!vacated.pill_available);

        let reclaimed = occupied.reclaimed();
        assert!(reclaimed.occupied_by.is_none());
        assert!(reclaimed.pill_available);
    }
}
