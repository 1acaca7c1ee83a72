//src/dungeon/src/direction.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// 四个方向。North decreases y, east increases x.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "north", serialize = "n")]
    North,
    #[strum(to_string = "south", serialize = "s")]
    South,
    #[strum(to_string = "east", serialize = "e")]
    East,
    #[strum(to_string = "west", serialize = "w")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Coordinate one step from `from` in this direction.
    pub fn step(self, from: (i32, i32)) -> (i32, i32) {
        let (dx, dy) = self.delta();
        (from.0 + dx, from.1 + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn opposite_steps_cancel_out() {
        for dir in Direction::iter() {
            assert_eq!(dir.opposite().step(dir.step((4, 4))), (4, 4));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn parses_full_and_short_names() {
        assert_eq!(Direction::from_str("North").unwrap(), Direction::North);
        assert_eq!(Direction::from_str("w").unwrap(), Direction::West);
        assert!(Direction::from_str("up").is_err());
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(Direction::East.to_string(), "east");
    }
}
