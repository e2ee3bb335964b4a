//! # Game Module
//!
//! Level simulation core: locations, terrain, actors and the level state machine.
//!
//! This module contains the fundamental building blocks of CyTale:
//! - Grid and cell representation
//! - Player and monster state
//! - Movement resolution with toroidal wrap-around
//! - Session orchestration across several levels

pub mod entities;
pub mod events;
pub mod level;
pub mod state;
pub mod world;

pub use entities::*;
pub use events::*;
pub use level::*;
pub use state::*;
pub use world::*;

use crate::CytaleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 2D coordinate on a level grid.
///
/// `x` is the column and `y` the row, with the origin in the top-left corner
/// and `y` growing downward. Locations are plain values: moving something
/// means replacing its location, never editing one in place.
///
/// # Examples
///
/// ```
/// use cytale::Location;
///
/// let loc = Location::new(3, 1);
/// assert_eq!(loc.x, 3);
/// assert_eq!(loc.y, 1);
/// assert_eq!(loc.offset(Location::new(-1, 0)), Location::new(2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Creates a new location with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin location (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Returns this location shifted by `delta`, without wrapping.
    pub fn offset(self, delta: Location) -> Self {
        self + delta
    }

    /// Returns this location shifted by `delta` on a `width × height` torus.
    ///
    /// Leaving the grid past one edge re-enters it from the opposite edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::{Direction, Location};
    ///
    /// let left_edge = Location::new(0, 4);
    /// let wrapped = left_edge.wrapped(Direction::Left.to_delta(), 10, 8);
    /// assert_eq!(wrapped, Location::new(9, 4));
    /// ```
    pub fn wrapped(self, delta: Location, width: usize, height: usize) -> Self {
        let width = width.max(1) as i32;
        let height = height.max(1) as i32;
        let moved = self.offset(delta);
        Self::new(moved.x.rem_euclid(width), moved.y.rem_euclid(height))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::ops::Add for Location {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// The four moves available to the player and to monsters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Bot,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a unit delta, with `y` growing downward.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::{Direction, Location};
    ///
    /// assert_eq!(Direction::Top.to_delta(), Location::new(0, -1));
    /// assert_eq!(Direction::Right.to_delta(), Location::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Location {
        match self {
            Direction::Top => Location::new(0, -1),
            Direction::Bot => Location::new(0, 1),
            Direction::Left => Location::new(-1, 0),
            Direction::Right => Location::new(1, 0),
        }
    }

    /// Returns all 4 directions, in the order monsters draw them.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Left,
            Direction::Right,
            Direction::Top,
            Direction::Bot,
        ]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Top => "top",
            Direction::Bot => "bot",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = CytaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "up" => Ok(Direction::Top),
            "bot" | "down" => Ok(Direction::Bot),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(CytaleError::InvalidDirection(other.to_string())),
        }
    }
}
