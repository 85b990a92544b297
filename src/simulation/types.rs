//! Core types for the intersection simulation
//!
//! Plain data types and geometry constants shared by every component.

use std::fmt;

/// A unique identifier for a vehicle
/// Assigned sequentially and never reused within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(pub u64);

/// The approach a vehicle arrives from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The traffic stream this approach belongs to
    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::NorthSouth,
            Direction::East | Direction::West => Axis::EastWest,
        }
    }

    /// Fixed entry coordinate just outside the intersection bounds
    pub fn entry_position(self) -> Position {
        match self {
            Direction::North => Position::new(48.0, -10.0),
            Direction::South => Position::new(52.0, 110.0),
            Direction::East => Position::new(110.0, 48.0),
            Direction::West => Position::new(-10.0, 52.0),
        }
    }

    /// Inclusive band on the travel axis where a vehicle holds for a red light
    pub fn stop_zone(self) -> (f32, f32) {
        match self {
            Direction::North => (35.0, 40.0),
            Direction::South => (60.0, 65.0),
            Direction::East => (60.0, 65.0),
            Direction::West => (35.0, 40.0),
        }
    }

    /// Move a position along this approach's travel direction
    pub fn advance(self, position: Position, distance: f32) -> Position {
        match self {
            Direction::North => Position::new(position.x, position.y + distance),
            Direction::South => Position::new(position.x, position.y - distance),
            Direction::East => Position::new(position.x - distance, position.y),
            Direction::West => Position::new(position.x + distance, position.y),
        }
    }

    /// The coordinate that changes as a vehicle on this approach travels
    pub fn travel_coordinate(self, position: Position) -> f32 {
        match self.axis() {
            Axis::NorthSouth => position.y,
            Axis::EastWest => position.x,
        }
    }

    /// Whether a position lies past the far side of the intersection
    pub fn has_exited(self, position: Position) -> bool {
        match self {
            Direction::North => position.y > EXIT_MAX,
            Direction::South => position.y < EXIT_MIN,
            Direction::East => position.x < EXIT_MIN,
            Direction::West => position.x > EXIT_MAX,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// One of the two traffic streams crossing the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::NorthSouth => f.write_str("NS"),
            Axis::EastWest => f.write_str("EW"),
        }
    }
}

/// Color of a single signal head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightColor {
    Red,
    Yellow,
    Green,
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LightColor::Red => "red",
            LightColor::Yellow => "yellow",
            LightColor::Green => "green",
        };
        f.write_str(name)
    }
}

/// A position in the normalized 0-100 intersection plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Far-side threshold for vehicles arriving from the south or east
pub const EXIT_MIN: f32 = -10.0;

/// Far-side threshold for vehicles arriving from the north or west
pub const EXIT_MAX: f32 = 110.0;

/// Waiting time accumulated per motion tick spent at a stop line
pub const WAIT_INCREMENT: f32 = 0.1;

/// Maximum vehicle count before further spawns are dropped
pub const MAX_VEHICLES: usize = 50;

/// Probability that a spawn is an emergency vehicle when emergency mode is off
pub const EMERGENCY_SPAWN_CHANCE: f64 = 0.05;
