// Core types shared across the simulation.
//
// Defines grid coordinates (`GridCoord`), the `Direction` action token,
// compact identifiers for agents and terrain cells, and the opaque display
// metadata (`DisplayTag`) carried by terrain and markers. Two small
// capability traits, `Positioned` and `Displayable`, are implemented by the
// structs that have a location or a look; renderers work against those
// traits instead of concrete types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A cell position. `x` indexes columns, `y` indexes rows; `(0, 0)` is the
/// top-left corner and `y` grows downward ("up" decrements `y`).
///
/// Coordinates are signed: agents may be created outside the map and only
/// get clamped or rejected when they try to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate displaced by `(dx, dy)`. Saturates instead of
    /// overflowing at the `i32` limits.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A canonical movement token. `None` is a legal action with zero
/// displacement: it costs nothing but still counts as a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    /// The four displacing directions, in action-index order.
    pub const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Displacement `(dx, dy)` for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    /// Parse a canonical label. Anything other than `up`, `down`, `left` or
    /// `right` (exact, lowercase) maps to `None`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "up" => Direction::Up,
            "down" => Direction::Down,
            "left" => Direction::Left,
            "right" => Direction::Right,
            _ => Direction::None,
        }
    }

    /// WASD keyboard mapping used by front-ends.
    pub fn from_key(key: char) -> Self {
        match key {
            'w' => Direction::Up,
            's' => Direction::Down,
            'a' => Direction::Left,
            'd' => Direction::Right,
            _ => Direction::None,
        }
    }

    /// Map a discrete policy action index onto `MOVES`. Out-of-range indices
    /// become `None`.
    pub fn from_action_index(index: usize) -> Self {
        Self::MOVES.get(index).copied().unwrap_or(Direction::None)
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::None => "none",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Handle for an agent registered with a `Simulation`. Dense index into the
/// simulation's agent list, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

/// Identity of a terrain cell, assigned by the `MapGenerator` that built it.
/// Informational only: nothing in the sim branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u64);

// ---------------------------------------------------------------------------
// Display metadata and capabilities
// ---------------------------------------------------------------------------

/// Opaque presentation data. The sim copies it around but never reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTag {
    pub symbol: char,
    pub color: String,
}

impl DisplayTag {
    pub fn new(symbol: char, color: impl Into<String>) -> Self {
        Self {
            symbol,
            color: color.into(),
        }
    }
}

/// Something that occupies a cell.
pub trait Positioned {
    fn position(&self) -> GridCoord;
}

/// Something a renderer can draw.
pub trait Displayable {
    fn display_tag(&self) -> &DisplayTag;
}
