// Agent state: position, cumulative score, and step count.
//
// Agents are created freely (no bounds check) and mutated only by the
// `Simulation` that owns them. Score never decreases and steps grow by
// exactly one per applied action, accepted or not.

use crate::types::{DisplayTag, Displayable, Direction, GridCoord, Positioned};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player moving across the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Label for display. Not required to be unique.
    pub name: String,
    position: GridCoord,
    score: u64,
    steps: u64,
    display: DisplayTag,
}

impl Agent {
    pub fn new(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            position: GridCoord::new(x, y),
            score: 0,
            steps: 0,
            display: DisplayTag::new('@', "red"),
        }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Where this agent would end up moving in `direction`, ignoring the map.
    pub fn try_move(&self, direction: Direction) -> GridCoord {
        let (dx, dy) = direction.delta();
        self.position.offset(dx, dy)
    }

    /// One-line status, e.g. `Human One [3, 4].... score: 10`.
    pub fn stats_line(&self) -> String {
        format!(
            "{} [{}, {}].... score: {}",
            self.name, self.position.x, self.position.y, self.score
        )
    }

    pub(crate) fn set_position(&mut self, position: GridCoord) {
        self.position = position;
    }

    pub(crate) fn add_score(&mut self, cost: u32) {
        self.score += u64::from(cost);
    }

    pub(crate) fn count_step(&mut self) {
        self.steps += 1;
    }
}

impl Positioned for Agent {
    fn position(&self) -> GridCoord {
        self.position
    }
}

impl Displayable for Agent {
    fn display_tag(&self) -> &DisplayTag {
        &self.display
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_agent_starts_clean() {
        let agent = Agent::new("scout", 3, 4);
        assert_eq!(agent.position(), GridCoord::new(3, 4));
        assert_eq!(agent.score(), 0);
        assert_eq!(agent.steps(), 0);
    }

    #[test]
    fn out_of_range_start_is_accepted() {
        let agent = Agent::new("lost", -5, 1000);
        assert_eq!((agent.x(), agent.y()), (-5, 1000));
    }

    #[test]
    fn try_move_only_suggests() {
        let agent = Agent::new("scout", 2, 2);
        assert_eq!(agent.try_move(Direction::Up), GridCoord::new(2, 1));
        assert_eq!(agent.try_move(Direction::Down), GridCoord::new(2, 3));
        assert_eq!(agent.try_move(Direction::Left), GridCoord::new(1, 2));
        assert_eq!(agent.try_move(Direction::Right), GridCoord::new(3, 2));
        assert_eq!(agent.try_move(Direction::None), GridCoord::new(2, 2));
        assert_eq!(agent.position(), GridCoord::new(2, 2));
    }

    #[test]
    fn stats_line_format() {
        let mut agent = Agent::new("Human One", 10, 10);
        agent.add_score(7);
        assert_eq!(agent.stats_line(), "Human One [10, 10].... score: 7");
        assert_eq!(agent.to_string(), "Human One");
    }
}
