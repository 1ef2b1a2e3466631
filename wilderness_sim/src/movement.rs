// Movement resolution: candidate clamping and the all-or-nothing accept rule.
//
// A candidate coordinate is clamped per axis with an asymmetric rule:
// below 0 becomes 0, and anything `>= cols - 1` becomes `cols - 1` (same
// for rows). The move is accepted only when clamping left the candidate
// unchanged. The last column/row is therefore reachable, while any step
// past it (or below 0) is rejected outright: no movement, cost 0.
//
// `Direction::None` never reaches the clamp: it is a free no-op that leaves
// the agent in place.
//
// This differs from the window clamp in `vision.rs`, whose upper bound is
// `cols`, not `cols - 1`. Both formulas are intentional.

use crate::map::GameMap;
use crate::types::{Direction, GridCoord};
use serde::{Deserialize, Serialize};

/// Outcome of resolving one candidate move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResolution {
    /// Where the agent ends up: the candidate if accepted, otherwise its
    /// original position.
    pub position: GridCoord,
    /// Cost of the destination cell, or 0 when rejected.
    pub cost: u32,
    pub accepted: bool,
}

impl MoveResolution {
    /// True when the agent ended up somewhere new.
    pub fn moved(&self, from: GridCoord) -> bool {
        self.accepted && self.position != from
    }
}

/// Resolve `direction` from `current`: the candidate step for a displacing
/// direction, a zero-cost stay for `Direction::None`.
pub fn resolve_direction(
    map: &GameMap,
    current: GridCoord,
    direction: Direction,
) -> MoveResolution {
    if direction == Direction::None {
        return MoveResolution {
            position: current,
            cost: 0,
            accepted: false,
        };
    }
    let (dx, dy) = direction.delta();
    resolve(map, current, current.offset(dx, dy))
}

/// Clamp `candidate` into the map using the resolver's bounds.
pub fn clamp_candidate(map: &GameMap, candidate: GridCoord) -> GridCoord {
    GridCoord::new(
        clamp_axis(candidate.x, map.cols()),
        clamp_axis(candidate.y, map.rows()),
    )
}

fn clamp_axis(v: i32, len: i32) -> i32 {
    if v < 0 {
        0
    } else if v >= len - 1 {
        len - 1
    } else {
        v
    }
}

/// Resolve a move from `current` to `candidate`. Pure: the caller applies
/// the result.
pub fn resolve(map: &GameMap, current: GridCoord, candidate: GridCoord) -> MoveResolution {
    let clamped = clamp_candidate(map, candidate);
    if clamped != candidate {
        return rejected(current);
    }
    // An unchanged clamp implies 0 <= candidate <= len - 1 on both axes.
    match map.terrain().get(clamped) {
        Some(cell) => MoveResolution {
            position: clamped,
            cost: cell.cost,
            accepted: true,
        },
        None => rejected(current),
    }
}

fn rejected(current: GridCoord) -> MoveResolution {
    MoveResolution {
        position: current,
        cost: 0,
        accepted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{TerrainCatalog, TerrainKind};
    use wilderness_prng::GameRng;

    fn forest_map(cols: i32, rows: i32) -> GameMap {
        let mut rng = GameRng::new(1);
        let catalog = TerrainCatalog::single(TerrainKind::forest());
        GameMap::generate(cols, rows, &catalog, &mut rng).unwrap()
    }

    #[test]
    fn clamp_axis_rule() {
        assert_eq!(clamp_axis(-1, 5), 0);
        assert_eq!(clamp_axis(0, 5), 0);
        assert_eq!(clamp_axis(3, 5), 3);
        assert_eq!(clamp_axis(4, 5), 4);
        assert_eq!(clamp_axis(5, 5), 4);
        assert_eq!(clamp_axis(50, 5), 4);
    }

    #[test]
    fn interior_move_accepted_with_cost() {
        let map = forest_map(5, 5);
        let r = resolve(&map, GridCoord::new(2, 2), GridCoord::new(3, 2));
        assert!(r.accepted);
        assert_eq!(r.position, GridCoord::new(3, 2));
        assert_eq!(r.cost, 3);
    }

    #[test]
    fn last_column_reachable() {
        let map = forest_map(5, 5);
        let r = resolve(&map, GridCoord::new(3, 2), GridCoord::new(4, 2));
        assert!(r.accepted);
        assert_eq!(r.position, GridCoord::new(4, 2));
    }

    #[test]
    fn overshoot_rejected() {
        let map = forest_map(5, 5);
        for (from, to) in [
            (GridCoord::new(4, 2), GridCoord::new(5, 2)),
            (GridCoord::new(0, 2), GridCoord::new(-1, 2)),
            (GridCoord::new(2, 0), GridCoord::new(2, -1)),
            (GridCoord::new(2, 4), GridCoord::new(2, 5)),
        ] {
            let r = resolve(&map, from, to);
            assert!(!r.accepted, "{from} -> {to} should be rejected");
            assert_eq!(r.position, from);
            assert_eq!(r.cost, 0);
        }
    }

    #[test]
    fn out_of_map_agent_stays_put() {
        let map = forest_map(5, 5);
        let from = GridCoord::new(-4, 9);
        let r = resolve(&map, from, GridCoord::new(-3, 9));
        assert!(!r.accepted);
        assert_eq!(r.position, from);
    }

    #[test]
    fn none_direction_is_free_and_stays() {
        let map = forest_map(5, 5);
        let here = GridCoord::new(1, 1);
        let r = resolve_direction(&map, here, Direction::None);
        assert_eq!(r.position, here);
        assert_eq!(r.cost, 0);
        assert!(!r.moved(here));
    }

    #[test]
    fn resolve_direction_steps_once() {
        let map = forest_map(5, 5);
        let here = GridCoord::new(1, 1);
        let r = resolve_direction(&map, here, Direction::Down);
        assert!(r.moved(here));
        assert_eq!(r.position, GridCoord::new(1, 2));
        assert_eq!(r.cost, 3);
    }

    #[test]
    fn one_by_one_map() {
        let map = forest_map(1, 1);
        let origin = GridCoord::new(0, 0);
        assert!(resolve(&map, origin, origin).accepted);
        assert!(!resolve(&map, origin, GridCoord::new(1, 0)).accepted);
    }
}
