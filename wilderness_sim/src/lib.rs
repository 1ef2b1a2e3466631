// wilderness_sim: deterministic grid-world simulation library.
//
// A rectangular map of terrain cells with movement costs, agents that move
// one cell per action, one hidden exit, and a score that accumulates the
// cost of every cell entered. Front-ends (console, graphical, RL drivers)
// consume the operations here and never touch the grid directly.
//
// Module overview:
// - `terrain.rs`:  TerrainKind, weighted TerrainCatalog, per-cell TerrainCell.
// - `map.rs`:      Grid, MapGenerator (weighted terrain draw + exit placement), GameMap.
// - `vision.rs`:   Clamped rectangular observation windows over the grid.
// - `movement.rs`: Candidate clamping and the all-or-nothing move accept rule.
// - `agent.rs`:    Agent position, score, and step counter.
// - `sim.rs`:      Simulation controller: registration, apply_action, step, queries.
// - `command.rs`:  SimCommand / SimAction for batched agent actions.
// - `event.rs`:    SimEvent / StepResult describing what a batch did.
// - `episode.rs`:  Single-agent reset/step/observe wrapper for policies.
// - `config.rs`:   GameConfig loaded from JSON.
// - `error.rs`:    SimError.
// - `types.rs`:    GridCoord, Direction, ids, DisplayTag, capability traits.
// - `prng`:        Re-exported from `wilderness_prng`.
//
// **Critical constraint: determinism.** Every random choice draws from a
// seeded `GameRng`. No OS entropy, no system time, no threads.

pub mod agent;
pub mod command;
pub mod config;
pub mod episode;
pub mod error;
pub mod event;
pub mod map;
pub mod movement;
pub use wilderness_prng as prng;
pub mod sim;
pub mod terrain;
pub mod types;
pub mod vision;
