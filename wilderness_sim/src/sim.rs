// Simulation controller: owns the map and the agents.
//
// `Simulation` is the only thing that mutates agent state. The single
// externally visible mutation is "apply a direction to an agent"
// (`apply_action`), which composes the movement resolver with the agent's
// bookkeeping:
//
//   1. resolve the direction against the map (`movement.rs`),
//   2. set the agent's position to the resolved position,
//   3. add the resolved cost to its score,
//   4. count one step, always, including rejected and idle actions,
//   5. return the cost.
//
// `step` batches `SimCommand`s through the same path and reports events.
// All commands in a batch are validated before any is applied, so an
// unknown agent handle leaves the state untouched.
//
// Registration appends the agent to the agent list and an `Agent` marker to
// the map's marker list, so each registered agent has exactly one marker.
// Registering an equal agent twice yields two independent entries.
//
// Exit detection is a query (`is_at_exit`). The sim has two observable
// states per agent, running and exit-reached, but never refuses actions
// after the exit; stopping is the caller's policy.
//
// See also: `map.rs` for the terrain and exit, `vision.rs` for the
// observation window, `command.rs`/`event.rs` for the batch interface,
// `episode.rs` for the single-agent policy wrapper.

use crate::agent::Agent;
use crate::command::{SimAction, SimCommand};
use crate::config::GameConfig;
use crate::error::SimError;
use crate::event::{SimEvent, StepResult};
use crate::map::{GameMap, Marker, MapGenerator};
use crate::movement::{self, MoveResolution};
use crate::types::{AgentId, DisplayTag, Direction, Displayable, GridCoord, Positioned};
use crate::vision::Window;
use wilderness_prng::GameRng;

/// The running game: one map, a vision radius, and registered agents.
#[derive(Clone, Debug)]
pub struct Simulation {
    map: GameMap,
    vision: i32,
    agents: Vec<Agent>,
}

impl Simulation {
    pub fn new(map: GameMap, vision: i32) -> Self {
        Self {
            map,
            vision,
            agents: Vec::new(),
        }
    }

    /// Generate a map from `config` with a fresh PRNG seeded by `seed`.
    pub fn from_config(config: &GameConfig, seed: u64) -> Result<Self, SimError> {
        let mut rng = GameRng::new(seed);
        let map =
            MapGenerator::new().generate(config.cols, config.rows, &config.terrain, &mut rng)?;
        Ok(Self::new(map, config.vision))
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn vision(&self) -> i32 {
        self.vision
    }

    /// Add an agent to the active set and the marker list.
    pub fn register_agent(&mut self, agent: Agent) -> AgentId {
        let id = AgentId(self.agents.len());
        tracing::debug!(%id, name = %agent.name, position = %agent.position(), "registered agent");
        self.agents.push(agent);
        self.map.push_marker(Marker::Agent(id));
        id
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    /// Registered agents in registration order; the index is the `AgentId`.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    fn agent_or_err(&self, id: AgentId) -> Result<&Agent, SimError> {
        self.agent(id).ok_or(SimError::UnknownAgent(id))
    }

    /// Apply one directional action and return its cost (0 when the move
    /// was rejected or `direction` is `None`).
    pub fn apply_action(&mut self, id: AgentId, direction: Direction) -> Result<u32, SimError> {
        Ok(self.perform(id, direction)?.cost)
    }

    fn perform(&mut self, id: AgentId, direction: Direction) -> Result<MoveResolution, SimError> {
        let current = self.agent_or_err(id)?.position();
        let resolution = movement::resolve_direction(&self.map, current, direction);

        let agent = self
            .agents
            .get_mut(id.0)
            .ok_or(SimError::UnknownAgent(id))?;
        agent.set_position(resolution.position);
        agent.add_score(resolution.cost);
        agent.count_step();

        if resolution.accepted {
            tracing::debug!(
                agent = %agent.name,
                position = %resolution.position,
                cost = resolution.cost,
                "agent moved"
            );
        } else {
            tracing::trace!(agent = %agent.name, %direction, at = %current, "move not applied");
        }
        Ok(resolution)
    }

    /// Apply `commands` in order. Fails with `UnknownAgent` before applying
    /// anything if any command targets an unregistered handle.
    pub fn step(&mut self, commands: &[SimCommand]) -> Result<StepResult, SimError> {
        if let Some(bad) = commands.iter().find(|c| self.agent(c.agent).is_none()) {
            return Err(SimError::UnknownAgent(bad.agent));
        }

        let mut result = StepResult::default();
        for cmd in commands {
            match cmd.action {
                SimAction::Move { direction } => {
                    let from = self.agent_or_err(cmd.agent)?.position();
                    let resolution = self.perform(cmd.agent, direction)?;
                    let event = movement_event(cmd.agent, from, direction, &resolution);
                    result.events.push(event);
                }
            }
            let agent = self.agent_or_err(cmd.agent)?;
            if self.map.is_at_exit(agent) {
                tracing::info!(
                    agent = %agent.name,
                    steps = agent.steps(),
                    score = agent.score(),
                    "agent reached the exit"
                );
                result.events.push(SimEvent::ExitReached {
                    agent: cmd.agent,
                    steps: agent.steps(),
                    score: agent.score(),
                });
            }
        }
        Ok(result)
    }

    pub fn is_at_exit(&self, id: AgentId) -> Result<bool, SimError> {
        Ok(self.map.is_at_exit(self.agent_or_err(id)?))
    }

    /// Terrain around an arbitrary point.
    pub fn observe_around(&self, x: i32, y: i32, distance: i32) -> Window<'_> {
        self.map.observe_around(x, y, distance)
    }

    /// What agent `id` currently sees, using the simulation's vision radius.
    pub fn observe(&self, id: AgentId) -> Result<Window<'_>, SimError> {
        let pos = self.agent_or_err(id)?.position();
        Ok(self.map.observe_around(pos.x, pos.y, self.vision))
    }

    pub fn get_cost(&self, x: i32, y: i32) -> Result<u32, SimError> {
        self.map.get_cost(x, y)
    }

    /// Markers resolved to position and display tag, in marker-list order.
    pub fn marker_positions(&self) -> Vec<(Marker, GridCoord, &DisplayTag)> {
        self.map
            .markers()
            .iter()
            .filter_map(|&marker| match marker {
                Marker::Exit => {
                    let exit = self.map.exit();
                    Some((marker, exit.position(), exit.display_tag()))
                }
                Marker::Agent(id) => self
                    .agent(id)
                    .map(|a| (marker, a.position(), a.display_tag())),
            })
            .collect()
    }
}

fn movement_event(
    agent: AgentId,
    from: GridCoord,
    direction: Direction,
    resolution: &MoveResolution,
) -> SimEvent {
    if direction == Direction::None {
        SimEvent::Idled { agent, at: from }
    } else if resolution.accepted {
        SimEvent::Moved {
            agent,
            from,
            to: resolution.position,
            cost: resolution.cost,
        }
    } else {
        SimEvent::MoveRejected {
            agent,
            at: from,
            direction,
        }
    }
}
