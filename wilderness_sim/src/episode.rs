// Single-agent episode wrapper for policy-driven play.
//
// An `Episode` owns a `Simulation` with one agent placed at the map centre
// and exposes the reset/step/observe loop that reinforcement-learning
// drivers expect. Reward is the negated cost of the action; the episode is
// done once the agent stands on the exit, and truncated when the configured
// `max_steps` is reached. Stepping a finished episode is allowed and keeps
// applying actions, matching the sim's "caller decides" termination policy.

use crate::agent::Agent;
use crate::config::GameConfig;
use crate::error::SimError;
use crate::sim::Simulation;
use crate::types::{AgentId, Direction};
use crate::vision::Window;

/// What one `Episode::step` produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub cost: u32,
    pub reward: f64,
    /// The agent is on the exit.
    pub done: bool,
    /// The step limit was reached without finding the exit.
    pub truncated: bool,
    pub steps: u64,
    pub score: u64,
}

#[derive(Clone, Debug)]
pub struct Episode {
    config: GameConfig,
    sim: Simulation,
    agent: AgentId,
}

impl Episode {
    /// Number of discrete actions (`Direction::MOVES`).
    pub const ACTION_COUNT: usize = Direction::MOVES.len();

    pub fn action_count() -> usize {
        Self::ACTION_COUNT
    }

    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SimError> {
        let (sim, agent) = Self::build(&config, seed)?;
        Ok(Self { config, sim, agent })
    }

    fn build(config: &GameConfig, seed: u64) -> Result<(Simulation, AgentId), SimError> {
        let mut sim = Simulation::from_config(config, seed)?;
        let (x, y) = config.start_position();
        let agent = sim.register_agent(Agent::new("agent", x, y));
        Ok((sim, agent))
    }

    /// Start over on a freshly generated map.
    pub fn reset(&mut self, seed: u64) -> Result<(), SimError> {
        let (sim, agent) = Self::build(&self.config, seed)?;
        self.sim = sim;
        self.agent = agent;
        Ok(())
    }

    pub fn step(&mut self, direction: Direction) -> Result<StepOutcome, SimError> {
        let cost = self.sim.apply_action(self.agent, direction)?;
        let done = self.sim.is_at_exit(self.agent)?;
        let agent = self.agent()?;
        let truncated = !done && self.config.max_steps.is_some_and(|max| agent.steps() >= max);
        Ok(StepOutcome {
            cost,
            reward: -f64::from(cost),
            done,
            truncated,
            steps: agent.steps(),
            score: agent.score(),
        })
    }

    /// The agent's current vision window.
    pub fn observation(&self) -> Result<Window<'_>, SimError> {
        self.sim.observe(self.agent)
    }

    pub fn agent(&self) -> Result<&Agent, SimError> {
        self.sim
            .agent(self.agent)
            .ok_or(SimError::UnknownAgent(self.agent))
    }

    pub fn agent_id(&self) -> AgentId {
        self.agent
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
