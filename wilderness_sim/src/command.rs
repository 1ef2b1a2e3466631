// Commands that drive agents.
//
// Front-ends and policies can either call `Simulation::apply_action`
// directly or batch `SimCommand`s through `Simulation::step`, which applies
// them in order and reports what happened as `SimEvent`s (see `event.rs`).
// Commands carry canonical `Direction`s; key or label translation happens
// before a command is built.

use crate::types::{AgentId, Direction};
use serde::{Deserialize, Serialize};

/// An action addressed to one registered agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimCommand {
    pub agent: AgentId,
    pub action: SimAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimAction {
    /// Attempt one step. `Direction::None` is a legal idle action.
    Move { direction: Direction },
}

impl SimCommand {
    pub fn move_agent(agent: AgentId, direction: Direction) -> Self {
        Self {
            agent,
            action: SimAction::Move { direction },
        }
    }
}
