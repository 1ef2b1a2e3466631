// Events emitted by `Simulation::step`.
//
// One movement event per command (`Moved`, `Idled` or `MoveRejected`),
// followed by `ExitReached` whenever the agent stands on the exit after its
// action. The sim does not stop agents at the exit; callers decide when an
// episode is over.

use crate::types::{AgentId, Direction, GridCoord};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// The agent entered a new cell and paid its cost.
    Moved {
        agent: AgentId,
        from: GridCoord,
        to: GridCoord,
        cost: u32,
    },
    /// `Direction::None`: no movement, no cost, one step.
    Idled { agent: AgentId, at: GridCoord },
    /// The step would have left the map; the agent stayed.
    MoveRejected {
        agent: AgentId,
        at: GridCoord,
        direction: Direction,
    },
    /// The agent is on the exit cell.
    ExitReached {
        agent: AgentId,
        steps: u64,
        score: u64,
    },
}

/// Everything produced by one `Simulation::step` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepResult {
    pub events: Vec<SimEvent>,
}

impl StepResult {
    /// Agents that reached the exit during this step, in event order.
    pub fn exits(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.events.iter().filter_map(|e| match e {
            SimEvent::ExitReached { agent, .. } => Some(*agent),
            _ => None,
        })
    }

    /// Total cost paid across all moves in this step.
    pub fn total_cost(&self) -> u64 {
        self.events
            .iter()
            .map(|e| match e {
                SimEvent::Moved { cost, .. } => u64::from(*cost),
                _ => 0,
            })
            .sum()
    }
}
