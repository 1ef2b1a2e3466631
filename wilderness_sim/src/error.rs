// Error taxonomy for the simulation.
//
// Only genuinely exceptional conditions live here. A move rejected at the
// map border and an unrecognized direction are ordinary outcomes reported
// through return values, never through `SimError`.

use crate::types::AgentId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Map construction with a non-positive width or height.
    #[error("invalid map dimensions {cols}x{rows}: both must be positive")]
    InvalidDimension { cols: i32, rows: i32 },

    /// Strict cell query outside the grid.
    #[error("cell ({x}, {y}) is outside the {cols}x{rows} map")]
    OutOfRange { x: i32, y: i32, cols: i32, rows: i32 },

    /// The terrain catalog has no entry with a positive weight, so there is
    /// nothing to draw from.
    #[error("terrain catalog has zero total weight")]
    EmptyCatalog,

    /// An agent handle that was not issued by this simulation.
    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
