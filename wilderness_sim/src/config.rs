// Data-driven game configuration.
//
// `GameConfig` holds map size, vision radius, the terrain catalog, and the
// optional episode step limit. It is loaded from JSON at startup; missing
// fields fall back to `Default` (a 20x20 map, vision 4, the plains/forest/
// swamp catalog) and unknown fields are rejected so typos do not pass
// silently. The sim never mutates its config.
//
// See also: `terrain.rs` for the catalog format, `sim.rs` and `episode.rs`
// which consume the config.

use crate::error::SimError;
use crate::terrain::TerrainCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Map width in cells.
    pub cols: i32,
    /// Map height in cells.
    pub rows: i32,
    /// Radius passed to the vision window when observing for an agent.
    pub vision: i32,
    /// Terrain kinds and sampling weights.
    pub terrain: TerrainCatalog,
    /// Episode truncation limit. `None` runs until the exit is found.
    pub max_steps: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 20,
            vision: 4,
            terrain: TerrainCatalog::default(),
            max_steps: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Starting cell used by the front-ends: the middle of the map.
    pub fn start_position(&self) -> (i32, i32) {
        (self.cols / 2, self.rows / 2)
    }
}
