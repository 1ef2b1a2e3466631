// Terrain grid, map generation, and the exit marker.
//
// `Grid` stores terrain column-major so that `grid[x][y]` addresses a cell
// directly. Dimensions are fixed at construction; there is no API that
// resizes a grid.
//
// `MapGenerator` builds a `GameMap` by drawing every cell from the weighted
// catalog (see `terrain.rs`) and then placing one exit in the far
// quadrant: x in `[ceil(3*cols/4), cols-1]`, y in `[ceil(3*rows/4), rows-1]`.
// For maps narrower than 4 cells the quadrant bound exceeds the last index
// and is pulled back to `cols-1` (resp. `rows-1`). The generator owns the
// `CellId` counter, so ids keep increasing across maps built by the same
// generator; a fresh generator starts again at 0.
//
// `GameMap` also keeps a frozen deep copy of the generated grid
// (`original_terrain`) and the marker list (exit first, then agents in
// registration order). The exit is not checked against agent start
// positions: an agent may spawn on it.
//
// See also: `vision.rs` for windowed queries over a `Grid`, `movement.rs`
// for the clamped move resolver that reads costs from here, `sim.rs` which
// owns the `GameMap`.

use crate::error::SimError;
use crate::terrain::{TerrainCatalog, TerrainCell};
use crate::types::{AgentId, CellId, DisplayTag, Displayable, GridCoord, Positioned};
use crate::vision::{self, Window};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use wilderness_prng::GameRng;

/// A `cols x rows` array of terrain cells, indexed `[x][y]`.
///
/// Deserialization goes through `GridData` and rejects any shape where the
/// column vectors disagree with `cols`/`rows`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    columns: Vec<Vec<TerrainCell>>,
    cols: i32,
    rows: i32,
}

/// Unchecked wire form of a `Grid`.
#[derive(Deserialize)]
struct GridData {
    columns: Vec<Vec<TerrainCell>>,
    cols: i32,
    rows: i32,
}

impl TryFrom<GridData> for Grid {
    type Error = SimError;

    fn try_from(data: GridData) -> Result<Self, SimError> {
        let GridData {
            columns,
            cols,
            rows,
        } = data;
        let shape_ok = cols > 0
            && rows > 0
            && columns.len() == cols as usize
            && columns.iter().all(|col| col.len() == rows as usize);
        if !shape_ok {
            return Err(SimError::InvalidDimension { cols, rows });
        }
        Ok(Self {
            columns,
            cols,
            rows,
        })
    }
}

impl Grid {
    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells, `cols * rows`.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.cols && coord.y < self.rows
    }

    /// The cell at `coord`, or `None` outside the grid.
    pub fn get(&self, coord: GridCoord) -> Option<&TerrainCell> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.columns.get(coord.x as usize)?.get(coord.y as usize)
    }

    /// All columns, `x` ascending.
    pub fn columns(&self) -> impl Iterator<Item = &[TerrainCell]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Every cell with its coordinate, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoord, &TerrainCell)> {
        self.columns.iter().enumerate().flat_map(|(x, col)| {
            col.iter()
                .enumerate()
                .map(move |(y, cell)| (GridCoord::new(x as i32, y as i32), cell))
        })
    }
}

impl Index<usize> for Grid {
    type Output = [TerrainCell];

    /// Column `x`. Panics when `x >= cols`, like slice indexing.
    fn index(&self, x: usize) -> &[TerrainCell] {
        &self.columns[x]
    }
}

// ---------------------------------------------------------------------------
// Exit and markers
// ---------------------------------------------------------------------------

/// The single exit of a map. Fixed at generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitPortal {
    pub position: GridCoord,
    pub display: DisplayTag,
}

impl ExitPortal {
    pub fn new(position: GridCoord) -> Self {
        Self {
            position,
            display: DisplayTag::new('E', "black"),
        }
    }
}

impl Positioned for ExitPortal {
    fn position(&self) -> GridCoord {
        self.position
    }
}

impl Displayable for ExitPortal {
    fn display_tag(&self) -> &DisplayTag {
        &self.display
    }
}

/// An entity drawn on top of terrain. Order matters only for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Exit,
    Agent(AgentId),
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Builds maps and hands out `CellId`s.
#[derive(Clone, Debug, Default)]
pub struct MapGenerator {
    next_cell_id: u64,
}

impl MapGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next generated cell will receive.
    pub fn next_cell_id(&self) -> u64 {
        self.next_cell_id
    }

    /// Generate a `cols x rows` map from `catalog`, drawing from `rng`.
    ///
    /// Fails with `InvalidDimension` for a non-positive size and
    /// `EmptyCatalog` when no kind has a positive weight. The catalog is only
    /// read.
    pub fn generate(
        &mut self,
        cols: i32,
        rows: i32,
        catalog: &TerrainCatalog,
        rng: &mut GameRng,
    ) -> Result<GameMap, SimError> {
        if cols <= 0 || rows <= 0 {
            return Err(SimError::InvalidDimension { cols, rows });
        }
        if catalog.total_weight() == 0 {
            return Err(SimError::EmptyCatalog);
        }

        let mut columns = Vec::with_capacity(cols as usize);
        for _x in 0..cols {
            let mut column = Vec::with_capacity(rows as usize);
            for _y in 0..rows {
                let kind = catalog.draw(rng).ok_or(SimError::EmptyCatalog)?;
                column.push(TerrainCell::from_kind(kind, CellId(self.next_cell_id)));
                self.next_cell_id += 1;
            }
            columns.push(column);
        }
        let terrain = Grid {
            columns,
            cols,
            rows,
        };

        let exit_x = rng.range_usize_inclusive(quadrant_start(cols), (cols - 1) as usize);
        let exit_y = rng.range_usize_inclusive(quadrant_start(rows), (rows - 1) as usize);
        let exit = ExitPortal::new(GridCoord::new(exit_x as i32, exit_y as i32));

        tracing::info!(
            cols,
            rows,
            exit = %exit.position,
            cells = terrain.len(),
            "generated terrain map"
        );

        Ok(GameMap {
            original_terrain: terrain.clone(),
            terrain,
            exit,
            markers: vec![Marker::Exit],
        })
    }
}

/// First index of the far quadrant along an axis of length `n`:
/// `ceil(3n/4)`, capped at `n - 1` so the range is never empty.
fn quadrant_start(n: i32) -> usize {
    let n = i64::from(n);
    let start = ((3 * n + 3) / 4).min(n - 1);
    start as usize
}

// ---------------------------------------------------------------------------
// The map
// ---------------------------------------------------------------------------

/// A generated map: terrain, its frozen original, the exit, and markers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameMap {
    terrain: Grid,
    original_terrain: Grid,
    exit: ExitPortal,
    markers: Vec<Marker>,
}

impl GameMap {
    /// Generate a map with a one-off generator (cell ids start at 0).
    pub fn generate(
        cols: i32,
        rows: i32,
        catalog: &TerrainCatalog,
        rng: &mut GameRng,
    ) -> Result<Self, SimError> {
        MapGenerator::new().generate(cols, rows, catalog, rng)
    }

    pub fn cols(&self) -> i32 {
        self.terrain.cols
    }

    pub fn rows(&self) -> i32 {
        self.terrain.rows
    }

    pub fn terrain(&self) -> &Grid {
        &self.terrain
    }

    /// The grid as it was right after generation.
    pub fn original_terrain(&self) -> &Grid {
        &self.original_terrain
    }

    /// True when every cell still has the identity and cost it was generated
    /// with.
    pub fn terrain_matches_original(&self) -> bool {
        self.terrain
            .cells()
            .zip(self.original_terrain.cells())
            .all(|((_, a), (_, b))| a.id == b.id && a.cost == b.cost)
    }

    pub fn exit(&self) -> &ExitPortal {
        &self.exit
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub(crate) fn push_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Movement cost of the cell at `(x, y)`. Strict: fails with
    /// `OutOfRange` outside the grid.
    pub fn get_cost(&self, x: i32, y: i32) -> Result<u32, SimError> {
        self.terrain
            .get(GridCoord::new(x, y))
            .map(|cell| cell.cost)
            .ok_or(SimError::OutOfRange {
                x,
                y,
                cols: self.cols(),
                rows: self.rows(),
            })
    }

    /// Terrain within `distance` of `(x, y)`. See `vision::window_around`.
    pub fn observe_around(&self, x: i32, y: i32, distance: i32) -> Window<'_> {
        vision::window_around(&self.terrain, x, y, distance)
    }

    /// Whether `entity` stands exactly on the exit.
    pub fn is_at_exit(&self, entity: &impl Positioned) -> bool {
        entity.position() == self.exit.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{CatalogEntry, TerrainKind};

    fn classic(cols: i32, rows: i32, seed: u64) -> GameMap {
        let mut rng = GameRng::new(seed);
        GameMap::generate(cols, rows, &TerrainCatalog::default(), &mut rng).unwrap()
    }

    #[test]
    fn generates_every_cell() {
        let map = classic(7, 5, 1);
        assert_eq!(map.terrain().len(), 35);
        assert_eq!(map.terrain().columns().count(), 7);
        assert!(map.terrain().columns().all(|c| c.len() == 5));
    }

    #[test]
    fn costs_come_from_catalog() {
        let costs = TerrainCatalog::default().costs();
        let map = classic(20, 20, 3);
        assert!(map.terrain().cells().all(|(_, c)| costs.contains(&c.cost)));
    }

    #[test]
    fn index_addresses_x_then_y() {
        let map = classic(6, 3, 11);
        for (coord, cell) in map.terrain().cells() {
            assert_eq!(&map.terrain()[coord.x as usize][coord.y as usize], cell);
        }
    }

    #[test]
    fn cell_ids_are_unique_and_increasing() {
        let map = classic(4, 4, 2);
        let ids: Vec<u64> = map.terrain().cells().map(|(_, c)| c.id.0).collect();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn generator_counter_spans_maps() {
        let mut generator = MapGenerator::new();
        let mut rng = GameRng::new(5);
        let catalog = TerrainCatalog::default();
        let first = generator.generate(3, 3, &catalog, &mut rng).unwrap();
        let second = generator.generate(2, 2, &catalog, &mut rng).unwrap();
        assert_eq!(generator.next_cell_id(), 13);
        let last_of_first = first.terrain().cells().map(|(_, c)| c.id).max().unwrap();
        let first_of_second = second.terrain().cells().map(|(_, c)| c.id).min().unwrap();
        assert!(first_of_second > last_of_first);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let mut rng = GameRng::new(0);
        let catalog = TerrainCatalog::default();
        for (c, r) in [(0, 5), (5, 0), (-1, 3), (0, 0)] {
            let err = GameMap::generate(c, r, &catalog, &mut rng).unwrap_err();
            assert!(
                matches!(err, SimError::InvalidDimension { cols, rows } if cols == c && rows == r),
                "unexpected error for {c}x{r}: {err}"
            );
        }
    }

    #[test]
    fn rejects_empty_catalog() {
        let mut rng = GameRng::new(0);
        let zeroed = TerrainCatalog {
            entries: vec![CatalogEntry {
                kind: TerrainKind::forest(),
                weight: 0,
            }],
        };
        assert!(matches!(
            GameMap::generate(3, 3, &zeroed, &mut rng),
            Err(SimError::EmptyCatalog)
        ));
    }

    #[test]
    fn generates_with_max_weight_catalog() {
        let mut rng = GameRng::new(3);
        let catalog = TerrainCatalog::single(TerrainKind::plains())
            .with_entry(TerrainKind::swamp(), u32::MAX);
        let map = GameMap::generate(8, 8, &catalog, &mut rng).unwrap();
        assert_eq!(map.terrain().len(), 64);
        assert!(map.terrain().cells().all(|(_, c)| c.cost == 0 || c.cost == 7));
    }

    #[test]
    fn exit_in_far_quadrant() {
        for seed in 0..200 {
            let map = classic(20, 12, seed);
            let exit = map.exit().position;
            assert!((15..=19).contains(&exit.x), "exit x {} (seed {seed})", exit.x);
            assert!((9..=11).contains(&exit.y), "exit y {} (seed {seed})", exit.y);
        }
    }

    #[test]
    fn quadrant_start_values() {
        assert_eq!(quadrant_start(1), 0);
        assert_eq!(quadrant_start(2), 1);
        assert_eq!(quadrant_start(3), 2);
        assert_eq!(quadrant_start(4), 3);
        assert_eq!(quadrant_start(5), 4);
        assert_eq!(quadrant_start(20), 15);
        assert_eq!(quadrant_start(21), 16);
    }

    #[test]
    fn one_by_one_map_has_exit_at_origin() {
        let map = classic(1, 1, 8);
        assert_eq!(map.exit().position, GridCoord::new(0, 0));
    }

    #[test]
    fn same_seed_same_map() {
        let a = classic(9, 9, 77);
        let b = classic(9, 9, 77);
        assert_eq!(a.terrain(), b.terrain());
        assert_eq!(a.exit(), b.exit());
    }

    #[test]
    fn get_cost_is_strict() {
        let map = classic(4, 3, 4);
        assert_eq!(map.get_cost(3, 2).unwrap(), map.terrain()[3][2].cost);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3)] {
            assert!(matches!(
                map.get_cost(x, y),
                Err(SimError::OutOfRange { cols: 4, rows: 3, .. })
            ));
        }
    }

    #[test]
    fn original_terrain_is_a_copy() {
        let map = classic(5, 5, 6);
        assert_eq!(map.original_terrain(), map.terrain());
        assert!(map.terrain_matches_original());
    }

    #[test]
    fn map_survives_json_roundtrip() {
        let map = classic(6, 4, 13);
        let json = serde_json::to_string(&map).unwrap();
        let restored: GameMap = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.terrain(), map.terrain());
        assert_eq!(restored.exit(), map.exit());
        assert_eq!(restored.get_cost(5, 3).unwrap(), map.get_cost(5, 3).unwrap());
    }

    #[test]
    fn malformed_grid_json_is_rejected() {
        let map = classic(3, 3, 13);
        let mut value = serde_json::to_value(&map).unwrap();
        value["terrain"]["columns"] = serde_json::json!([]);
        assert!(serde_json::from_value::<GameMap>(value).is_err());

        let mut value = serde_json::to_value(&map).unwrap();
        value["original_terrain"]["rows"] = serde_json::json!(4);
        assert!(serde_json::from_value::<GameMap>(value).is_err());

        let mut value = serde_json::to_value(&map).unwrap();
        value["terrain"]["columns"][1] = serde_json::json!([]);
        assert!(serde_json::from_value::<GameMap>(value).is_err());
    }

    #[test]
    fn new_map_has_only_exit_marker() {
        let map = classic(5, 5, 6);
        assert_eq!(map.markers(), &[Marker::Exit]);
    }
}
