// Bounded observation windows over the terrain grid.
//
// `window_around(grid, x, y, d)` returns the cells in
// `[x1, x2) x [y1, y2)` where each bound is `center ± d` clamped into
// `[0, cols]` (resp. `[0, rows]`). The upper bound is exclusive, so a window
// spans at most `2d` cells per axis and sits one cell left/up of centre.
// Near corners the window shrinks; when either axis collapses to zero width
// the whole window is empty. Empty windows are a normal result.
//
// A `Window` borrows column slices from the grid. Nothing is copied and the
// grid is never mutated.

use crate::map::Grid;
use crate::terrain::TerrainCell;
use crate::types::GridCoord;

/// A rectangular read-only view into a `Grid`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window<'a> {
    origin: GridCoord,
    columns: Vec<&'a [TerrainCell]>,
}

impl<'a> Window<'a> {
    /// Grid coordinate of the window's `(0, 0)` cell.
    pub fn origin(&self) -> GridCoord {
        self.origin
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column slices, `x` ascending. Index as `columns()[dx][dy]`.
    pub fn columns(&self) -> &[&'a [TerrainCell]] {
        &self.columns
    }

    /// The cell at window-relative `(dx, dy)`.
    pub fn get(&self, dx: usize, dy: usize) -> Option<&'a TerrainCell> {
        self.columns.get(dx).and_then(|col| col.get(dy))
    }

    /// One row of the window, left to right.
    pub fn row(&self, dy: usize) -> impl Iterator<Item = &'a TerrainCell> + '_ {
        self.columns.iter().filter_map(move |col| col.get(dy))
    }

    /// Every cell with its absolute grid coordinate.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoord, &'a TerrainCell)> + '_ {
        let origin = self.origin;
        self.columns.iter().enumerate().flat_map(move |(dx, col)| {
            col.iter()
                .enumerate()
                .map(move |(dy, cell)| (origin.offset(dx as i32, dy as i32), cell))
        })
    }

    /// Window-relative coordinate of an absolute grid coordinate, if inside.
    pub fn to_local(&self, coord: GridCoord) -> Option<(usize, usize)> {
        let dx = usize::try_from(coord.x - self.origin.x).ok()?;
        let dy = usize::try_from(coord.y - self.origin.y).ok()?;
        (dx < self.width() && dy < self.height()).then_some((dx, dy))
    }

    /// Movement costs as a `[dx][dy]` matrix, for policies that want numbers
    /// rather than cells.
    pub fn cost_matrix(&self) -> Vec<Vec<u32>> {
        self.columns
            .iter()
            .map(|col| col.iter().map(|cell| cell.cost).collect())
            .collect()
    }
}

/// Clamp `v` into `[0, max]`.
fn limit(v: i32, max: i32) -> i32 {
    if v < 0 {
        0
    } else if v >= max {
        max
    } else {
        v
    }
}

/// Cells of `grid` around `(x, y)` within `distance`. See module docs for
/// the exact bounds.
pub fn window_around(grid: &Grid, x: i32, y: i32, distance: i32) -> Window<'_> {
    let x1 = limit(x.saturating_sub(distance), grid.cols());
    let x2 = limit(x.saturating_add(distance), grid.cols());
    let y1 = limit(y.saturating_sub(distance), grid.rows());
    let y2 = limit(y.saturating_add(distance), grid.rows());

    let origin = GridCoord::new(x1, y1);
    if x1 >= x2 || y1 >= y2 {
        return Window {
            origin,
            columns: Vec::new(),
        };
    }

    let columns = (x1..x2)
        .map(|cx| &grid[cx as usize][y1 as usize..y2 as usize])
        .collect();
    Window { origin, columns }
}
