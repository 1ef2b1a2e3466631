// Text rendering of a vision window for the console front-end.
//
// A window is printed screen-row by screen-row (dy outer, dx inner). Each
// tile's symbol is repeated `x_scale` times and each screen row is repeated
// `y_scale` times, so a square tile looks roughly square in a terminal.
// Agents visible in the window are drawn over the terrain; the exit is not
// drawn, since finding it is the point of the game.

use wilderness_sim::map::Marker;
use wilderness_sim::types::{DisplayTag, GridCoord};
use wilderness_sim::vision::Window;

/// Horizontal and vertical repetition factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scale {
    pub x: usize,
    pub y: usize,
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 4, y: 2 }
    }
}

/// Render `window` with `overlays` (absolute coordinate, tag) drawn on top.
/// Overlays outside the window are ignored; later overlays win.
pub fn render_window(
    window: &Window<'_>,
    overlays: &[(GridCoord, &DisplayTag)],
    scale: Scale,
) -> String {
    let mut symbols: Vec<Vec<char>> = (0..window.height())
        .map(|dy| window.row(dy).map(|cell| cell.display.symbol).collect())
        .collect();
    for (coord, tag) in overlays {
        if let Some((dx, dy)) = window.to_local(*coord) {
            symbols[dy][dx] = tag.symbol;
        }
    }

    let mut out = String::new();
    for row in &symbols {
        let line: String = row
            .iter()
            .flat_map(|&symbol| std::iter::repeat_n(symbol, scale.x))
            .collect();
        for _ in 0..scale.y {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Keep only agent markers from a marker list.
pub fn agent_overlays<'a>(
    markers: &[(Marker, GridCoord, &'a DisplayTag)],
) -> Vec<(GridCoord, &'a DisplayTag)> {
    markers
        .iter()
        .filter(|(marker, _, _)| matches!(marker, Marker::Agent(_)))
        .map(|&(_, coord, tag)| (coord, tag))
        .collect()
}
