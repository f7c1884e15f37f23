//! Screen-space to grid-cell mapping for the status display.

use serde::Serialize;

use crate::geometry::{DisplayRect, Point};

/// Zero-based cell under a point and the position inside it, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridPosition {
    pub cell: (u32, u32),
    pub percent: (f64, f64),
}

/// Map a window point onto the grid laid over `image_rect`.
///
/// Returns `None` if the point is outside the displayed image or the cell
/// size is not positive.
pub fn map_screen_to_grid(
    point: Point,
    image_rect: DisplayRect,
    cell_size: f64,
) -> Option<GridPosition> {
    if !(cell_size > 0.0) || !image_rect.contains(point) {
        return None;
    }

    let rel_x = (point.x - image_rect.x) / cell_size;
    let rel_y = (point.y - image_rect.y) / cell_size;
    let col = rel_x.floor();
    let row = rel_y.floor();

    Some(GridPosition {
        cell: (col as u32, row as u32),
        percent: ((rel_x - col) * 100.0, (rel_y - row) * 100.0),
    })
}

/// One-based coordinates shown to the user.
///
/// With an origin cell, coordinates are relative to it and never drop below 1,
/// so every cell left of or above the origin reads as 1.
pub fn display_coordinates(cell: (u32, u32), origin: Option<(u32, u32)>) -> (u32, u32) {
    match origin {
        None => (cell.0 + 1, cell.1 + 1),
        Some((ox, oy)) => (relative(cell.0, ox), relative(cell.1, oy)),
    }
}

fn relative(raw: u32, origin: u32) -> u32 {
    let offset = raw as i64 - origin as i64 + 1;
    offset.max(1) as u32
}

pub fn status_text(position: Option<(GridPosition, (u32, u32))>) -> String {
    match position {
        None => "Ready".to_string(),
        Some((pos, (col, row))) => format!(
            "Grid: ({col}, {row}) | Position: ({:.0}%, {:.0}%)",
            pos.percent.0.floor(),
            pos.percent.1.floor()
        ),
    }
}
