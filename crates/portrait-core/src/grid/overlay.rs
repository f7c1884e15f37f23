use tracing::warn;

use crate::consts::{MAX_GRID_LINES, ORIGIN_LABEL, ORIGIN_LABEL_MARGIN};
use crate::error::{Result, ViewerError};
use crate::geometry::{DisplayRect, Point};
use crate::render::{RenderSurface, Stroke};

use super::config::GridConfiguration;

/// Line positions for one grid layout, in the same space as the input rect.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLines {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
    pub cell_size: f64,
}

impl GridLines {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Lays a square grid over a rectangle and draws it.
pub struct GridOverlay<'a> {
    config: &'a GridConfiguration,
}

impl<'a> GridOverlay<'a> {
    pub fn new(config: &'a GridConfiguration) -> Self {
        Self { config }
    }

    /// Lines tiling `(x, y, width, height)`, including a partial trailing cell.
    ///
    /// A rect too elongated to tile within [`MAX_GRID_LINES`] gets no lines.
    pub fn calculate_grid_lines(&self, x: f64, y: f64, width: f64, height: f64) -> GridLines {
        self.try_grid_lines(x, y, width, height).unwrap_or_else(|e| {
            warn!(width, height, "{e}");
            GridLines::default()
        })
    }

    /// Like [`calculate_grid_lines`](Self::calculate_grid_lines), but reports
    /// an over-dense grid as [`ViewerError::GridTooDense`].
    pub fn try_grid_lines(&self, x: f64, y: f64, width: f64, height: f64) -> Result<GridLines> {
        if !self.config.visible() || !DisplayRect::new(x, y, width, height).is_drawable() {
            return Ok(GridLines::default());
        }

        let cell = self.config.cell_size_for(width, height);
        let columns = (width / cell).ceil();
        let rows = (height / cell).ceil();
        let limit = MAX_GRID_LINES as f64;
        if !(columns < limit && rows < limit) {
            return Err(ViewerError::GridTooDense { columns, rows });
        }
        let (columns, rows) = (columns as usize, rows as usize);

        Ok(GridLines {
            vertical: (0..=columns).map(|i| x + i as f64 * cell).collect(),
            horizontal: (0..=rows).map(|i| y + i as f64 * cell).collect(),
            cell_size: cell,
        })
    }

    pub fn render<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) {
        let lines = self.calculate_grid_lines(x, y, width, height);
        if lines.is_empty() {
            return;
        }

        // Opacity replaces the color's own alpha.
        let [r, g, b, _] = self.config.color().to_rgba();
        let alpha = (self.config.opacity() * 255.0).round().clamp(0.0, 255.0) as u8;
        let stroke = Stroke {
            width: self.config.line_width(),
            color: [r, g, b, alpha],
        };

        for &lx in &lines.vertical {
            surface.draw_line(Point::new(lx, y), Point::new(lx, y + height), stroke);
        }
        for &ly in &lines.horizontal {
            surface.draw_line(Point::new(x, ly), Point::new(x + width, ly), stroke);
        }

        if let Some((col, row)) = self.config.origin_cell() {
            let anchor = Point::new(
                x + col as f64 * lines.cell_size + ORIGIN_LABEL_MARGIN,
                y + row as f64 * lines.cell_size + ORIGIN_LABEL_MARGIN,
            );
            // Label ignores the configured opacity.
            surface.draw_text(anchor, ORIGIN_LABEL, [r, g, b, 255]);
        }
    }
}

/// Effective square cell dimensions for a viewport.
pub fn ensure_square_cells(width: f64, height: f64) -> (f64, f64) {
    let side = width.min(height);
    (side, side)
}
