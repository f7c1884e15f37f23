use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, info};

use crate::config::{ViewerConfig, ZoomSettings};
use crate::coords::{display_coordinates, map_screen_to_grid, status_text, GridPosition};
use crate::error::{Result, ViewerError};
use crate::filter::FilterState;
use crate::geometry::{DisplayRect, Point};
use crate::grid::{GridColor, GridConfiguration, GridOverlay};
use crate::image_data::LoadedImage;
use crate::io::export_image;
use crate::render::RenderSurface;
use crate::viewport::{checked_dimension, Viewport};

/// What changed after a successful viewer mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    ImageChanged,
    ViewportChanged,
    GridChanged,
    FilterChanged,
}

/// Toolkit-free viewer state: one image, its viewport, the grid and the filter.
///
/// Front-ends forward input to the methods here and repaint from the queries.
/// Subscribers get a [`ViewerEvent`] for every successful mutation.
pub struct ImageViewer {
    zoom: ZoomSettings,
    grid: GridConfiguration,
    image: Option<LoadedImage>,
    viewport: Option<Viewport>,
    filter: FilterState,
    window_size: (u32, u32),
    pan_anchor: Option<Point>,
    subscribers: Vec<Sender<ViewerEvent>>,
}

impl ImageViewer {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let grid = GridConfiguration::from_settings(&config.grid)?;
        let window_size = (
            checked_dimension("window width", config.window.width as i64)?,
            checked_dimension("window height", config.window.height as i64)?,
        );
        Ok(Self {
            zoom: config.zoom.clone(),
            grid,
            image: None,
            viewport: None,
            filter: FilterState::default(),
            window_size,
            pan_anchor: None,
            subscribers: Vec::new(),
        })
    }

    pub fn subscribe(&mut self) -> Receiver<ViewerEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: ViewerEvent) {
        if let Some(vp) = &self.viewport {
            let (dw, dh) = vp.get_display_size();
            self.grid.calculate_cell_size(dw, dh);
        }
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    // -- image ---------------------------------------------------------------

    /// Replace the current image. Viewport and filter start fresh and the
    /// origin cell is cleared.
    pub fn set_image(&mut self, image: LoadedImage) -> Result<()> {
        let (ww, wh) = self.window_size;
        let viewport = Viewport::new(image.width(), image.height(), ww, wh)?;

        info!(
            width = image.width(),
            height = image.height(),
            source = %image.source(),
            "Image set"
        );
        self.filter = FilterState::new(Some(Arc::clone(image.pixels())), false);
        self.viewport = Some(viewport);
        self.image = Some(image);
        self.pan_anchor = None;
        self.grid.set_origin_cell(None);
        self.emit(ViewerEvent::ImageChanged);
        Ok(())
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn grid(&self) -> &GridConfiguration {
        &self.grid
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn zoom_settings(&self) -> &ZoomSettings {
        &self.zoom
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Buffer currently on screen: grayscale or original.
    pub fn current_image(&self) -> Option<Arc<DynamicImage>> {
        self.filter.get_current_image()
    }

    // -- viewport ------------------------------------------------------------

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if let Some(vp) = self.viewport.as_mut() {
            vp.resize_window(width, height)?;
        } else {
            checked_dimension("window width", width as i64)?;
            checked_dimension("window height", height as i64)?;
        }
        if self.window_size == (width, height) {
            return Ok(());
        }
        self.window_size = (width, height);
        self.emit(ViewerEvent::ViewportChanged);
        Ok(())
    }

    /// Wheel zoom. Positive `delta` zooms in, negative zooms out.
    pub fn scroll(&mut self, delta: f64, cursor: Point) -> Result<()> {
        if delta == 0.0 {
            return Ok(());
        }
        let anchor = self.zoom.zoom_to_cursor.then(|| self.center_relative(cursor));
        let Some(vp) = self.viewport.as_mut() else {
            return Ok(());
        };
        if delta > 0.0 {
            vp.zoom_in(self.zoom.wheel_in_factor, anchor)?;
        } else {
            vp.zoom_out(self.zoom.wheel_out_factor, anchor)?;
        }
        self.emit(ViewerEvent::ViewportChanged);
        Ok(())
    }

    /// Pan offsets are measured from the window center, so zoom anchors are too.
    fn center_relative(&self, p: Point) -> Point {
        let (ww, wh) = self.window_size;
        Point::new(p.x - ww as f64 / 2.0, p.y - wh as f64 / 2.0)
    }

    pub fn zoom_in(&mut self) -> Result<()> {
        let factor = self.zoom.step_in_factor;
        self.with_viewport(|vp| vp.zoom_in(factor, None))
    }

    pub fn zoom_out(&mut self) -> Result<()> {
        let factor = self.zoom.step_out_factor;
        self.with_viewport(|vp| vp.zoom_out(factor, None))
    }

    pub fn reset_zoom(&mut self) -> Result<()> {
        self.with_viewport(|vp| {
            vp.reset_zoom();
            Ok(())
        })
    }

    fn with_viewport(&mut self, f: impl FnOnce(&mut Viewport) -> Result<()>) -> Result<()> {
        let Some(vp) = self.viewport.as_mut() else {
            return Ok(());
        };
        f(vp)?;
        self.emit(ViewerEvent::ViewportChanged);
        Ok(())
    }

    pub fn begin_pan(&mut self, point: Point) {
        if self.viewport.is_some() {
            self.pan_anchor = Some(point);
        }
    }

    /// Pan by the pointer movement since the last drag position.
    pub fn drag_to(&mut self, point: Point) {
        let Some(anchor) = self.pan_anchor else {
            return;
        };
        let Some(vp) = self.viewport.as_mut() else {
            return;
        };
        vp.pan(point.x - anchor.x, point.y - anchor.y);
        self.pan_anchor = Some(point);
        self.emit(ViewerEvent::ViewportChanged);
    }

    pub fn end_pan(&mut self) {
        self.pan_anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    // -- filter --------------------------------------------------------------

    pub fn toggle_grayscale(&mut self) -> Result<()> {
        if self.image.is_none() {
            return Err(ViewerError::NoImageData);
        }
        self.filter.toggle_grayscale()?;
        self.emit(ViewerEvent::FilterChanged);
        Ok(())
    }

    pub fn set_grayscale(&mut self, enabled: bool) -> Result<()> {
        if self.image.is_none() {
            return Err(ViewerError::NoImageData);
        }
        if self.filter.is_grayscale() == enabled {
            return Ok(());
        }
        self.filter.set_grayscale(enabled)?;
        self.emit(ViewerEvent::FilterChanged);
        Ok(())
    }

    // -- grid ----------------------------------------------------------------

    pub fn toggle_grid(&mut self) {
        self.grid.toggle_visible();
        self.emit(ViewerEvent::GridChanged);
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        if self.grid.visible() == visible {
            return;
        }
        self.grid.set_visible(visible);
        self.emit(ViewerEvent::GridChanged);
    }

    /// Smaller cells. Shows the grid first if it is hidden.
    pub fn more_subdivisions(&mut self) {
        if !self.grid.visible() {
            self.grid.set_visible(true);
        }
        self.grid.decrease_size();
        self.emit(ViewerEvent::GridChanged);
    }

    /// Larger cells. Shows the grid first if it is hidden.
    pub fn fewer_subdivisions(&mut self) {
        if !self.grid.visible() {
            self.grid.set_visible(true);
        }
        self.grid.increase_size();
        self.emit(ViewerEvent::GridChanged);
    }

    pub fn set_subdivision_count(&mut self, count: u32) -> Result<()> {
        self.grid.set_subdivision_count(count)?;
        self.emit(ViewerEvent::GridChanged);
        Ok(())
    }

    pub fn set_grid_color(&mut self, color: GridColor) {
        self.grid.set_color(color);
        self.emit(ViewerEvent::GridChanged);
    }

    pub fn can_set_origin(&self) -> bool {
        self.grid.visible() && self.image.is_some()
    }

    /// Make the cell under `point` the logical (1, 1).
    ///
    /// Returns `Ok(false)` when the grid is hidden or the point misses the image.
    pub fn set_origin_at(&mut self, point: Point) -> Result<bool> {
        if self.image.is_none() {
            return Err(ViewerError::NoImageData);
        }
        if !self.grid.visible() {
            return Ok(false);
        }
        let Some(pos) = self.grid_position_at(point) else {
            return Ok(false);
        };
        self.grid.set_origin_cell(Some(pos.cell));
        self.emit(ViewerEvent::GridChanged);
        Ok(true)
    }

    // -- queries -------------------------------------------------------------

    /// Where the image is drawn in window coordinates.
    pub fn image_rect(&self) -> Option<DisplayRect> {
        self.viewport.as_ref().map(Viewport::display_rect)
    }

    /// Grid cell size for the current display size.
    pub fn cell_size(&self) -> Option<f64> {
        self.viewport.as_ref().map(|vp| {
            let (dw, dh) = vp.get_display_size();
            self.grid.cell_size_for(dw, dh)
        })
    }

    pub fn grid_position_at(&self, point: Point) -> Option<GridPosition> {
        let rect = self.image_rect()?;
        let cell = self.cell_size()?;
        map_screen_to_grid(point, rect, cell)
    }

    /// Status-bar text for the cursor at `point`.
    pub fn cursor_status(&self, point: Point) -> String {
        let position = if self.grid.visible() {
            self.grid_position_at(point)
                .map(|pos| (pos, display_coordinates(pos.cell, self.grid.origin_cell())))
        } else {
            None
        };
        status_text(position)
    }

    /// Draw the current buffer into the image rect, then the grid over it.
    pub fn paint<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        let (Some(rect), Some(current)) = (self.image_rect(), self.current_image()) else {
            return;
        };
        surface.draw_image(&current, rect);
        GridOverlay::new(&self.grid).render(surface, rect.x, rect.y, rect.width, rect.height);
    }

    /// Save the current buffer, optionally with the grid drawn at full resolution.
    pub fn export(&self, path: &Path, with_grid: bool) -> Result<()> {
        let current = self.current_image().ok_or(ViewerError::NoImageData)?;
        let grid = with_grid.then_some(&self.grid);
        debug!(path = %path.display(), with_grid, "Exporting current image");
        export_image(path, &current, grid)
    }
}
