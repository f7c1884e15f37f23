use tracing::debug;

use crate::consts::{DEFAULT_ZOOM, DEFAULT_ZOOM_IN_FACTOR, DEFAULT_ZOOM_OUT_FACTOR, MAX_ZOOM, MIN_ZOOM};
use crate::error::{Result, ViewerError};
use crate::geometry::{DisplayRect, Point};

/// Convert a signed user-supplied dimension into a positive pixel count.
pub fn checked_dimension(axis: &'static str, value: i64) -> Result<u32> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ViewerError::InvalidDimension { axis, value }),
    }
}

fn require_positive(axis: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(ViewerError::InvalidDimension { axis, value: 0 });
    }
    Ok(())
}

/// Visible area and transformation state of the displayed image.
///
/// The image is fitted into the window preserving its aspect ratio, scaled by
/// `zoom`, and shifted from the window center by the pan offset. Pan is kept
/// within half the overscan on each axis, so at fit-to-window it is always zero.
#[derive(Clone, Debug)]
pub struct Viewport {
    image_width: u32,
    image_height: u32,
    image_aspect: f64,
    window_width: u32,
    window_height: u32,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    display_width: f64,
    display_height: f64,
    visible_region: DisplayRect,
}

impl Viewport {
    pub fn new(
        image_width: u32,
        image_height: u32,
        window_width: u32,
        window_height: u32,
    ) -> Result<Self> {
        require_positive("image width", image_width)?;
        require_positive("image height", image_height)?;
        require_positive("window width", window_width)?;
        require_positive("window height", window_height)?;

        let mut viewport = Self {
            image_width,
            image_height,
            image_aspect: image_width as f64 / image_height as f64,
            window_width,
            window_height,
            zoom: DEFAULT_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
            display_width: 0.0,
            display_height: 0.0,
            visible_region: DisplayRect::default(),
        };
        viewport.recalculate_display();

        debug!(
            image_width,
            image_height, window_width, window_height, "Viewport created"
        );
        Ok(viewport)
    }

    fn recalculate_display(&mut self) {
        let window_aspect = self.window_width as f64 / self.window_height as f64;

        if window_aspect > self.image_aspect {
            // Window is relatively wider: height binds.
            self.display_height = self.window_height as f64 * self.zoom;
            self.display_width = self.display_height * self.image_aspect;
        } else {
            self.display_width = self.window_width as f64 * self.zoom;
            self.display_height = self.display_width / self.image_aspect;
        }

        self.visible_region = DisplayRect::new(
            -self.pan_x,
            -self.pan_y,
            self.display_width,
            self.display_height,
        );
    }

    /// Set the zoom level, optionally keeping the screen point `center` fixed.
    ///
    /// Out-of-range levels are rejected before any state changes.
    pub fn set_zoom(&mut self, level: f64, center: Option<Point>) -> Result<()> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&level) {
            return Err(ViewerError::OutOfRangeZoom(level));
        }

        let old_zoom = self.zoom;
        self.zoom = level;

        if let Some(c) = center {
            let factor = level / old_zoom;
            self.pan_x = c.x - (c.x - self.pan_x) * factor;
            self.pan_y = c.y - (c.y - self.pan_y) * factor;
        }

        self.recalculate_display();
        self.constrain_pan();

        debug!(zoom = level, center = ?center, "Zoom set");
        Ok(())
    }

    /// Multiply the zoom by `factor`, clamped to the allowed range.
    pub fn zoom_in(&mut self, factor: f64, center: Option<Point>) -> Result<()> {
        let level = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.set_zoom(level, center)
    }

    pub fn zoom_out(&mut self, factor: f64, center: Option<Point>) -> Result<()> {
        let level = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.set_zoom(level, center)
    }

    /// `zoom_in` with the default step factor.
    pub fn zoom_in_step(&mut self, center: Option<Point>) -> Result<()> {
        self.zoom_in(DEFAULT_ZOOM_IN_FACTOR, center)
    }

    /// `zoom_out` with the default step factor.
    pub fn zoom_out_step(&mut self, center: Option<Point>) -> Result<()> {
        self.zoom_out(DEFAULT_ZOOM_OUT_FACTOR, center)
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.pan_x += delta_x;
        self.pan_y += delta_y;
        self.constrain_pan();
        self.recalculate_display();

        debug!(pan_x = self.pan_x, pan_y = self.pan_y, "Pan");
    }

    /// Clamp pan so at most half the overscan lies on either side.
    pub fn constrain_pan(&mut self) {
        let (max_x, max_y) = self.max_pan();
        self.pan_x = self.pan_x.clamp(-max_x, max_x);
        self.pan_y = self.pan_y.clamp(-max_y, max_y);
        self.visible_region.x = -self.pan_x;
        self.visible_region.y = -self.pan_y;
    }

    /// Largest allowed absolute pan offset on each axis at the current zoom.
    pub fn max_pan(&self) -> (f64, f64) {
        (
            ((self.display_width - self.window_width as f64) / 2.0).max(0.0),
            ((self.display_height - self.window_height as f64) / 2.0).max(0.0),
        )
    }

    /// Fit to window and center.
    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.recalculate_display();

        debug!("Zoom reset to fit-to-window");
    }

    pub fn resize_window(&mut self, width: u32, height: u32) -> Result<()> {
        require_positive("window width", width)?;
        require_positive("window height", height)?;

        self.window_width = width;
        self.window_height = height;
        self.recalculate_display();
        self.constrain_pan();

        debug!(width, height, "Window resized");
        Ok(())
    }

    pub fn get_display_size(&self) -> (f64, f64) {
        (self.display_width, self.display_height)
    }

    pub fn get_visible_region(&self) -> DisplayRect {
        self.visible_region
    }

    /// Top-left corner of the displayed image in window coordinates.
    pub fn image_origin(&self) -> Point {
        Point::new(
            (self.window_width as f64 - self.display_width) / 2.0 + self.pan_x,
            (self.window_height as f64 - self.display_height) / 2.0 + self.pan_y,
        )
    }

    /// Where the image lands inside the window.
    pub fn display_rect(&self) -> DisplayRect {
        let origin = self.image_origin();
        DisplayRect::new(origin.x, origin.y, self.display_width, self.display_height)
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    pub fn pan_offset(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    pub fn image_aspect_ratio(&self) -> f64 {
        self.image_aspect
    }
}
