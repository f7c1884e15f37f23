use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GridSettings;
use crate::consts::{
    DEFAULT_LINE_WIDTH, DEFAULT_OPACITY, DEFAULT_SUBDIVISIONS, MAX_SUBDIVISIONS, MIN_SUBDIVISIONS,
};
use crate::error::{Result, ViewerError};

/// Grid line color, RGB or RGBA with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub enum GridColor {
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl GridColor {
    pub const WHITE: Self = Self::Rgb([255, 255, 255]);

    pub fn from_channels(channels: &[u8]) -> Result<Self> {
        match *channels {
            [r, g, b] => Ok(Self::Rgb([r, g, b])),
            [r, g, b, a] => Ok(Self::Rgba([r, g, b, a])),
            _ => Err(ViewerError::InvalidColor(format!(
                "expected 3 or 4 channels, got {}",
                channels.len()
            ))),
        }
    }

    pub fn channels(&self) -> &[u8] {
        match self {
            Self::Rgb(c) => c,
            Self::Rgba(c) => c,
        }
    }

    /// RGBA with an implicit opaque alpha for RGB colors.
    pub fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::Rgb([r, g, b]) => [r, g, b, 255],
            Self::Rgba(c) => c,
        }
    }
}

impl Default for GridColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<Vec<u8>> for GridColor {
    type Error = ViewerError;

    fn try_from(channels: Vec<u8>) -> Result<Self> {
        Self::from_channels(&channels)
    }
}

impl From<GridColor> for Vec<u8> {
    fn from(color: GridColor) -> Self {
        color.channels().to_vec()
    }
}

/// Parses `"r,g,b"` or `"r,g,b,a"`.
impl FromStr for GridColor {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        let channels: Vec<u8> = s
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| ViewerError::InvalidColor(format!("'{s}': {e}")))?;
        Self::from_channels(&channels)
    }
}

impl fmt::Display for GridColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.channels().iter().map(u8::to_string).collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Grid overlay settings.
///
/// Cells are always square; their size depends on the smaller side of the
/// rectangle the grid is laid over.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfiguration {
    visible: bool,
    subdivision_count: u32,
    color: GridColor,
    line_width: f32,
    opacity: f32,
    origin_cell: Option<(u32, u32)>,
    cell_size: f64,
}

impl Default for GridConfiguration {
    fn default() -> Self {
        Self {
            visible: false,
            subdivision_count: DEFAULT_SUBDIVISIONS,
            color: GridColor::WHITE,
            line_width: DEFAULT_LINE_WIDTH,
            opacity: DEFAULT_OPACITY,
            origin_cell: None,
            cell_size: 0.0,
        }
    }
}

impl GridConfiguration {
    pub fn new(
        visible: bool,
        subdivision_count: u32,
        color: GridColor,
        line_width: f32,
        opacity: f32,
    ) -> Result<Self> {
        let config = Self {
            visible,
            subdivision_count,
            color,
            line_width,
            opacity,
            origin_cell: None,
            cell_size: 0.0,
        };
        config.validate()?;

        debug!(visible, subdivision_count, color = %color, "GridConfiguration created");
        Ok(config)
    }

    pub fn from_settings(settings: &GridSettings) -> Result<Self> {
        Self::new(
            settings.visible,
            settings.subdivision_count,
            settings.color,
            settings.line_width,
            settings.opacity,
        )
    }

    fn validate(&self) -> Result<()> {
        validate_subdivisions(self.subdivision_count)?;
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(ViewerError::InvalidLineWidth(self.line_width));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ViewerError::InvalidOpacity(self.opacity));
        }
        Ok(())
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn subdivision_count(&self) -> u32 {
        self.subdivision_count
    }

    pub fn color(&self) -> GridColor {
        self.color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn origin_cell(&self) -> Option<(u32, u32)> {
        self.origin_cell
    }

    /// Last value stored by [`calculate_cell_size`](Self::calculate_cell_size); 0 until then.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn toggle_visible(&mut self) {
        self.set_visible(!self.visible);
    }

    /// Hiding the grid also forgets the origin cell.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.origin_cell = None;
        }
        debug!(visible, "Grid visibility set");
    }

    /// Fewer subdivisions, larger cells. No-op at the minimum.
    pub fn increase_size(&mut self) {
        if self.subdivision_count > MIN_SUBDIVISIONS {
            self.subdivision_count -= 1;
            debug!(subdivisions = self.subdivision_count, "Grid size increased");
        }
    }

    /// More subdivisions, smaller cells. No-op at the maximum.
    pub fn decrease_size(&mut self) {
        if self.subdivision_count < MAX_SUBDIVISIONS {
            self.subdivision_count += 1;
            debug!(subdivisions = self.subdivision_count, "Grid size decreased");
        }
    }

    pub fn set_subdivision_count(&mut self, count: u32) -> Result<()> {
        validate_subdivisions(count)?;
        self.subdivision_count = count;
        Ok(())
    }

    pub fn set_color(&mut self, color: GridColor) {
        self.color = color;
        debug!(color = %color, "Grid color set");
    }

    pub fn set_color_channels(&mut self, channels: &[u8]) -> Result<()> {
        let color = GridColor::from_channels(channels)?;
        self.set_color(color);
        Ok(())
    }

    pub fn set_origin_cell(&mut self, cell: Option<(u32, u32)>) {
        self.origin_cell = cell;
        debug!(origin = ?cell, "Grid origin cell set");
    }

    /// Square cell size for a viewport, without touching any state.
    pub fn cell_size_for(&self, viewport_width: f64, viewport_height: f64) -> f64 {
        viewport_width.min(viewport_height) / self.subdivision_count as f64
    }

    pub fn calculate_cell_size(&mut self, viewport_width: f64, viewport_height: f64) {
        self.cell_size = self.cell_size_for(viewport_width, viewport_height);
        debug!(
            cell_size = self.cell_size,
            viewport_width, viewport_height, "Cell size calculated"
        );
    }
}

fn validate_subdivisions(count: u32) -> Result<()> {
    if !(MIN_SUBDIVISIONS..=MAX_SUBDIVISIONS).contains(&count) {
        return Err(ViewerError::OutOfRangeSubdivision(count as i64));
    }
    Ok(())
}
