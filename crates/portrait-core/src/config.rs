use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    DEFAULT_LINE_WIDTH, DEFAULT_OPACITY, DEFAULT_SUBDIVISIONS, DEFAULT_URL_TIMEOUT_SECS,
    DEFAULT_WHEEL_IN_FACTOR, DEFAULT_WHEEL_OUT_FACTOR, DEFAULT_ZOOM_IN_FACTOR,
    DEFAULT_ZOOM_OUT_FACTOR,
};
use crate::error::{Result, ViewerError};
use crate::grid::{GridColor, GridConfiguration};

/// User-tunable viewer settings, read from TOML. Missing keys take defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub grid: GridSettings,
    pub zoom: ZoomSettings,
    pub network: NetworkSettings,
    pub window: WindowSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub visible: bool,
    pub subdivision_count: u32,
    pub color: GridColor,
    pub line_width: f32,
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: false,
            subdivision_count: DEFAULT_SUBDIVISIONS,
            color: GridColor::WHITE,
            line_width: DEFAULT_LINE_WIDTH,
            opacity: DEFAULT_OPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    /// Multiplier per wheel tick towards the viewer.
    pub wheel_in_factor: f64,
    pub wheel_out_factor: f64,
    /// Multiplier for the zoom-in menu command and keyboard shortcut.
    pub step_in_factor: f64,
    pub step_out_factor: f64,
    /// Keep the point under the cursor fixed while wheel zooming.
    pub zoom_to_cursor: bool,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            wheel_in_factor: DEFAULT_WHEEL_IN_FACTOR,
            wheel_out_factor: DEFAULT_WHEEL_OUT_FACTOR,
            step_in_factor: DEFAULT_ZOOM_IN_FACTOR,
            step_out_factor: DEFAULT_ZOOM_OUT_FACTOR,
            zoom_to_cursor: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub url_timeout_secs: u64,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            url_timeout_secs: DEFAULT_URL_TIMEOUT_SECS,
        }
    }
}

impl NetworkSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.url_timeout_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| ViewerError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ViewerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ViewerError::Config(e.to_string()))
    }

    /// Reject values the viewer could not run with.
    pub fn validate(&self) -> Result<()> {
        GridConfiguration::from_settings(&self.grid)?;

        let z = &self.zoom;
        if !(z.wheel_in_factor > 1.0 && z.step_in_factor > 1.0) {
            return Err(ViewerError::Config(
                "zoom-in factors must be greater than 1.0".into(),
            ));
        }
        if !(z.wheel_out_factor > 0.0
            && z.wheel_out_factor < 1.0
            && z.step_out_factor > 0.0
            && z.step_out_factor < 1.0)
        {
            return Err(ViewerError::Config(
                "zoom-out factors must be between 0.0 and 1.0".into(),
            ));
        }
        if self.network.url_timeout_secs == 0 {
            return Err(ViewerError::Config(
                "url_timeout_secs must be positive".into(),
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ViewerError::Config(
                "window width and height must be positive".into(),
            ));
        }
        Ok(())
    }
}
