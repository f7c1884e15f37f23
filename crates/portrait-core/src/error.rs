use std::path::PathBuf;

use thiserror::Error;

use crate::consts::{MAX_GRID_LINES, MAX_SUBDIVISIONS, MAX_ZOOM, MIN_SUBDIVISIONS, MIN_ZOOM};

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Invalid {axis}: {value} (must be a positive integer)")]
    InvalidDimension { axis: &'static str, value: i64 },

    #[error("Zoom level {0} out of range [{min}, {max}]", min = MIN_ZOOM, max = MAX_ZOOM)]
    OutOfRangeZoom(f64),

    #[error(
        "Subdivision count {0} out of range [{min}, {max}]",
        min = MIN_SUBDIVISIONS,
        max = MAX_SUBDIVISIONS
    )]
    OutOfRangeSubdivision(i64),

    #[error("Line width must be a finite positive number, got {0}")]
    InvalidLineWidth(f32),

    #[error("Opacity must be between 0.0 and 1.0, got {0}")]
    InvalidOpacity(f32),

    #[error("Color must be RGB or RGBA with channels in 0-255: {0}")]
    InvalidColor(String),

    #[error("No original image data available")]
    NoImageData,

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot export to '{}': unsupported extension", .0.display())]
    UnsupportedExportFormat(PathBuf),

    #[error("Grid too dense: {columns}x{rows} cells exceeds {max} lines per axis", max = MAX_GRID_LINES)]
    GridTooDense { columns: f64, rows: f64 },

    #[error("Corrupted image data: {0}")]
    CorruptData(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out after {secs:.1}s: {url}")]
    Timeout { url: String, secs: f64 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(String),
}

/// Coarse classification used by front-ends to pick exit codes and dialogs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Load,
    Validation,
    Other,
}

impl ViewerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound(_) => ErrorKind::NotFound,
            Self::UnsupportedFormat(_)
            | Self::CorruptData(_)
            | Self::NetworkError(_)
            | Self::Timeout { .. } => ErrorKind::Load,
            Self::InvalidDimension { .. }
            | Self::OutOfRangeZoom(_)
            | Self::OutOfRangeSubdivision(_)
            | Self::InvalidLineWidth(_)
            | Self::InvalidOpacity(_)
            | Self::InvalidColor(_)
            | Self::NoImageData
            | Self::NotAFile(_)
            | Self::UnsupportedExportFormat(_)
            | Self::GridTooDense { .. }
            | Self::Config(_) => ErrorKind::Validation,
            Self::Io(_) | Self::Encode(_) => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
