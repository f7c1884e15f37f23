use std::path::Path;

use image::{DynamicImage, ImageError};
use tracing::info;

use crate::error::{Result, ViewerError};
use crate::grid::{GridConfiguration, GridOverlay};
use crate::image_data::ImageFormatTag;
use crate::render::RasterSurface;

/// Label glyph size scales with the image so it stays readable on large exports.
fn label_scale(width: u32, height: u32) -> u32 {
    (width.min(height) / 300).max(2)
}

/// Draw `grid` over `image` at full image resolution.
///
/// Cell size is derived from the image's own dimensions, not from any
/// on-screen display size.
pub fn composite(image: &DynamicImage, grid: &GridConfiguration) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    let mut surface = RasterSurface::new(image.to_rgba8()).with_text_scale(label_scale(w, h));
    GridOverlay::new(grid).render(&mut surface, 0.0, 0.0, w as f64, h as f64);

    let rgba = DynamicImage::ImageRgba8(surface.into_image());
    if image.color().has_alpha() {
        rgba
    } else {
        DynamicImage::ImageRgb8(rgba.to_rgb8())
    }
}

/// Save `image`, with `grid` composited over it when given and visible.
///
/// The encoder is chosen from the file extension.
pub fn export_image(
    path: &Path,
    image: &DynamicImage,
    grid: Option<&GridConfiguration>,
) -> Result<()> {
    let format = ImageFormatTag::from_path(path)
        .ok_or_else(|| ViewerError::UnsupportedExportFormat(path.to_path_buf()))?;

    let with_grid = grid.filter(|g| g.visible());
    let output = match with_grid {
        Some(g) => composite(image, g),
        None => image.clone(),
    };

    output
        .save_with_format(path, format.to_image_format())
        .map_err(|e| match e {
            ImageError::IoError(io) => ViewerError::Io(io),
            other => ViewerError::Encode(other.to_string()),
        })?;

    info!(
        path = %path.display(),
        %format,
        grid = with_grid.is_some(),
        width = output.width(),
        height = output.height(),
        "Image exported"
    );
    Ok(())
}
