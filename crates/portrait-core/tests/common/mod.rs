use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use portrait_core::config::ViewerConfig;
use portrait_core::image_data::{ImageFormatTag, ImageSource, LoadedImage};
use portrait_core::viewer::ImageViewer;

/// Horizontal red-to-blue gradient, so every column differs.
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, _| {
        let t = (x * 255 / width.max(1)) as u8;
        Rgb([255 - t, 64, t])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn loaded_image(width: u32, height: u32) -> LoadedImage {
    LoadedImage::new(
        gradient_rgb(width, height),
        ImageFormatTag::Png,
        ImageSource::Path(PathBuf::from("memory.png")),
    )
    .unwrap()
}

/// Write a gradient image to `dir/name` in `format`.
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    gradient_rgb(width, height)
        .save_with_format(&path, format)
        .unwrap();
    path
}

/// Encoded PNG bytes of a gradient image.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    gradient_rgb(width, height)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Viewer in an 800x600 window with `width`x`height` loaded.
pub fn viewer_with_image(width: u32, height: u32) -> ImageViewer {
    let mut config = ViewerConfig::default();
    config.window.width = 800;
    config.window.height = 600;
    let mut viewer = ImageViewer::new(&config).unwrap();
    viewer.set_image(loaded_image(width, height)).unwrap();
    viewer
}
