use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ViewerError};

/// The raster formats the viewer accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ImageFormatTag {
    Jpeg,
    Png,
    Gif,
    Bmp,
    WebP,
}

impl ImageFormatTag {
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn to_image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Gif => ImageFormat::Gif,
            Self::Bmp => ImageFormat::Bmp,
            Self::WebP => ImageFormat::WebP,
        }
    }

    /// Case-insensitive file extension lookup, with or without the dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Guess from an HTTP `Content-Type` value such as `image/png; charset=...`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let ct = content_type.to_ascii_lowercase();
        if ct.contains("jpeg") || ct.contains("jpg") {
            Some(Self::Jpeg)
        } else if ct.contains("png") {
            Some(Self::Png)
        } else if ct.contains("gif") {
            Some(Self::Gif)
        } else if ct.contains("bmp") {
            Some(Self::Bmp)
        } else if ct.contains("webp") {
            Some(Self::WebP)
        } else {
            None
        }
    }
}

impl fmt::Display for ImageFormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
            Self::WebP => "WebP",
        };
        f.write_str(name)
    }
}

/// Where an image came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// A decoded image with its metadata. Dimensions never change after load.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    width: u32,
    height: u32,
    aspect_ratio: f64,
    format: ImageFormatTag,
    source: ImageSource,
    pixels: Arc<DynamicImage>,
}

impl LoadedImage {
    pub fn new(pixels: DynamicImage, format: ImageFormatTag, source: ImageSource) -> Result<Self> {
        let (width, height) = (pixels.width(), pixels.height());
        if width == 0 {
            return Err(ViewerError::InvalidDimension {
                axis: "image width",
                value: 0,
            });
        }
        if height == 0 {
            return Err(ViewerError::InvalidDimension {
                axis: "image height",
                value: 0,
            });
        }

        debug!(width, height, %format, %source, "Image created");
        Ok(Self {
            width,
            height,
            aspect_ratio: width as f64 / height as f64,
            format,
            source,
            pixels: Arc::new(pixels),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn format(&self) -> ImageFormatTag {
        self.format
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn pixels(&self) -> &Arc<DynamicImage> {
        &self.pixels
    }

    pub fn metadata(&self) -> ImageMetadata {
        let (source_path, source_url) = match &self.source {
            ImageSource::Path(p) => (Some(p.display().to_string()), None),
            ImageSource::Url(u) => (None, Some(u.clone())),
        };
        ImageMetadata {
            width: self.width,
            height: self.height,
            aspect_ratio: self.aspect_ratio,
            format: self.format.to_string(),
            source: self.source.to_string(),
            source_path,
            source_url,
        }
    }
}

/// Serializable summary of a [`LoadedImage`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    pub format: String,
    pub source: String,
    pub source_path: Option<String>,
    pub source_url: Option<String>,
}
