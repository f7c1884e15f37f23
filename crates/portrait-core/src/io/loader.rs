use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use image::{DynamicImage, ImageError, ImageReader};
use tracing::{info, warn};

use crate::error::{Result, ViewerError};
use crate::image_data::{ImageFormatTag, ImageSource, LoadedImage};

const USER_AGENT: &str = concat!("portrait-helper/", env!("CARGO_PKG_VERSION"));

/// True for `http://` and `https://` sources.
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load from a URL or a local path, depending on the prefix.
pub fn load_source(source: &str, timeout: Duration) -> Result<LoadedImage> {
    if is_url(source) {
        load_from_url(source, timeout)
    } else {
        load_from_path(Path::new(source))
    }
}

pub fn load_from_path(path: &Path) -> Result<LoadedImage> {
    if !path.exists() {
        return Err(ViewerError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ViewerError::NotAFile(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let image = decode_bytes(
        &bytes,
        ImageFormatTag::from_path(path),
        ImageSource::Path(absolute),
    )?;

    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        format = %image.format(),
        "Image loaded from file"
    );
    Ok(image)
}

/// Blocking HTTP GET with `timeout` covering the whole request.
pub fn load_from_url(url: &str, timeout: Duration) -> Result<LoadedImage> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| ViewerError::NetworkError(format!("invalid URL '{url}': {e}")))?;

    info!(url, timeout_secs = timeout.as_secs_f64(), "Loading image from URL");

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ViewerError::NetworkError(e.to_string()))?;

    let response = client
        .get(parsed.clone())
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| request_error(url, timeout, e))?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !content_type.starts_with("image/") {
        warn!(url, content_type = %content_type, "URL does not appear to be an image");
    }

    let bytes = response
        .bytes()
        .map_err(|e| request_error(url, timeout, e))?;

    let hint = ImageFormatTag::from_content_type(&content_type)
        .or_else(|| ImageFormatTag::from_path(Path::new(parsed.path())));
    let image = decode_bytes(&bytes, hint, ImageSource::Url(url.to_string()))?;

    info!(
        url,
        width = image.width(),
        height = image.height(),
        format = %image.format(),
        "Image loaded from URL"
    );
    Ok(image)
}

fn request_error(url: &str, timeout: Duration, err: reqwest::Error) -> ViewerError {
    if err.is_timeout() {
        ViewerError::Timeout {
            url: url.to_string(),
            secs: timeout.as_secs_f64(),
        }
    } else {
        ViewerError::NetworkError(err.to_string())
    }
}

/// Decode an encoded image. The content sniff wins; `hint` is used when the
/// bytes carry no recognizable signature.
pub fn decode_bytes(
    bytes: &[u8],
    hint: Option<ImageFormatTag>,
    source: ImageSource,
) -> Result<LoadedImage> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;

    let format = match reader.format() {
        Some(detected) => ImageFormatTag::from_image_format(detected)
            .ok_or_else(|| ViewerError::UnsupportedFormat(format!("{detected:?}")))?,
        None => hint.ok_or_else(|| {
            ViewerError::UnsupportedFormat(format!("unrecognized image data from {source}"))
        })?,
    };
    reader.set_format(format.to_image_format());

    let decoded = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(u) => ViewerError::UnsupportedFormat(u.to_string()),
        other => ViewerError::CorruptData(format!("{source}: {other}")),
    })?;

    LoadedImage::new(normalize(decoded), format, source)
}

/// Keep RGB8 and L8 buffers, convert everything else to RGB8.
fn normalize(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}
