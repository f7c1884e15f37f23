use std::sync::Arc;

use image::{DynamicImage, GrayImage};
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{Result, ViewerError};

/// Original buffer plus a lazily computed grayscale copy.
///
/// The grayscale buffer is computed at most once per original and survives
/// any number of toggles.
#[derive(Clone, Debug, Default)]
pub struct FilterState {
    original: Option<Arc<DynamicImage>>,
    grayscale: bool,
    filtered: Option<Arc<DynamicImage>>,
}

impl FilterState {
    pub fn new(original: Option<Arc<DynamicImage>>, grayscale: bool) -> Self {
        let mut state = Self {
            original,
            grayscale: false,
            filtered: None,
        };
        if grayscale && state.original.is_some() {
            state.enable();
        }
        state
    }

    pub fn is_grayscale(&self) -> bool {
        self.grayscale
    }

    pub fn has_original(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Option<&Arc<DynamicImage>> {
        self.original.as_ref()
    }

    /// Cached grayscale buffer, if one was ever computed.
    pub fn filtered(&self) -> Option<&Arc<DynamicImage>> {
        self.filtered.as_ref()
    }

    pub fn toggle_grayscale(&mut self) -> Result<()> {
        let enabled = !self.grayscale;
        self.apply(enabled)
    }

    pub fn set_grayscale(&mut self, enabled: bool) -> Result<()> {
        if self.original.is_none() {
            return Err(ViewerError::NoImageData);
        }
        if self.grayscale == enabled {
            return Ok(());
        }
        self.apply(enabled)
    }

    fn apply(&mut self, enabled: bool) -> Result<()> {
        if self.original.is_none() {
            return Err(ViewerError::NoImageData);
        }
        if enabled {
            self.enable();
        } else {
            self.grayscale = false;
            debug!("Grayscale disabled");
        }
        Ok(())
    }

    fn enable(&mut self) {
        if self.filtered.is_none() {
            if let Some(original) = &self.original {
                self.filtered = Some(Arc::new(to_grayscale(original)));
                debug!("Grayscale cache computed");
            }
        }
        self.grayscale = true;
        debug!("Grayscale enabled");
    }

    /// The buffer to display: filtered when grayscale is on, else the original.
    pub fn get_current_image(&self) -> Option<Arc<DynamicImage>> {
        if self.grayscale {
            if let Some(filtered) = &self.filtered {
                return Some(Arc::clone(filtered));
            }
        }
        self.original.clone()
    }
}

/// BT.601 luminance conversion to an 8-bit single-channel image.
///
/// Single-channel 8-bit input is copied unchanged.
pub fn to_grayscale(image: &DynamicImage) -> DynamicImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return DynamicImage::ImageLuma8(gray.clone());
    }

    let rgb = image.to_rgb8();
    let (w, h) = rgb.dimensions();
    let (wu, hu) = (w as usize, h as usize);
    let mut out = vec![0u8; wu * hu];

    if wu > 0 && hu > 0 {
        let src = rgb.as_raw();
        if wu * hu >= PARALLEL_PIXEL_THRESHOLD {
            out.par_chunks_mut(wu)
                .zip(src.par_chunks(wu * 3))
                .for_each(|(dst, row)| convert_row(row, dst));
        } else {
            out.chunks_mut(wu)
                .zip(src.chunks(wu * 3))
                .for_each(|(dst, row)| convert_row(row, dst));
        }
    }

    // Buffer length matches w * h by construction.
    let gray = GrayImage::from_raw(w, h, out).unwrap_or_else(|| GrayImage::new(w, h));
    DynamicImage::ImageLuma8(gray)
}

fn convert_row(rgb: &[u8], dst: &mut [u8]) {
    for (px, out) in rgb.chunks_exact(3).zip(dst.iter_mut()) {
        *out = luminance(px[0], px[1], px[2]);
    }
}

fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}
