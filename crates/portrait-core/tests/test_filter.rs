#[allow(dead_code)]
mod common;

use std::sync::Arc;

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use portrait_core::error::ViewerError;
use portrait_core::filter::{to_grayscale, FilterState};

fn original() -> Arc<DynamicImage> {
    Arc::new(common::gradient_rgb(16, 8))
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

#[test]
fn test_no_original_errors() {
    let mut state = FilterState::new(None, false);
    assert!(matches!(
        state.toggle_grayscale(),
        Err(ViewerError::NoImageData)
    ));
    assert!(matches!(
        state.set_grayscale(true),
        Err(ViewerError::NoImageData)
    ));
    assert!(state.get_current_image().is_none());
}

#[test]
fn test_initial_grayscale_computes_cache() {
    let state = FilterState::new(Some(original()), true);
    assert!(state.is_grayscale());
    let current = state.get_current_image().unwrap();
    assert!(matches!(*current, DynamicImage::ImageLuma8(_)));
    assert!(Arc::ptr_eq(&current, state.filtered().unwrap()));
}

#[test]
fn test_toggle_twice_returns_original() {
    let orig = original();
    let mut state = FilterState::new(Some(Arc::clone(&orig)), false);
    assert!(Arc::ptr_eq(&state.get_current_image().unwrap(), &orig));

    state.toggle_grayscale().unwrap();
    let gray = state.get_current_image().unwrap();
    assert!(!Arc::ptr_eq(&gray, &orig));

    state.toggle_grayscale().unwrap();
    assert!(!state.is_grayscale());
    assert!(Arc::ptr_eq(&state.get_current_image().unwrap(), &orig));
}

#[test]
fn test_second_enable_reuses_cache() {
    let mut state = FilterState::new(Some(original()), false);
    state.toggle_grayscale().unwrap();
    let first = state.get_current_image().unwrap();
    state.toggle_grayscale().unwrap();
    assert!(state.filtered().is_some());
    state.toggle_grayscale().unwrap();
    let second = state.get_current_image().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_set_grayscale_is_idempotent() {
    let orig = original();
    let mut state = FilterState::new(Some(Arc::clone(&orig)), false);
    state.set_grayscale(false).unwrap();
    assert!(state.filtered().is_none());

    state.set_grayscale(true).unwrap();
    let first = state.get_current_image().unwrap();
    state.set_grayscale(true).unwrap();
    assert!(Arc::ptr_eq(&first, &state.get_current_image().unwrap()));

    state.set_grayscale(false).unwrap();
    assert!(Arc::ptr_eq(&state.get_current_image().unwrap(), &orig));
}

// ---------------------------------------------------------------------------
// to_grayscale
// ---------------------------------------------------------------------------

#[test]
fn test_bt601_weights() {
    let img = RgbImage::from_fn(3, 1, |x, _| match x {
        0 => Rgb([255, 0, 0]),
        1 => Rgb([0, 255, 0]),
        _ => Rgb([10, 20, 30]),
    });
    let gray = to_grayscale(&DynamicImage::ImageRgb8(img));
    let luma = gray.as_luma8().unwrap();
    assert_eq!(luma.get_pixel(0, 0).0, [76]);
    assert_eq!(luma.get_pixel(1, 0).0, [150]);
    // 0.299*10 + 0.587*20 + 0.114*30 = 18.15
    assert_eq!(luma.get_pixel(2, 0).0, [18]);
}

#[test]
fn test_single_channel_input_is_copied() {
    let src = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([77])));
    let out = to_grayscale(&src);
    let (a, b) = (src.as_luma8().unwrap(), out.as_luma8().unwrap());
    assert_eq!(a, b);
    assert_ne!(a.as_raw().as_ptr(), b.as_raw().as_ptr());
}

#[test]
fn test_parallel_path_matches_sequential() {
    // 512x256 is above the parallel threshold; its top-left 64x64 crop is below it.
    let big = common::gradient_rgb(512, 256);
    let small = big.crop_imm(0, 0, 64, 64);

    let big_gray = to_grayscale(&big);
    let small_gray = to_grayscale(&small);
    let big_luma = big_gray.as_luma8().unwrap();
    let small_luma = small_gray.as_luma8().unwrap();

    assert_eq!(big_luma.dimensions(), (512, 256));
    for y in 0..64 {
        for x in 0..64 {
            assert_eq!(big_luma.get_pixel(x, y), small_luma.get_pixel(x, y));
        }
    }
}

#[test]
fn test_alpha_is_dropped() {
    let rgba = DynamicImage::new_rgba8(5, 3);
    let gray = to_grayscale(&rgba);
    assert!(matches!(gray, DynamicImage::ImageLuma8(_)));
    assert_eq!((gray.width(), gray.height()), (5, 3));
}
