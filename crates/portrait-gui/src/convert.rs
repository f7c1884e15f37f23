use image::imageops::FilterType;
use image::DynamicImage;

/// Largest texture side uploaded to the GPU; bigger buffers are downscaled for display only.
pub const MAX_TEXTURE_SIDE: u32 = 8192;

/// Convert a decoded buffer to an egui ColorImage.
pub fn to_color_image(image: &DynamicImage) -> egui::ColorImage {
    if image.width() > MAX_TEXTURE_SIDE || image.height() > MAX_TEXTURE_SIDE {
        let scaled = image.resize(MAX_TEXTURE_SIDE, MAX_TEXTURE_SIDE, FilterType::Triangle);
        return to_color_image(&scaled);
    }

    let size = [image.width() as usize, image.height() as usize];
    match image {
        DynamicImage::ImageLuma8(gray) => egui::ColorImage::from_gray(size, gray.as_raw()),
        DynamicImage::ImageRgb8(rgb) => egui::ColorImage::from_rgb(size, rgb.as_raw()),
        other => egui::ColorImage::from_rgba_unmultiplied(size, other.to_rgba8().as_raw()),
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    #[test]
    fn test_gray_pixels() {
        let gray = GrayImage::from_pixel(3, 2, Luma([77]));
        let color = to_color_image(&DynamicImage::ImageLuma8(gray));
        assert_eq!(color.size, [3, 2]);
        assert!(color.pixels.iter().all(|p| *p == egui::Color32::from_gray(77)));
    }

    #[test]
    fn test_oversized_is_downscaled() {
        let wide = DynamicImage::new_rgb8(MAX_TEXTURE_SIDE * 2, 4);
        let color = to_color_image(&wide);
        assert_eq!(color.size[0], MAX_TEXTURE_SIDE as usize);
    }
}
