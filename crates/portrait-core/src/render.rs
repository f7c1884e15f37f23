use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, Blend};
use imageproc::rect::Rect;

use crate::geometry::{DisplayRect, Point};

/// Line style handed to a [`RenderSurface`]. `color` already carries the opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: [u8; 4],
}

/// Drawing primitives the core needs from a render target.
pub trait RenderSurface {
    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Draw `text` with its top-left corner at `anchor`.
    fn draw_text(&mut self, anchor: Point, text: &str, color: [u8; 4]);

    /// Blit `image` scaled into `rect`.
    fn draw_image(&mut self, image: &DynamicImage, rect: DisplayRect);
}

/// 3x5 bitmap glyphs for the characters an origin label can contain.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        _ => return None,
    };
    Some(rows)
}

/// CPU raster target backed by an RGBA buffer, drawn with alpha blending.
///
/// Used to composite the grid onto an image at full resolution.
pub struct RasterSurface {
    canvas: Blend<RgbaImage>,
    text_scale: u32,
}

impl RasterSurface {
    pub fn new(base: RgbaImage) -> Self {
        Self {
            canvas: Blend(base),
            text_scale: 2,
        }
    }

    /// Pixel size of one glyph cell in the label font.
    pub fn with_text_scale(mut self, scale: u32) -> Self {
        self.text_scale = scale.max(1);
        self
    }

    pub fn width(&self) -> u32 {
        self.canvas.0.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.0.height()
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas.0
    }

    fn fill(&mut self, x: f64, y: f64, w: f64, h: f64, color: [u8; 4]) {
        // Clip to the canvas so huge or negative rects never reach imageproc.
        let max_x = self.width() as f64;
        let max_y = self.height() as f64;
        let x0 = x.floor().clamp(0.0, max_x);
        let y0 = y.floor().clamp(0.0, max_y);
        let x1 = (x + w).ceil().clamp(0.0, max_x);
        let y1 = (y + h).ceil().clamp(0.0, max_y);
        if !(x1 > x0 && y1 > y0) {
            return;
        }
        let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(&mut self.canvas, rect, Rgba(color));
    }
}

/// First pixel row or column covered by a line of half-thickness `half` centered on `c`.
fn line_start(c: f64, half: f64) -> f64 {
    (c - half + 0.5).floor()
}

impl RenderSurface for RasterSurface {
    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        let thickness = (stroke.width as f64).round().max(1.0);
        let half = thickness / 2.0;
        if from.x == to.x {
            let (top, bottom) = (from.y.min(to.y), from.y.max(to.y));
            self.fill(line_start(from.x, half), top, thickness, bottom - top, stroke.color);
        } else if from.y == to.y {
            let (left, right) = (from.x.min(to.x), from.x.max(to.x));
            self.fill(left, line_start(from.y, half), right - left, thickness, stroke.color);
        } else {
            let steps = (to.x - from.x).abs().max((to.y - from.y).abs()).ceil().max(1.0);
            for i in 0..=steps as u32 {
                let t = i as f64 / steps;
                let x = from.x + (to.x - from.x) * t;
                let y = from.y + (to.y - from.y) * t;
                self.fill(
                    line_start(x, half),
                    line_start(y, half),
                    thickness,
                    thickness,
                    stroke.color,
                );
            }
        }
    }

    fn draw_text(&mut self, anchor: Point, text: &str, color: [u8; 4]) {
        let scale = self.text_scale as f64;
        let mut pen_x = anchor.x;
        for c in text.chars() {
            if let Some(rows) = glyph(c) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..3 {
                        if bits & (0b100 >> col) != 0 {
                            self.fill(
                                pen_x + col as f64 * scale,
                                anchor.y + row as f64 * scale,
                                scale,
                                scale,
                                color,
                            );
                        }
                    }
                }
            }
            pen_x += 4.0 * scale;
        }
    }

    fn draw_image(&mut self, image: &DynamicImage, rect: DisplayRect) {
        if !rect.is_drawable() {
            return;
        }
        let scaled = image
            .resize_exact(
                rect.width.round().max(1.0) as u32,
                rect.height.round().max(1.0) as u32,
                image::imageops::FilterType::Triangle,
            )
            .to_rgba8();
        image::imageops::overlay(
            &mut self.canvas.0,
            &scaled,
            rect.x.round() as i64,
            rect.y.round() as i64,
        );
    }
}
