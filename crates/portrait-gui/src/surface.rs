use image::DynamicImage;
use portrait_core::geometry::{DisplayRect, Point};
use portrait_core::render::{RenderSurface, Stroke};

const LABEL_FONT_SIZE: f32 = 13.0;

/// Paints core drawing calls with an egui painter.
///
/// Core coordinates are relative to the viewport panel; `offset` is the
/// panel's top-left corner on screen. Images are drawn from the texture
/// already uploaded for the current buffer.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    offset: egui::Vec2,
    texture: Option<egui::TextureId>,
}

impl<'a> PainterSurface<'a> {
    pub fn new(
        painter: &'a egui::Painter,
        offset: egui::Vec2,
        texture: Option<egui::TextureId>,
    ) -> Self {
        Self {
            painter,
            offset,
            texture,
        }
    }

    fn pos(&self, p: Point) -> egui::Pos2 {
        egui::pos2(p.x as f32, p.y as f32) + self.offset
    }
}

fn color32([r, g, b, a]: [u8; 4]) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl RenderSurface for PainterSurface<'_> {
    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.painter.line_segment(
            [self.pos(from), self.pos(to)],
            egui::Stroke::new(stroke.width, color32(stroke.color)),
        );
    }

    fn draw_text(&mut self, anchor: Point, text: &str, color: [u8; 4]) {
        self.painter.text(
            self.pos(anchor),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::monospace(LABEL_FONT_SIZE),
            color32(color),
        );
    }

    fn draw_image(&mut self, _image: &DynamicImage, rect: DisplayRect) {
        let Some(texture) = self.texture else {
            return;
        };
        let screen = egui::Rect::from_min_size(
            self.pos(rect.min()),
            egui::vec2(rect.width as f32, rect.height as f32),
        );
        self.painter.image(
            texture,
            screen,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}
