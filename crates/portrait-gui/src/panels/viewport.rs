use portrait_core::geometry::Point;
use tracing::warn;

use crate::app::PortraitApp;
use crate::surface::PainterSurface;

pub fn show(ctx: &egui::Context, app: &mut PortraitApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            paint_background(ui, rect);

            let width = rect.width().round().max(1.0) as u32;
            let height = rect.height().round().max(1.0) as u32;
            if let Err(e) = app.viewer.resize(width, height) {
                warn!(error = %e, "Viewport resize rejected");
            }

            if !app.viewer.has_image() {
                show_placeholder(ui);
                return;
            }

            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
            let to_core = |p: egui::Pos2| {
                Point::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64)
            };

            handle_zoom(ui, &response, app, to_core);
            handle_pan(&response, app, to_core);
            update_cursor_status(&response, app, to_core);

            if response.secondary_clicked() {
                app.ui_state.context_point = response.interact_pointer_pos().map(to_core);
            }
            response.context_menu(|ui| context_menu(ui, app));

            let texture = app.current_texture(ctx);
            let painter = ui.painter_at(rect);
            let mut surface = PainterSurface::new(&painter, rect.min.to_vec2(), texture);
            app.viewer.paint(&mut surface);
        });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn handle_zoom(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut PortraitApp,
    to_core: impl Fn(egui::Pos2) -> Point,
) {
    let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) else {
        return;
    };

    if let Err(e) = app.viewer.scroll(scroll_delta as f64, to_core(mouse_pos)) {
        app.report_error("Zoom rejected", &e);
    }
}

fn handle_pan(
    response: &egui::Response,
    app: &mut PortraitApp,
    to_core: impl Fn(egui::Pos2) -> Point,
) {
    let pointer = response.interact_pointer_pos().map(&to_core);

    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(p) = pointer {
            app.viewer.begin_pan(p);
        }
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(p) = pointer {
            app.viewer.drag_to(p);
        }
    }
    if response.drag_stopped() {
        app.viewer.end_pan();
    }
}

fn update_cursor_status(
    response: &egui::Response,
    app: &mut PortraitApp,
    to_core: impl Fn(egui::Pos2) -> Point,
) {
    app.ui_state.cursor_status = match response.hover_pos() {
        Some(pos) => app.viewer.cursor_status(to_core(pos)),
        None => "Ready".into(),
    };
}

fn context_menu(ui: &mut egui::Ui, app: &mut PortraitApp) {
    if ui.add(egui::Button::new("Reset Zoom").shortcut_text("0")).clicked() {
        ui.close();
        app.reset_zoom();
    }
    if ui.button("Toggle Grid").clicked() {
        ui.close();
        app.viewer.toggle_grid();
    }
    let can_set_origin = app.viewer.can_set_origin() && app.ui_state.context_point.is_some();
    if ui
        .add_enabled(can_set_origin, egui::Button::new("Set as (1, 1)"))
        .clicked()
    {
        ui.close();
        set_origin(app);
    }
    ui.separator();
    if ui.button("Toggle Black/White Mode").clicked() {
        ui.close();
        app.toggle_grayscale();
    }
}

fn set_origin(app: &mut PortraitApp) {
    let Some(point) = app.ui_state.context_point else {
        return;
    };
    match app.viewer.set_origin_at(point) {
        Ok(true) => {
            if let Some((col, row)) = app.viewer.grid().origin_cell() {
                app.ui_state
                    .add_log(format!("Cell ({}, {}) is now (1, 1)", col + 1, row + 1));
            }
        }
        Ok(false) => app
            .ui_state
            .add_log("Origin not set: point is outside the image".into()),
        Err(e) => app.report_error("Cannot set origin", &e),
    }
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image (Ctrl+O) or paste a URL to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
