use portrait_core::consts::{MAX_SUBDIVISIONS, MIN_SUBDIVISIONS};
use portrait_core::grid::GridColor;

use crate::app::PortraitApp;

pub fn show(ctx: &egui::Context, app: &mut PortraitApp) {
    egui::SidePanel::right("grid_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.strong("Grid Configuration");
            ui.separator();

            let mut visible = app.viewer.grid().visible();
            if ui.checkbox(&mut visible, "Show Grid").changed() {
                app.viewer.set_grid_visible(visible);
            }

            size_controls(ui, app);
            color_control(ui, app);

            if let Some(cell) = app.viewer.cell_size() {
                ui.add_space(4.0);
                ui.small(format!("Cell size: {cell:.1} px"));
            }
            if let Some((col, row)) = app.viewer.grid().origin_cell() {
                ui.small(format!("Origin cell: ({}, {})", col + 1, row + 1));
            }
        });
}

fn size_controls(ui: &mut egui::Ui, app: &mut PortraitApp) {
    let count = app.viewer.grid().subdivision_count();
    ui.horizontal(|ui| {
        ui.label("Grid Size:");
        let target = if ui
            .add_enabled(count > MIN_SUBDIVISIONS, egui::Button::new("-"))
            .clicked()
        {
            Some(count - 1)
        } else {
            None
        };
        ui.add_sized([40.0, 18.0], egui::Label::new(count.to_string()));
        let target = if ui
            .add_enabled(count < MAX_SUBDIVISIONS, egui::Button::new("+"))
            .clicked()
        {
            Some(count + 1)
        } else {
            target
        };

        if let Some(target) = target {
            if let Err(e) = app.viewer.set_subdivision_count(target) {
                app.report_error("Cannot change grid size", &e);
            }
        }
    });
}

fn color_control(ui: &mut egui::Ui, app: &mut PortraitApp) {
    let [r, g, b, a] = app.viewer.grid().color().to_rgba();
    let mut color = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
    ui.horizontal(|ui| {
        ui.label("Color:");
        if ui.color_edit_button_srgba(&mut color).changed() {
            let [r, g, b, a] = color.to_srgba_unmultiplied();
            let picked = if a == u8::MAX {
                GridColor::Rgb([r, g, b])
            } else {
                GridColor::Rgba([r, g, b, a])
            };
            app.viewer.set_grid_color(picked);
        }
    });
}
