use crate::app::PortraitApp;

pub fn show(ctx: &egui::Context, app: &PortraitApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 3 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for msg in &app.ui_state.log_messages {
                    ui.label(msg);
                }
            });

        ui.separator();

        // Status line
        ui.horizontal(|ui| {
            if let Some(task) = &app.ui_state.busy {
                ui.spinner();
                ui.label(task);
                ui.separator();
            }
            ui.label(&app.ui_state.cursor_status);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(image) = app.viewer.image() {
                    ui.label(format!("{}x{} {}", image.width(), image.height(), image.format()));
                    ui.separator();
                }
                if let Some(vp) = app.viewer.viewport() {
                    ui.label(format!("Zoom: {:.0}%", vp.zoom_level() * 100.0));
                    ui.separator();
                }
                if app.viewer.filter_state().is_grayscale() {
                    ui.label("B/W");
                }
            });
        });

        ui.add_space(2.0);
    });
}
