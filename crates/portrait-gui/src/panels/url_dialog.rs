use portrait_core::io::is_url;

use crate::app::PortraitApp;

pub fn show(ctx: &egui::Context, app: &mut PortraitApp) {
    let Some(input) = app.ui_state.url_input.as_mut() else {
        return;
    };

    let mut submit = false;
    let mut cancel = false;
    egui::Window::new("Open Image from URL")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Enter image URL:");
            let edit = ui.add(
                egui::TextEdit::singleline(input)
                    .hint_text("https://")
                    .desired_width(360.0),
            );
            edit.request_focus();
            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                cancel = true;
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let valid = is_url(input.trim());
                if ui.add_enabled(valid, egui::Button::new("Open")).clicked() {
                    submit = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if submit && is_url(input.trim()) {
        let url = input.trim().to_string();
        app.ui_state.url_input = None;
        app.load(url);
    } else if cancel {
        app.ui_state.url_input = None;
    }
}
