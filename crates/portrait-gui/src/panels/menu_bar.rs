use portrait_core::error::ViewerError;
use portrait_core::io::is_url;

use crate::app::PortraitApp;
use crate::messages::WorkerCommand;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

pub fn show(ctx: &egui::Context, app: &mut PortraitApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let grid_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::G);
    let gray_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::B);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app);
                }

                if ui.button("Open URL...").clicked() {
                    ui.close();
                    app.ui_state.url_input = Some(String::new());
                }

                ui.separator();

                let has_image = app.viewer.has_image();
                if ui.add_enabled(has_image, egui::Button::new("Export...")).clicked() {
                    ui.close();
                    export_file(app, false);
                }

                let grid_shown = has_image && app.viewer.grid().visible();
                if ui.add_enabled(grid_shown, egui::Button::new("Export with Grid...")).clicked() {
                    ui.close();
                    export_file(app, true);
                }

                ui.separator();

                if ui.add(egui::Button::new("Quit").shortcut_text("Esc")).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut app.ui_state.show_grid_panel, "Grid Panel");

                ui.separator();

                if ui.add(egui::Button::new("Toggle Grid").shortcut_text(ctx.format_shortcut(&grid_shortcut))).clicked() {
                    ui.close();
                    app.viewer.toggle_grid();
                }
                if ui.add(egui::Button::new("Reset Zoom").shortcut_text("0")).clicked() {
                    ui.close();
                    app.reset_zoom();
                }
                if ui.add(egui::Button::new("Toggle Black/White").shortcut_text(ctx.format_shortcut(&gray_shortcut))).clicked() {
                    ui.close();
                    app.toggle_grayscale();
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&grid_shortcut)) {
            app.viewer.toggle_grid();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&gray_shortcut)) {
            app.toggle_grayscale();
        }

        // Plain keys would clash with typing into the URL dialog.
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Num0)) {
            app.reset_zoom();
        }
        if ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::NONE, egui::Key::Plus)
                | i.consume_key(egui::Modifiers::NONE, egui::Key::Equals)
        }) {
            app.viewer.more_subdivisions();
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Minus)) {
            app.viewer.fewer_subdivisions();
        }
        if let Some(url) = pasted_url(ctx) {
            app.load(url);
        }
    });
}

/// An http(s) URL pasted while no text field has focus.
fn pasted_url(ctx: &egui::Context) -> Option<String> {
    ctx.input(|i| {
        i.events.iter().find_map(|event| match event {
            egui::Event::Paste(text) if is_url(text.trim()) => Some(text.trim().to_string()),
            _ => None,
        })
    })
}

fn open_file(app: &PortraitApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image files", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let source = path.display().to_string();
            let _ = cmd_tx.send(WorkerCommand::Load { source });
        }
    });
}

/// Snapshot the current buffer and grid, then ask for a destination.
fn export_file(app: &mut PortraitApp, with_grid: bool) {
    let Some(image) = app.viewer.current_image() else {
        app.report_error("Nothing to export", &ViewerError::NoImageData);
        return;
    };
    let grid = with_grid.then(|| app.viewer.grid().clone());
    let file_name = if with_grid {
        "portrait_grid.png"
    } else {
        "portrait.png"
    };

    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("BMP", &["bmp"])
            .add_filter("WebP", &["webp"])
            .add_filter("GIF", &["gif"])
            .set_file_name(file_name)
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::Export { path, image, grid });
        }
    });
}
