use std::sync::mpsc;
use std::sync::Arc;

use anyhow::{Context, Result};
use portrait_core::config::ViewerConfig;
use portrait_core::error::ViewerError;
use portrait_core::viewer::{ImageViewer, ViewerEvent};
use tracing::warn;

use crate::convert::to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{ErrorDialog, UiState};
use crate::worker::{self, error_title};

/// GPU texture for one decoded buffer, keyed by the buffer's `Arc` address.
struct ImageTexture {
    key: usize,
    handle: egui::TextureHandle,
}

pub struct PortraitApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    result_rx: mpsc::Receiver<WorkerResult>,
    events: mpsc::Receiver<ViewerEvent>,
    pub viewer: ImageViewer,
    pub ui_state: UiState,
    texture: Option<ImageTexture>,
}

impl PortraitApp {
    pub fn new(ctx: &egui::Context, config: &ViewerConfig) -> Result<Self> {
        let mut viewer = ImageViewer::new(config).context("Invalid viewer config")?;
        let events = viewer.subscribe();

        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx, ctx.clone(), config.network.timeout())
            .context("Failed to spawn worker thread")?;

        Ok(Self {
            cmd_tx,
            result_rx,
            events,
            viewer,
            ui_state: UiState {
                cursor_status: "Ready".into(),
                ..UiState::default()
            },
            texture: None,
        })
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Started { task } => {
                    self.ui_state.busy = Some(task);
                }
                WorkerResult::Loaded { image, elapsed } => {
                    self.ui_state.busy = None;
                    let summary = format!(
                        "Opened: {} ({}x{}, {}) in {}ms",
                        image.source(),
                        image.width(),
                        image.height(),
                        image.format(),
                        elapsed.as_millis()
                    );
                    match self.viewer.set_image(image) {
                        Ok(()) => self.ui_state.add_log(summary),
                        Err(e) => self.report_error("Failed to show image", &e),
                    }
                }
                WorkerResult::Exported { path } => {
                    self.ui_state.busy = None;
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { title, message } => {
                    self.ui_state.busy = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                    self.ui_state.error = Some(ErrorDialog { title, message });
                }
            }
        }
    }

    /// React to core state changes; the panels re-read everything else.
    fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ViewerEvent::ImageChanged => {
                    self.texture = None;
                    self.ui_state.cursor_status = "Ready".into();
                }
                ViewerEvent::FilterChanged => {
                    let mode = if self.viewer.filter_state().is_grayscale() {
                        "on"
                    } else {
                        "off"
                    };
                    self.ui_state.add_log(format!("Black/white mode {mode}"));
                }
                ViewerEvent::GridChanged | ViewerEvent::ViewportChanged => {}
            }
        }
    }

    /// Texture for the buffer currently on screen, uploading it if it changed.
    pub fn current_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        let current = self.viewer.current_image()?;
        let key = Arc::as_ptr(&current) as usize;

        if self.texture.as_ref().map(|t| t.key) != Some(key) {
            let handle = ctx.load_texture(
                "viewport",
                to_color_image(&current),
                egui::TextureOptions::LINEAR,
            );
            self.texture = Some(ImageTexture { key, handle });
        }
        self.texture.as_ref().map(|t| t.handle.id())
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            warn!("Worker thread is gone");
        }
    }

    pub fn load(&self, source: String) {
        self.send_command(WorkerCommand::Load { source });
    }

    pub fn toggle_grayscale(&mut self) {
        if let Err(e) = self.viewer.toggle_grayscale() {
            self.report_error("Cannot toggle black/white mode", &e);
        }
    }

    pub fn reset_zoom(&mut self) {
        if let Err(e) = self.viewer.reset_zoom() {
            self.report_error("Cannot reset zoom", &e);
        }
    }

    pub fn report_error(&mut self, context: &str, err: &ViewerError) {
        let message = format!("{context}:\n{err}");
        self.ui_state.add_log(format!("ERROR: {message}"));
        self.ui_state.error = Some(ErrorDialog {
            title: error_title(err),
            message,
        });
    }
}

impl eframe::App for PortraitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.poll_events();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        if self.ui_state.show_grid_panel {
            panels::grid_panel::show(ctx, self);
        }
        panels::viewport::show(ctx, self);
        panels::url_dialog::show(ctx, self);

        self.poll_events();
        show_error_dialog(ctx, &mut self.ui_state);
    }
}

fn show_error_dialog(ctx: &egui::Context, ui_state: &mut UiState) {
    let Some(dialog) = &ui_state.error else {
        return;
    };
    let mut close = false;
    egui::Window::new(dialog.title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(&dialog.message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                close = true;
            }
        });
    if close {
        ui_state.error = None;
    }
}
