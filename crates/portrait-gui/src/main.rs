mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod surface;
mod worker;

use std::path::PathBuf;

use anyhow::{Context, Result};
use portrait_core::config::ViewerConfig;

/// Config file named by `PORTRAIT_CONFIG`, or the defaults.
fn load_config() -> Result<ViewerConfig> {
    match std::env::var_os("PORTRAIT_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            ViewerConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(ViewerConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width as f32, config.window.height as f32])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Portrait Helper"),
        ..Default::default()
    };

    eframe::run_native(
        "PortraitHelper",
        options,
        Box::new(move |cc| Ok(Box::new(app::PortraitApp::new(&cc.egui_ctx, &config)?))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
