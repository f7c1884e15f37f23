pub mod config;
pub mod export;
pub mod filter;
pub mod grid;
pub mod load;
pub mod viewport;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use portrait_core::image_data::LoadedImage;
use portrait_core::io::{is_url, load_source};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Load a file or URL, with a spinner while a download is in flight.
pub fn load_input(source: &str, timeout: Duration) -> Result<LoadedImage> {
    let spinner = is_url(source).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Downloading {source}"));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = load_source(source, timeout).with_context(|| format!("Failed to load {source}"));

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success() {
    println!("{}", Style::new().green().bold().apply_to("SUCCESS"));
}

/// `Label: value` line with a dimmed label.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{} {}", Style::new().dim().apply_to(format!("{label}:")), value);
}
