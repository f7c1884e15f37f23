use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use portrait_core::config::ViewerConfig;
use portrait_core::error::ViewerError;
use portrait_core::filter::FilterState;
use portrait_core::io::export_image;
use serde::Serialize;
use tracing::info;

use super::{load_input, print_field, print_json, print_success, OutputFormat};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum FilterType {
    #[default]
    Grayscale,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Input image file path or http(s) URL
    pub input: String,

    /// Filter to apply
    #[arg(long, value_enum, default_value_t = FilterType::Grayscale)]
    pub filter_type: FilterType,

    /// Save the filtered image here (format from the extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

#[derive(Serialize)]
struct OriginalInfo {
    width: u32,
    height: u32,
    format: String,
    aspect_ratio: f64,
}

#[derive(Serialize)]
struct FilteredInfo {
    width: u32,
    height: u32,
    mode: String,
}

#[derive(Serialize)]
struct FilterReport {
    status: &'static str,
    filter_type: &'static str,
    original: OriginalInfo,
    filtered: FilteredInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_path: Option<String>,
}

pub fn run(args: &FilterArgs, config: &ViewerConfig) -> Result<()> {
    let image = load_input(&args.input, config.network.timeout())?;

    let mut state = FilterState::new(Some(Arc::clone(image.pixels())), false);
    let filter_name = match args.filter_type {
        FilterType::Grayscale => {
            state.toggle_grayscale()?;
            "grayscale"
        }
    };
    let filtered = state.get_current_image().ok_or(ViewerError::NoImageData)?;

    if let Some(ref path) = args.output {
        export_image(path, &filtered, None)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        info!(path = %path.display(), "Filtered image saved");
    }

    let report = FilterReport {
        status: "success",
        filter_type: filter_name,
        original: OriginalInfo {
            width: image.width(),
            height: image.height(),
            format: image.format().to_string(),
            aspect_ratio: image.aspect_ratio(),
        },
        filtered: FilteredInfo {
            width: filtered.width(),
            height: filtered.height(),
            mode: format!("{:?}", filtered.color()),
        },
        output_path: args.output.as_ref().map(|p| p.display().to_string()),
    };

    match args.output_format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_success();
            print_field("Filter", report.filter_type);
            print_field("Original Width", report.original.width);
            print_field("Original Height", report.original.height);
            print_field("Original Format", &report.original.format);
            print_field("Filtered Width", report.filtered.width);
            print_field("Filtered Height", report.filtered.height);
            print_field("Filtered Mode", &report.filtered.mode);
            if let Some(ref out) = report.output_path {
                print_field("Output", out);
            }
            Ok(())
        }
    }
}
