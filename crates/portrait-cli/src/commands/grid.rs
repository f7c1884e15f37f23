use anyhow::Result;
use clap::Args;
use portrait_core::config::ViewerConfig;
use portrait_core::error::ViewerError;
use portrait_core::grid::{GridColor, GridConfiguration, GridOverlay};
use serde::Serialize;

use super::{print_field, print_json, print_success, OutputFormat};

#[derive(Args)]
pub struct GridArgs {
    /// Number of grid subdivisions along the shorter side (2-50)
    #[arg(long, default_value = "3", allow_negative_numbers = true)]
    pub subdivision_count: i64,

    /// Viewport width in pixels
    #[arg(long)]
    pub viewport_width: f64,

    /// Viewport height in pixels
    #[arg(long)]
    pub viewport_height: f64,

    /// Line color as r,g,b or r,g,b,a
    #[arg(long, default_value = "255,255,255")]
    pub color: String,

    /// Line width in pixels (defaults to the config value)
    #[arg(long)]
    pub line_width: Option<f32>,

    /// Line opacity 0.0-1.0 (defaults to the config value)
    #[arg(long)]
    pub opacity: Option<f32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

#[derive(Serialize)]
struct ViewportSize {
    width: f64,
    height: f64,
}

#[derive(Serialize)]
struct GridReport {
    status: &'static str,
    subdivision_count: u32,
    cell_size: f64,
    viewport: ViewportSize,
    color: GridColor,
    line_width: f32,
    opacity: f32,
    vertical_lines: usize,
    horizontal_lines: usize,
}

fn positive(axis: &'static str, value: f64) -> Result<f64, ViewerError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ViewerError::InvalidDimension {
            axis,
            value: value as i64,
        })
    }
}

pub fn run(args: &GridArgs, config: &ViewerConfig) -> Result<()> {
    let count = u32::try_from(args.subdivision_count)
        .map_err(|_| ViewerError::OutOfRangeSubdivision(args.subdivision_count))?;
    let width = positive("viewport width", args.viewport_width)?;
    let height = positive("viewport height", args.viewport_height)?;
    let color: GridColor = args.color.parse()?;

    let mut grid = GridConfiguration::new(
        true,
        count,
        color,
        args.line_width.unwrap_or(config.grid.line_width),
        args.opacity.unwrap_or(config.grid.opacity),
    )?;
    grid.calculate_cell_size(width, height);
    let lines = GridOverlay::new(&grid).try_grid_lines(0.0, 0.0, width, height)?;

    let report = GridReport {
        status: "success",
        subdivision_count: grid.subdivision_count(),
        cell_size: grid.cell_size(),
        viewport: ViewportSize { width, height },
        color: grid.color(),
        line_width: grid.line_width(),
        opacity: grid.opacity(),
        vertical_lines: lines.vertical.len(),
        horizontal_lines: lines.horizontal.len(),
    };

    match args.output_format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_success();
            print_field("Subdivision Count", report.subdivision_count);
            print_field("Cell Size", format!("{:.2} pixels", report.cell_size));
            print_field("Viewport", format!("{width:.0}x{height:.0}"));
            print_field("Color", report.color);
            print_field("Line Width", report.line_width);
            print_field("Opacity", report.opacity);
            print_field(
                "Lines",
                format!(
                    "{} vertical, {} horizontal",
                    report.vertical_lines, report.horizontal_lines
                ),
            );
            Ok(())
        }
    }
}
