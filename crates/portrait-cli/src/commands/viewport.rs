use anyhow::Result;
use clap::Args;
use portrait_core::geometry::{DisplayRect, Point};
use portrait_core::viewport::{checked_dimension, Viewport};
use serde::Serialize;

use super::{print_field, print_json, print_success, OutputFormat};

#[derive(Args)]
pub struct ViewportArgs {
    /// Image width in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub image_width: i64,

    /// Image height in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub image_height: i64,

    /// Window width in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub window_width: i64,

    /// Window height in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub window_height: i64,

    /// Zoom level (0.1-10.0)
    #[arg(long, default_value = "1.0")]
    pub zoom: f64,

    /// Horizontal pan offset applied after zooming
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub pan_x: f64,

    /// Vertical pan offset applied after zooming
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub pan_y: f64,

    /// Zoom anchor x in window coordinates, relative to the window center
    #[arg(long, requires = "center_y", allow_negative_numbers = true)]
    pub center_x: Option<f64>,

    /// Zoom anchor y in window coordinates, relative to the window center
    #[arg(long, requires = "center_x", allow_negative_numbers = true)]
    pub center_y: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

#[derive(Serialize)]
struct PanOffset {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct ViewportReport {
    status: &'static str,
    zoom_level: f64,
    pan_offset: PanOffset,
    display_width: f64,
    display_height: f64,
    window_width: u32,
    window_height: u32,
    visible_region: DisplayRect,
}

pub fn run(args: &ViewportArgs) -> Result<()> {
    let mut viewport = Viewport::new(
        checked_dimension("image width", args.image_width)?,
        checked_dimension("image height", args.image_height)?,
        checked_dimension("window width", args.window_width)?,
        checked_dimension("window height", args.window_height)?,
    )?;

    let center = args
        .center_x
        .zip(args.center_y)
        .map(|(x, y)| Point::new(x, y));
    if args.zoom != viewport.zoom_level() || center.is_some() {
        viewport.set_zoom(args.zoom, center)?;
    }
    if args.pan_x != 0.0 || args.pan_y != 0.0 {
        viewport.pan(args.pan_x, args.pan_y);
    }

    let (pan_x, pan_y) = viewport.pan_offset();
    let (display_width, display_height) = viewport.get_display_size();
    let (window_width, window_height) = viewport.window_size();
    let report = ViewportReport {
        status: "success",
        zoom_level: viewport.zoom_level(),
        pan_offset: PanOffset { x: pan_x, y: pan_y },
        display_width,
        display_height,
        window_width,
        window_height,
        visible_region: viewport.get_visible_region(),
    };

    match args.output_format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            let region = report.visible_region;
            print_success();
            print_field("Zoom Level", report.zoom_level);
            print_field("Pan Offset", format!("({pan_x:.2}, {pan_y:.2})"));
            print_field(
                "Display Size",
                format!("{display_width:.2}x{display_height:.2}"),
            );
            print_field("Window Size", format!("{window_width}x{window_height}"));
            print_field(
                "Visible Region",
                format!(
                    "x={:.2}, y={:.2}, width={:.2}, height={:.2}",
                    region.x, region.y, region.width, region.height
                ),
            );
            Ok(())
        }
    }
}
