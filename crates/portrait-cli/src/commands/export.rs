use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use portrait_core::config::ViewerConfig;
use portrait_core::error::ViewerError;
use portrait_core::filter::FilterState;
use portrait_core::grid::{GridColor, GridConfiguration};
use portrait_core::io::export_image;
use serde::Serialize;

use super::{load_input, print_field, print_json, print_success, OutputFormat};

#[derive(Args)]
pub struct ExportArgs {
    /// Input image file path or http(s) URL
    pub input: String,

    /// Output file (format from the extension)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Convert to grayscale before saving
    #[arg(long)]
    pub grayscale: bool,

    /// Draw the grid onto the exported image
    #[arg(long)]
    pub grid: bool,

    /// Grid subdivisions (defaults to the config value)
    #[arg(long, allow_negative_numbers = true)]
    pub subdivision_count: Option<i64>,

    /// Grid line color as r,g,b or r,g,b,a (defaults to the config value)
    #[arg(long)]
    pub color: Option<String>,

    /// Zero-based origin cell as col,row; labelled (1, 1) in the output
    #[arg(long, value_parser = parse_cell)]
    pub origin: Option<(u32, u32)>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

fn parse_cell(s: &str) -> Result<(u32, u32), String> {
    let (col, row) = s
        .split_once(',')
        .ok_or_else(|| format!("expected col,row, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid cell index '{v}': {e}"))
    };
    Ok((parse(col)?, parse(row)?))
}

#[derive(Serialize)]
struct ExportReport {
    status: &'static str,
    output_path: String,
    width: u32,
    height: u32,
    grayscale: bool,
    grid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    subdivision_count: Option<u32>,
}

fn grid_for(args: &ExportArgs, config: &ViewerConfig) -> Result<GridConfiguration> {
    let mut grid = GridConfiguration::from_settings(&config.grid)?;
    grid.set_visible(true);
    if let Some(count) = args.subdivision_count {
        let count =
            u32::try_from(count).map_err(|_| ViewerError::OutOfRangeSubdivision(count))?;
        grid.set_subdivision_count(count)?;
    }
    if let Some(ref color) = args.color {
        grid.set_color(color.parse::<GridColor>()?);
    }
    grid.set_origin_cell(args.origin);
    Ok(grid)
}

pub fn run(args: &ExportArgs, config: &ViewerConfig) -> Result<()> {
    // Grid arguments are checked before any loading happens.
    let grid = args.grid.then(|| grid_for(args, config)).transpose()?;

    let image = load_input(&args.input, config.network.timeout())?;
    let mut state = FilterState::new(Some(Arc::clone(image.pixels())), false);
    if args.grayscale {
        state.set_grayscale(true)?;
    }
    let current = state.get_current_image().ok_or(ViewerError::NoImageData)?;

    export_image(&args.output, &current, grid.as_ref())
        .with_context(|| format!("Failed to export {}", args.output.display()))?;

    let report = ExportReport {
        status: "success",
        output_path: args.output.display().to_string(),
        width: current.width(),
        height: current.height(),
        grayscale: state.is_grayscale(),
        grid: grid.is_some(),
        subdivision_count: grid.as_ref().map(GridConfiguration::subdivision_count),
    };

    match args.output_format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_success();
            print_field("Output", &report.output_path);
            print_field("Size", format!("{}x{}", report.width, report.height));
            print_field("Grayscale", report.grayscale);
            match report.subdivision_count {
                Some(count) => print_field("Grid", format!("{count} subdivisions")),
                None => print_field("Grid", "none"),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("2,3"), Ok((2, 3)));
        assert_eq!(parse_cell(" 0 , 7 "), Ok((0, 7)));
        assert!(parse_cell("2").is_err());
        assert!(parse_cell("-1,0").is_err());
    }
}
