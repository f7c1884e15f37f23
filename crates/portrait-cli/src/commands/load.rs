use anyhow::Result;
use clap::Args;
use portrait_core::config::ViewerConfig;
use portrait_core::image_data::{ImageMetadata, ImageSource};
use serde::Serialize;

use super::{load_input, print_field, print_json, print_success, OutputFormat};

#[derive(Args)]
pub struct LoadArgs {
    /// Image file path or http(s) URL
    pub source: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

#[derive(Serialize)]
struct LoadReport {
    status: &'static str,
    #[serde(flatten)]
    metadata: ImageMetadata,
}

pub fn run(args: &LoadArgs, config: &ViewerConfig) -> Result<()> {
    let image = load_input(&args.source, config.network.timeout())?;

    match args.output_format {
        OutputFormat::Json => print_json(&LoadReport {
            status: "success",
            metadata: image.metadata(),
        }),
        OutputFormat::Text => {
            print_success();
            print_field("Width", image.width());
            print_field("Height", image.height());
            print_field("Format", image.format());
            print_field("Aspect Ratio", format!("{:.4}", image.aspect_ratio()));
            match image.source() {
                ImageSource::Path(p) => print_field("Path", p.display()),
                ImageSource::Url(u) => print_field("URL", u),
            }
            Ok(())
        }
    }
}
