mod commands;
mod exit;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portrait_core::config::ViewerConfig;
use tracing_subscriber::EnvFilter;

use exit::CommandFamily;

#[derive(Parser)]
#[command(name = "portrait", about = "Portrait reference image viewer tools")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Viewer config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an image from a file or URL and print its metadata
    Load(commands::load::LoadArgs),
    /// Apply the grayscale filter to an image
    Filter(commands::filter::FilterArgs),
    /// Calculate grid parameters for a viewport
    Grid(commands::grid::GridArgs),
    /// Calculate display size, pan and visible region for a window
    Viewport(commands::viewport::ViewportArgs),
    /// Save an image, optionally grayscale and with the grid drawn on
    Export(commands::export::ExportArgs),
    /// Print or save the default viewer config
    Config(commands::config::ConfigArgs),
}

impl Commands {
    fn family(&self) -> CommandFamily {
        match self {
            Self::Load(_) | Self::Filter(_) | Self::Export(_) => CommandFamily::Loader,
            Self::Grid(_) | Self::Viewport(_) | Self::Config(_) => CommandFamily::Geometry,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ViewerConfig> {
    match path {
        Some(p) => ViewerConfig::load(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(ViewerConfig::default()),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;

    match &cli.command {
        Commands::Load(args) => commands::load::run(args, &config),
        Commands::Filter(args) => commands::filter::run(args, &config),
        Commands::Grid(args) => commands::grid::run(args, &config),
        Commands::Viewport(args) => commands::viewport::run(args),
        Commands::Export(args) => commands::export::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::from(exit::exit_code(cli.command.family(), &err))
        }
    }
}
