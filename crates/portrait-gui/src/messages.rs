use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use portrait_core::grid::GridConfiguration;
use portrait_core::image_data::LoadedImage;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Load from a file path or an http(s) URL.
    Load { source: String },

    /// Save a buffer, with the grid composited at full resolution when given.
    Export {
        path: PathBuf,
        image: Arc<DynamicImage>,
        grid: Option<GridConfiguration>,
    },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// A command was picked up; shown until its outcome arrives.
    Started {
        task: String,
    },
    Loaded {
        image: LoadedImage,
        elapsed: Duration,
    },
    Exported {
        path: PathBuf,
    },
    Error {
        title: &'static str,
        message: String,
    },
}
