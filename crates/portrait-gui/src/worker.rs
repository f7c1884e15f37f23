use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use image::DynamicImage;
use portrait_core::error::{ErrorKind, ViewerError};
use portrait_core::grid::GridConfiguration;
use portrait_core::io::{export_image, load_source};
use tracing::{error, info};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    timeout: Duration,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("portrait-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, timeout);
        })?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

/// Dialog title for a failed load or export.
pub fn error_title(err: &ViewerError) -> &'static str {
    match err.kind() {
        ErrorKind::NotFound => "File Not Found",
        ErrorKind::Load => match err {
            ViewerError::NetworkError(_) | ViewerError::Timeout { .. } => "Network Error",
            _ => "Image Load Error",
        },
        ErrorKind::Validation => "Invalid Input",
        ErrorKind::Other => "Error",
    }
}

fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    context: String,
    err: &ViewerError,
) {
    error!(error = %err, "{context}");
    send(
        tx,
        ctx,
        WorkerResult::Error {
            title: error_title(err),
            message: format!("{context}:\n{err}"),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    timeout: Duration,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Load { source } => {
                let task = format!("Loading {source}");
                send(&tx, &ctx, WorkerResult::Started { task });
                handle_load(&source, timeout, &tx, &ctx);
            }
            WorkerCommand::Export { path, image, grid } => {
                let task = format!("Exporting {}", path.display());
                send(&tx, &ctx, WorkerResult::Started { task });
                handle_export(&path, &image, grid.as_ref(), &tx, &ctx);
            }
        }
    }
}

fn handle_load(
    source: &str,
    timeout: Duration,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    match load_source(source, timeout) {
        Ok(image) => send(
            tx,
            ctx,
            WorkerResult::Loaded {
                image,
                elapsed: start.elapsed(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to load {source}"), &e),
    }
}

fn handle_export(
    path: &Path,
    image: &Arc<DynamicImage>,
    grid: Option<&GridConfiguration>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match export_image(path, image, grid) {
        Ok(()) => {
            info!(path = %path.display(), "Export finished");
            send(
                tx,
                ctx,
                WorkerResult::Exported {
                    path: path.to_path_buf(),
                },
            );
        }
        Err(e) => send_error(tx, ctx, format!("Failed to export {}", path.display()), &e),
    }
}
