pub mod config;
pub mod overlay;

pub use config::{GridColor, GridConfiguration};
pub use overlay::{GridLines, GridOverlay};
