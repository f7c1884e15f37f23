pub mod export;
pub mod loader;

pub use export::{composite, export_image};
pub use loader::{decode_bytes, is_url, load_from_path, load_from_url, load_source};
