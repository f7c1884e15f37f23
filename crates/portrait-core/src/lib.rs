pub mod config;
pub mod consts;
pub mod coords;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod grid;
pub mod image_data;
pub mod io;
pub mod render;
pub mod viewer;
pub mod viewport;
