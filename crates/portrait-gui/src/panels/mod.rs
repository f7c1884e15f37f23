pub mod grid_panel;
pub mod menu_bar;
pub mod status;
pub mod url_dialog;
pub mod viewport;
