use portrait_core::geometry::Point;

/// Error shown in a modal window until dismissed.
pub struct ErrorDialog {
    pub title: &'static str,
    pub message: String,
}

/// Shell-only UI state. Everything about the image lives in the core viewer.
#[derive(Default)]
pub struct UiState {
    pub show_grid_panel: bool,

    /// Text of the open "Open URL" dialog, `None` when closed.
    pub url_input: Option<String>,

    /// Description of the running worker task (None = idle).
    pub busy: Option<String>,

    /// Cursor text for the status bar.
    pub cursor_status: String,

    /// Viewport point the context menu was opened at.
    pub context_point: Option<Point>,

    pub log_messages: Vec<String>,

    pub error: Option<ErrorDialog>,
}

impl UiState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
