/// Smallest allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom level.
pub const MAX_ZOOM: f64 = 10.0;

/// Zoom level at which the image exactly fits the window.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Default multiplier for a discrete zoom-in step.
pub const DEFAULT_ZOOM_IN_FACTOR: f64 = 1.2;

/// Default multiplier for a discrete zoom-out step.
pub const DEFAULT_ZOOM_OUT_FACTOR: f64 = 0.8;

/// Per-tick multiplier for mouse-wheel zoom in.
pub const DEFAULT_WHEEL_IN_FACTOR: f64 = 1.02;

/// Per-tick multiplier for mouse-wheel zoom out.
pub const DEFAULT_WHEEL_OUT_FACTOR: f64 = 0.98;

/// Fewest grid subdivisions (largest cells).
pub const MIN_SUBDIVISIONS: u32 = 2;

/// Most grid subdivisions (smallest cells).
pub const MAX_SUBDIVISIONS: u32 = 50;

/// Most grid lines laid along one axis of a rectangle.
pub const MAX_GRID_LINES: usize = 10_000;

pub const DEFAULT_SUBDIVISIONS: u32 = 3;

pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

pub const DEFAULT_OPACITY: f32 = 1.0;

/// Pixel margin between an origin cell's top-left corner and its label.
pub const ORIGIN_LABEL_MARGIN: f64 = 4.0;

/// Text of the label marking the user-chosen origin cell.
pub const ORIGIN_LABEL: &str = "1,1";

/// Default timeout for loading an image from a URL.
pub const DEFAULT_URL_TIMEOUT_SECS: u64 = 30;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;
