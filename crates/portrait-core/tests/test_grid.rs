use approx::assert_relative_eq;
use image::DynamicImage;

use portrait_core::config::GridSettings;
use portrait_core::error::ViewerError;
use portrait_core::geometry::{DisplayRect, Point};
use portrait_core::grid::overlay::ensure_square_cells;
use portrait_core::grid::{GridColor, GridConfiguration, GridOverlay};
use portrait_core::render::{RenderSurface, Stroke};

/// Records every draw call instead of rasterizing.
#[derive(Default)]
struct RecordingSurface {
    lines: Vec<(Point, Point, Stroke)>,
    texts: Vec<(Point, String, [u8; 4])>,
    images: Vec<DisplayRect>,
}

impl RenderSurface for RecordingSurface {
    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.lines.push((from, to, stroke));
    }

    fn draw_text(&mut self, anchor: Point, text: &str, color: [u8; 4]) {
        self.texts.push((anchor, text.to_string(), color));
    }

    fn draw_image(&mut self, _image: &DynamicImage, rect: DisplayRect) {
        self.images.push(rect);
    }
}

fn visible_grid(subdivisions: u32) -> GridConfiguration {
    GridConfiguration::new(true, subdivisions, GridColor::WHITE, 1.0, 1.0).unwrap()
}

// ---------------------------------------------------------------------------
// GridConfiguration
// ---------------------------------------------------------------------------

#[test]
fn test_default_configuration() {
    let grid = GridConfiguration::default();
    assert!(!grid.visible());
    assert_eq!(grid.subdivision_count(), 3);
    assert_eq!(grid.color(), GridColor::Rgb([255, 255, 255]));
    assert_eq!(grid.line_width(), 1.0);
    assert_eq!(grid.opacity(), 1.0);
    assert_eq!(grid.origin_cell(), None);
    assert_eq!(grid.cell_size(), 0.0);
}

#[test]
fn test_constructor_validation() {
    assert!(matches!(
        GridConfiguration::new(true, 1, GridColor::WHITE, 1.0, 1.0),
        Err(ViewerError::OutOfRangeSubdivision(1))
    ));
    assert!(matches!(
        GridConfiguration::new(true, 51, GridColor::WHITE, 1.0, 1.0),
        Err(ViewerError::OutOfRangeSubdivision(51))
    ));
    assert!(matches!(
        GridConfiguration::new(true, 3, GridColor::WHITE, 0.0, 1.0),
        Err(ViewerError::InvalidLineWidth(_))
    ));
    assert!(matches!(
        GridConfiguration::new(true, 3, GridColor::WHITE, f32::NAN, 1.0),
        Err(ViewerError::InvalidLineWidth(_))
    ));
    assert!(matches!(
        GridConfiguration::new(true, 3, GridColor::WHITE, f32::INFINITY, 1.0),
        Err(ViewerError::InvalidLineWidth(_))
    ));
    assert!(matches!(
        GridConfiguration::new(true, 3, GridColor::WHITE, 1.0, 1.5),
        Err(ViewerError::InvalidOpacity(_))
    ));
    assert!(matches!(
        GridConfiguration::new(true, 3, GridColor::WHITE, 1.0, -0.1),
        Err(ViewerError::InvalidOpacity(_))
    ));
    assert!(GridConfiguration::new(false, 2, GridColor::WHITE, 0.5, 0.0).is_ok());
    assert!(GridConfiguration::new(false, 50, GridColor::WHITE, 3.0, 1.0).is_ok());
}

#[test]
fn test_from_settings() {
    let settings = GridSettings {
        visible: true,
        subdivision_count: 7,
        color: GridColor::Rgba([1, 2, 3, 4]),
        line_width: 2.0,
        opacity: 0.5,
    };
    let grid = GridConfiguration::from_settings(&settings).unwrap();
    assert!(grid.visible());
    assert_eq!(grid.subdivision_count(), 7);
    assert_eq!(grid.color(), GridColor::Rgba([1, 2, 3, 4]));

    let bad = GridSettings {
        subdivision_count: 99,
        ..GridSettings::default()
    };
    assert!(GridConfiguration::from_settings(&bad).is_err());
}

#[test]
fn test_cell_size_uses_smaller_dimension() {
    let mut grid = visible_grid(3);
    grid.calculate_cell_size(1200.0, 600.0);
    assert_eq!(grid.cell_size(), 200.0);
    assert_eq!(grid.cell_size_for(1200.0, 600.0), 200.0);
    assert_eq!(grid.cell_size_for(500.0, 900.0), 500.0 / 3.0);
}

#[test]
fn test_cell_size_formula_is_exact() {
    for n in [2, 3, 7, 13, 50] {
        let mut grid = visible_grid(n);
        for (w, h) in [(800.0, 450.0), (333.3, 999.9), (1.0, 1.0), (4096.0, 4096.0)] {
            grid.calculate_cell_size(w, h);
            let expected: f64 = f64::min(w, h) / n as f64;
            assert_eq!(grid.cell_size(), expected);
            assert_eq!(grid.cell_size_for(w, h), expected);
        }
    }
}

#[test]
fn test_increase_size_clamps_at_minimum() {
    let mut grid = visible_grid(4);
    grid.increase_size();
    assert_eq!(grid.subdivision_count(), 3);
    grid.increase_size();
    assert_eq!(grid.subdivision_count(), 2);
    for _ in 0..5 {
        grid.increase_size();
        assert_eq!(grid.subdivision_count(), 2);
    }
}

#[test]
fn test_decrease_size_clamps_at_maximum() {
    let mut grid = visible_grid(48);
    for _ in 0..10 {
        grid.decrease_size();
    }
    assert_eq!(grid.subdivision_count(), 50);
}

#[test]
fn test_set_subdivision_count_validates() {
    let mut grid = visible_grid(3);
    grid.set_subdivision_count(10).unwrap();
    assert_eq!(grid.subdivision_count(), 10);
    assert!(grid.set_subdivision_count(0).is_err());
    assert_eq!(grid.subdivision_count(), 10);
}

#[test]
fn test_hiding_grid_clears_origin() {
    let mut grid = visible_grid(3);
    grid.set_origin_cell(Some((1, 2)));
    grid.toggle_visible();
    assert!(!grid.visible());
    assert_eq!(grid.origin_cell(), None);
    grid.toggle_visible();
    assert!(grid.visible());
    assert_eq!(grid.origin_cell(), None);
}

#[test]
fn test_set_visible_is_idempotent() {
    let mut grid = visible_grid(3);
    grid.set_origin_cell(Some((0, 0)));
    grid.set_visible(true);
    assert!(grid.visible());
    assert_eq!(grid.origin_cell(), Some((0, 0)));
}

// ---------------------------------------------------------------------------
// GridColor
// ---------------------------------------------------------------------------

#[test]
fn test_color_from_channels() {
    assert_eq!(
        GridColor::from_channels(&[10, 20, 30]).unwrap(),
        GridColor::Rgb([10, 20, 30])
    );
    assert_eq!(
        GridColor::from_channels(&[10, 20, 30, 40]).unwrap(),
        GridColor::Rgba([10, 20, 30, 40])
    );
    assert!(matches!(
        GridColor::from_channels(&[1, 2]),
        Err(ViewerError::InvalidColor(_))
    ));
    assert!(GridColor::from_channels(&[1, 2, 3, 4, 5]).is_err());
}

#[test]
fn test_color_parse() {
    assert_eq!(
        "255,0,0".parse::<GridColor>().unwrap(),
        GridColor::Rgb([255, 0, 0])
    );
    assert_eq!(
        " 0, 128 ,255, 64".parse::<GridColor>().unwrap(),
        GridColor::Rgba([0, 128, 255, 64])
    );
    assert!("256,0,0".parse::<GridColor>().is_err());
    assert!("red".parse::<GridColor>().is_err());
    assert!("1,2".parse::<GridColor>().is_err());
}

#[test]
fn test_color_display_and_rgba() {
    assert_eq!(GridColor::Rgb([1, 2, 3]).to_string(), "(1, 2, 3)");
    assert_eq!(GridColor::Rgb([1, 2, 3]).to_rgba(), [1, 2, 3, 255]);
    assert_eq!(GridColor::Rgba([1, 2, 3, 4]).to_rgba(), [1, 2, 3, 4]);
}

#[test]
fn test_set_color_channels() {
    let mut grid = visible_grid(3);
    grid.set_color_channels(&[0, 0, 255]).unwrap();
    assert_eq!(grid.color(), GridColor::Rgb([0, 0, 255]));
    assert!(grid.set_color_channels(&[0]).is_err());
    assert_eq!(grid.color(), GridColor::Rgb([0, 0, 255]));
}

#[test]
fn test_color_json_is_channel_array() {
    let json = serde_json::to_string(&GridColor::Rgba([9, 8, 7, 6])).unwrap();
    assert_eq!(json, "[9,8,7,6]");
    let back: GridColor = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(back, GridColor::Rgb([1, 2, 3]));
    assert!(serde_json::from_str::<GridColor>("[1,2]").is_err());
}

// ---------------------------------------------------------------------------
// GridOverlay
// ---------------------------------------------------------------------------

#[test]
fn test_invisible_grid_has_no_lines() {
    let grid = GridConfiguration::default();
    let lines = GridOverlay::new(&grid).calculate_grid_lines(0.0, 0.0, 800.0, 600.0);
    assert!(lines.is_empty());
}

#[test]
fn test_degenerate_rect_has_no_lines() {
    let grid = visible_grid(3);
    let overlay = GridOverlay::new(&grid);
    assert!(overlay.calculate_grid_lines(0.0, 0.0, 0.0, 600.0).is_empty());
    assert!(overlay.calculate_grid_lines(0.0, 0.0, 800.0, -1.0).is_empty());
    assert!(overlay
        .calculate_grid_lines(0.0, 0.0, f64::INFINITY, 600.0)
        .is_empty());
}

#[test]
fn test_elongated_rect_is_too_dense() {
    let grid = visible_grid(50);
    let overlay = GridOverlay::new(&grid);

    assert!(overlay.calculate_grid_lines(0.0, 0.0, 1e300, 1e-300).is_empty());
    assert!(matches!(
        overlay.try_grid_lines(0.0, 0.0, 1e300, 1e-300),
        Err(ViewerError::GridTooDense { .. })
    ));

    // Quarter-pixel cells: 10_000 columns is one too many.
    let grid = visible_grid(4);
    let overlay = GridOverlay::new(&grid);
    assert!(overlay.try_grid_lines(0.0, 0.0, 2500.0, 1.0).is_err());

    let lines = overlay.try_grid_lines(0.0, 0.0, 2499.5, 1.0).unwrap();
    assert_eq!(lines.vertical.len(), 9_999);
    assert_eq!(lines.horizontal.len(), 5);
}

#[test]
fn test_lines_tile_exact_multiple() {
    let grid = visible_grid(3);
    let lines = GridOverlay::new(&grid).calculate_grid_lines(0.0, 0.0, 1200.0, 600.0);
    assert_eq!(lines.cell_size, 200.0);
    assert_eq!(
        lines.vertical,
        vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0, 1200.0]
    );
    assert_eq!(lines.horizontal, vec![0.0, 200.0, 400.0, 600.0]);
}

#[test]
fn test_lines_cover_partial_trailing_cell() {
    let grid = visible_grid(3);
    // Cell 150; 800 / 150 = 5.33 so six columns and seven lines.
    let lines = GridOverlay::new(&grid).calculate_grid_lines(10.0, 20.0, 800.0, 450.0);
    assert_relative_eq!(lines.cell_size, 150.0);
    assert_eq!(lines.vertical.len(), 7);
    assert_eq!(lines.horizontal.len(), 4);
    assert_relative_eq!(lines.vertical[0], 10.0);
    assert_relative_eq!(lines.horizontal[0], 20.0);
    assert!(*lines.vertical.last().unwrap() >= 10.0 + 800.0);
    assert!(lines.vertical[lines.vertical.len() - 2] < 10.0 + 800.0);
}

#[test]
fn test_render_draws_full_span_lines() {
    let grid = GridConfiguration::new(true, 2, GridColor::Rgb([255, 0, 0]), 2.0, 0.5).unwrap();
    let mut surface = RecordingSurface::default();
    GridOverlay::new(&grid).render(&mut surface, 5.0, 5.0, 100.0, 100.0);

    // 3 vertical + 3 horizontal.
    assert_eq!(surface.lines.len(), 6);
    for (from, to, stroke) in &surface.lines {
        assert_eq!(stroke.width, 2.0);
        assert_eq!(stroke.color, [255, 0, 0, 128]);
        if from.x == to.x {
            assert_eq!((from.y, to.y), (5.0, 105.0));
        } else {
            assert_eq!((from.x, to.x), (5.0, 105.0));
        }
    }
    assert!(surface.texts.is_empty());
}

#[test]
fn test_render_opacity_replaces_color_alpha() {
    let grid = GridConfiguration::new(true, 2, GridColor::Rgba([0, 0, 255, 40]), 1.0, 0.75).unwrap();
    let mut surface = RecordingSurface::default();
    GridOverlay::new(&grid).render(&mut surface, 0.0, 0.0, 100.0, 100.0);

    assert!(!surface.lines.is_empty());
    for (_, _, stroke) in &surface.lines {
        assert_eq!(stroke.color, [0, 0, 255, 191]);
    }
}

#[test]
fn test_render_origin_label() {
    let mut grid = GridConfiguration::new(true, 4, GridColor::Rgb([0, 255, 0]), 1.0, 0.2).unwrap();
    grid.set_origin_cell(Some((1, 2)));
    let mut surface = RecordingSurface::default();
    GridOverlay::new(&grid).render(&mut surface, 100.0, 50.0, 400.0, 400.0);

    assert_eq!(surface.texts.len(), 1);
    let (anchor, text, color) = &surface.texts[0];
    assert_eq!(text, "1,1");
    assert_eq!(*anchor, Point::new(100.0 + 100.0 + 4.0, 50.0 + 200.0 + 4.0));
    assert_eq!(*color, [0, 255, 0, 255]);
}

#[test]
fn test_render_invisible_is_noop() {
    let mut grid = visible_grid(3);
    grid.set_origin_cell(Some((0, 0)));
    grid.set_visible(false);
    let mut surface = RecordingSurface::default();
    GridOverlay::new(&grid).render(&mut surface, 0.0, 0.0, 300.0, 300.0);
    assert!(surface.lines.is_empty());
    assert!(surface.texts.is_empty());
}

#[test]
fn test_ensure_square_cells() {
    assert_eq!(ensure_square_cells(1200.0, 600.0), (600.0, 600.0));
    assert_eq!(ensure_square_cells(300.0, 900.0), (300.0, 300.0));
}
