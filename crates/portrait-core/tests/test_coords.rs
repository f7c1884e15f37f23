use approx::assert_relative_eq;

use portrait_core::coords::{display_coordinates, map_screen_to_grid, status_text, GridPosition};
use portrait_core::geometry::{DisplayRect, Point};

fn rect() -> DisplayRect {
    DisplayRect::new(0.0, 75.0, 800.0, 450.0)
}

// ---------------------------------------------------------------------------
// map_screen_to_grid
// ---------------------------------------------------------------------------

#[test]
fn test_point_in_first_cell() {
    let pos = map_screen_to_grid(Point::new(75.0, 75.0 + 30.0), rect(), 150.0).unwrap();
    assert_eq!(pos.cell, (0, 0));
    assert_relative_eq!(pos.percent.0, 50.0);
    assert_relative_eq!(pos.percent.1, 20.0);
}

#[test]
fn test_point_in_partial_trailing_cell() {
    let pos = map_screen_to_grid(Point::new(799.0, 524.0), rect(), 150.0).unwrap();
    assert_eq!(pos.cell, (5, 2));
}

#[test]
fn test_points_outside_image() {
    // Letterbox bands above and below the image.
    assert!(map_screen_to_grid(Point::new(400.0, 10.0), rect(), 150.0).is_none());
    assert!(map_screen_to_grid(Point::new(400.0, 590.0), rect(), 150.0).is_none());
    // Right and bottom edges are exclusive.
    assert!(map_screen_to_grid(Point::new(800.0, 100.0), rect(), 150.0).is_none());
    assert!(map_screen_to_grid(Point::new(100.0, 525.0), rect(), 150.0).is_none());
    // Top-left corner is inside.
    assert!(map_screen_to_grid(Point::new(0.0, 75.0), rect(), 150.0).is_some());
}

#[test]
fn test_non_positive_cell_size() {
    assert!(map_screen_to_grid(Point::new(10.0, 100.0), rect(), 0.0).is_none());
    assert!(map_screen_to_grid(Point::new(10.0, 100.0), rect(), -1.0).is_none());
    assert!(map_screen_to_grid(Point::new(10.0, 100.0), rect(), f64::NAN).is_none());
}

#[test]
fn test_panned_rect() {
    // Image panned so it starts left of the window.
    let panned = DisplayRect::new(-300.0, -100.0, 1600.0, 900.0);
    let pos = map_screen_to_grid(Point::new(0.0, 0.0), panned, 300.0).unwrap();
    assert_eq!(pos.cell, (1, 0));
    assert_relative_eq!(pos.percent.0, 0.0);
    assert_relative_eq!(pos.percent.1, 100.0 / 3.0, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// display_coordinates
// ---------------------------------------------------------------------------

#[test]
fn test_display_without_origin_is_one_based() {
    assert_eq!(display_coordinates((0, 0), None), (1, 1));
    assert_eq!(display_coordinates((4, 2), None), (5, 3));
}

#[test]
fn test_display_relative_to_origin() {
    assert_eq!(display_coordinates((2, 3), Some((2, 3))), (1, 1));
    assert_eq!(display_coordinates((5, 4), Some((2, 3))), (4, 2));
}

#[test]
fn test_display_clamps_cells_before_origin_to_one() {
    // Cells left of / above the origin all collapse onto 1.
    assert_eq!(display_coordinates((1, 3), Some((2, 3))), (1, 1));
    assert_eq!(display_coordinates((0, 0), Some((2, 3))), (1, 1));
    assert_eq!(display_coordinates((0, 5), Some((4, 1))), (1, 5));
}

// ---------------------------------------------------------------------------
// status_text
// ---------------------------------------------------------------------------

#[test]
fn test_status_ready() {
    assert_eq!(status_text(None), "Ready");
}

#[test]
fn test_status_format() {
    let pos = GridPosition {
        cell: (1, 0),
        percent: (42.4, 99.6),
    };
    assert_eq!(
        status_text(Some((pos, (2, 1)))),
        "Grid: (2, 1) | Position: (42%, 99%)"
    );
}

#[test]
fn test_status_percent_is_truncated() {
    let pos = GridPosition {
        cell: (0, 0),
        percent: (99.999, 0.4),
    };
    assert_eq!(
        status_text(Some((pos, (1, 1)))),
        "Grid: (1, 1) | Position: (99%, 0%)"
    );
}
