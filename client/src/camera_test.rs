#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON * a.abs().max(b.abs()).max(1.0)
}

const INSIDE: PixelPos = PixelPos { x: 1000, y: 1000 };

fn wheel(x: f64, y: f64, delta_y: f64) -> Wheel {
    Wheel {
        page_x: x,
        page_y: y,
        delta_y,
    }
}

// --- Pixel mapping ---

#[test]
fn clamps_below_zero() {
    assert_eq!(clamp_coordinate(-5, 2000), 0);
}

#[test]
fn clamps_above_canvas() {
    assert_eq!(clamp_coordinate(2005, 2000), 1999);
    assert_eq!(clamp_coordinate(1999, 2000), 1999);
}

#[test]
fn pixel_coordinate_floors() {
    assert_eq!(pixel_coordinate(15.0, 10.0, 2.0), 2);
    assert_eq!(pixel_coordinate(9.0, 10.0, 2.0), -1);
    assert_eq!(pixel_coordinate(10.0, 10.0, 0.5), 0);
}

#[test]
fn pixel_under_uses_client_coordinates() {
    let cursor = Cursor {
        client_x: 510.0,
        client_y: 260.0,
        page_x: 900.0,
        page_y: 900.0,
    };
    let pos = pixel_under(&cursor, Origin { left: 10.0, top: 10.0 }, 2.0);
    assert_eq!(pos, PixelPos { x: 250, y: 125 });
}

#[test]
fn pixel_pos_bounds() {
    assert!(PixelPos { x: 0, y: 1999 }.in_canvas());
    assert!(!PixelPos { x: -1, y: 0 }.in_canvas());
    assert!(!PixelPos { x: 0, y: 2000 }.in_canvas());
    assert_eq!(PixelPos { x: -5, y: 2005 }.clamped(), (0, 1999));
}

#[test]
fn middle_pixel_is_viewport_center() {
    let layout = Layout {
        camera_width: 800.0,
        camera_height: 600.0,
        zoom_width: 0.0,
        zoom_height: 0.0,
    };
    let middle = middle_pixel(layout, Origin { left: -100.0, top: 0.0 }, 2.0);
    assert_eq!(middle, PixelPos { x: 250, y: 150 });
}

// --- Scale bounds ---

#[test]
fn scale_bounds_validation() {
    assert_eq!(ScaleBounds::new(0.5, 35.0), Some(ScaleBounds::NARROW));
    assert_eq!(ScaleBounds::new(0.0, 35.0), None);
    assert_eq!(ScaleBounds::new(40.0, 35.0), None);
    assert_eq!(ScaleBounds::new(f64::NAN, 35.0), None);
}

#[test]
fn zoom_factor_direction() {
    let bounds = ScaleBounds::DEFAULT;
    assert!(approx_eq(zoom_factor(-100.0, 1.0, bounds), 2.0));
    assert!(approx_eq(zoom_factor(100.0, 1.0, bounds), 0.5));
    assert!(approx_eq(zoom_factor(0.0, 1.0, bounds), 1.0));
}

#[test]
fn zoom_factor_is_clamped_to_bounds() {
    let bounds = ScaleBounds::DEFAULT;
    assert!(approx_eq(zoom_factor(-10_000.0, 30.0, bounds), 35.0 / 30.0));
    assert!(approx_eq(zoom_factor(10_000.0, 0.3, bounds), 0.2 / 0.3));
}

#[test]
fn scale_stays_in_bounds_for_any_delta() {
    for bounds in [ScaleBounds::DEFAULT, ScaleBounds::NARROW] {
        let mut camera = Camera::new(bounds);
        let deltas = [
            -1.0, -53.0, -100.0, -1e4, -1e9, 1.0, 3.0, 100.0, 750.0, 1e4, 1e9, -0.001, 0.0,
        ];
        for _ in 0..20 {
            for delta in deltas {
                camera.zoom(&wheel(400.0, 300.0, delta), Layout::default(), INSIDE);
                assert!(camera.scale >= bounds.min, "{} < {}", camera.scale, bounds.min);
                assert!(camera.scale <= bounds.max, "{} > {}", camera.scale, bounds.max);
            }
        }
    }
}

// --- Zoom ---

#[test]
fn zoom_keeps_point_under_cursor() {
    let mut camera = Camera::new(ScaleBounds::DEFAULT);
    camera.x = 37.0;
    camera.y = -12.5;
    let cases = [(-120.0, 300.0, 200.0), (80.0, 10.0, 590.0), (-7.0, 640.0, 0.0)];
    for (delta, cursor_x, cursor_y) in cases {
        let (old_x, old_y, old_scale) = (camera.x, camera.y, camera.scale);
        camera.zoom(&wheel(cursor_x, cursor_y, delta), Layout::default(), INSIDE);
        assert!(approx_eq(
            (cursor_x - camera.x) / camera.scale,
            (cursor_x - old_x) / old_scale
        ));
        assert!(approx_eq(
            (cursor_y - camera.y) / camera.scale,
            (cursor_y - old_y) / old_scale
        ));
    }
}

#[test]
fn zoom_focal_is_relative_to_zoom_layer_center() {
    let mut camera = Camera::new(ScaleBounds::DEFAULT);
    let layout = Layout {
        camera_width: 0.0,
        camera_height: 0.0,
        zoom_width: 2000.0,
        zoom_height: 2000.0,
    };
    camera.zoom(&wheel(1000.0, 1000.0, -100.0), layout, INSIDE);
    assert_eq!(camera.scale, 2.0);
    assert_eq!(camera.x, 0.0);
    assert_eq!(camera.y, 0.0);
}

#[test]
fn zoom_at_max_scale_leaves_offsets() {
    let mut camera = Camera::new(ScaleBounds::DEFAULT);
    camera.scale = 35.0;
    camera.x = 5.0;
    camera.zoom(&wheel(100.0, 100.0, -200.0), Layout::default(), INSIDE);
    assert_eq!(camera.scale, 35.0);
    assert!(approx_eq(camera.x, 5.0));
}

// --- Panning ---

#[test]
fn drag_moves_by_cursor_delta() {
    let mut camera = Camera::new(ScaleBounds::DEFAULT);
    camera.x = 10.0;
    camera.y = 20.0;
    camera.begin_pan(&Cursor::at(100.0, 100.0));
    camera.drag_to(&Cursor::at(130.0, 80.0), INSIDE);
    assert_eq!((camera.x, camera.y), (40.0, 0.0));
    assert!(!camera.is_settled());
}

#[test]
fn drag_ignored_when_not_dragging() {
    let mut camera = Camera::new(ScaleBounds::DEFAULT);
    camera.begin_pan(&Cursor::at(0.0, 0.0));
    camera.set_dragging(false);
    camera.drag_to(&Cursor::at(50.0, 50.0), INSIDE);
    assert_eq!((camera.x, camera.y), (0.0, 0.0));
    assert!(camera.is_settled());
}

#[test]
fn drag_back_to_start_is_settled() {
    let mut camera = Camera::new(ScaleBounds::DEFAULT);
    camera.begin_pan(&Cursor::at(0.0, 0.0));
    camera.drag_to(&Cursor::at(50.0, 50.0), INSIDE);
    camera.drag_to(&Cursor::at(0.0, 0.0), INSIDE);
    assert!(camera.is_settled());
}

// --- Border lock ---

#[test]
fn border_accepts_anything_inside() {
    assert!(border_accepts(0, 2000, 0.0, 500.0));
    assert!(border_accepts(1999, 2000, 0.0, -500.0));
}

#[test]
fn border_past_left_edge_only_accepts_decreasing_offset() {
    assert!(border_accepts(-3, 2000, 10.0, 5.0));
    assert!(!border_accepts(-3, 2000, 10.0, 10.0));
    assert!(!border_accepts(-3, 2000, 10.0, 15.0));
}

#[test]
fn border_past_right_edge_only_accepts_increasing_offset() {
    assert!(border_accepts(2000, 2000, 10.0, 15.0));
    assert!(border_accepts(2000, 2000, 10.0, 10.0));
    assert!(!border_accepts(2000, 2000, 10.0, 5.0));
}

#[test]
fn drag_past_edge_is_locked_per_axis() {
    let mut camera = Camera::new(ScaleBounds::DEFAULT);
    camera.begin_pan(&Cursor::at(0.0, 0.0));
    let middle = PixelPos { x: -1, y: 500 };
    camera.drag_to(&Cursor::at(40.0, 40.0), middle);
    assert_eq!(camera.x, 0.0);
    assert_eq!(camera.y, 40.0);
    camera.drag_to(&Cursor::at(-40.0, 40.0), middle);
    assert_eq!(camera.x, -40.0);
}

#[test]
fn transform_reports_highlight() {
    let mut camera = Camera::new(ScaleBounds::NARROW);
    camera.x = 3.0;
    let transform = camera.transform((7, 9));
    assert_eq!(
        transform,
        CameraTransform {
            x: 3.0,
            y: 0.0,
            scale: 1.0,
            highlight_x: 7,
            highlight_y: 9
        }
    );
}
