//! Camera transform and cursor-to-pixel mapping.
//!
//! Nothing here touches the DOM: element measurements come in as plain
//! values so the math can be exercised headless.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use pixelplace_shared::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    pub const DEFAULT: Self = Self { min: 0.2, max: 35.0 };
    pub const NARROW: Self = Self { min: 0.5, max: 35.0 };

    pub fn new(min: f64, max: f64) -> Option<Self> {
        if min.is_finite() && max.is_finite() && min > 0.0 && min <= max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Mouse position in both viewport (`client`) and document (`page`)
/// coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    pub client_x: f64,
    pub client_y: f64,
    pub page_x: f64,
    pub page_y: f64,
}

impl Cursor {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            client_x: x,
            client_y: y,
            page_x: x,
            page_y: y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Wheel {
    pub page_x: f64,
    pub page_y: f64,
    pub delta_y: f64,
}

/// Top-left corner of the canvas on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Origin {
    pub left: f64,
    pub top: f64,
}

/// Rendered sizes of the camera viewport and the zoom layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    pub camera_width: f64,
    pub camera_height: f64,
    pub zoom_width: f64,
    pub zoom_height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

impl PixelPos {
    pub fn in_canvas(&self) -> bool {
        (0..i64::from(CANVAS_WIDTH)).contains(&self.x)
            && (0..i64::from(CANVAS_HEIGHT)).contains(&self.y)
    }

    pub fn clamped(&self) -> (u32, u32) {
        (
            clamp_coordinate(self.x, CANVAS_WIDTH),
            clamp_coordinate(self.y, CANVAS_HEIGHT),
        )
    }
}

/// Values the surface needs to redraw the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub highlight_x: u32,
    pub highlight_y: u32,
}

pub fn pixel_coordinate(client: f64, origin: f64, scale: f64) -> i64 {
    ((client - origin) / scale).floor() as i64
}

pub fn clamp_coordinate(raw: i64, extent: u32) -> u32 {
    raw.clamp(0, i64::from(extent) - 1) as u32
}

pub fn pixel_under(cursor: &Cursor, origin: Origin, scale: f64) -> PixelPos {
    PixelPos {
        x: pixel_coordinate(cursor.client_x, origin.left, scale),
        y: pixel_coordinate(cursor.client_y, origin.top, scale),
    }
}

/// Canvas pixel under the center of the camera viewport.
pub fn middle_pixel(layout: Layout, origin: Origin, scale: f64) -> PixelPos {
    PixelPos {
        x: pixel_coordinate(layout.camera_width / 2.0, origin.left, scale),
        y: pixel_coordinate(layout.camera_height / 2.0, origin.top, scale),
    }
}

/// Multiplier for one wheel step: `|delta| / 100 + 1` when zooming in,
/// its reciprocal when zooming out, adjusted so the result stays in bounds.
pub fn zoom_factor(delta_y: f64, scale: f64, bounds: ScaleBounds) -> f64 {
    let ratio = (delta_y / 100.0).abs() + 1.0;
    let factor = if delta_y < 0.0 { ratio } else { 1.0 / ratio };
    bounds.clamp(scale * factor) / scale
}

/// Accepts an offset change while the viewport center is over the canvas,
/// and otherwise only changes that move back toward it.
pub fn border_accepts(middle: i64, extent: u32, current: f64, next: f64) -> bool {
    let extent = i64::from(extent);
    (middle >= 0 && middle < extent)
        || (middle < 0 && current > next)
        || (middle >= extent && current <= next)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    bounds: ScaleBounds,
    initial_x: f64,
    initial_y: f64,
    pan_start_x: f64,
    pan_start_y: f64,
    dragging: bool,
}

impl Camera {
    pub fn new(bounds: ScaleBounds) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: bounds.clamp(1.0),
            bounds,
            initial_x: 0.0,
            initial_y: 0.0,
            pan_start_x: 0.0,
            pan_start_y: 0.0,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn begin_pan(&mut self, cursor: &Cursor) {
        self.pan_start_x = cursor.page_x;
        self.pan_start_y = cursor.page_y;
        self.initial_x = self.x;
        self.initial_y = self.y;
        self.dragging = true;
    }

    /// Moves the camera by the cursor delta since `begin_pan`. Does nothing
    /// unless a drag is in progress.
    pub fn drag_to(&mut self, cursor: &Cursor, middle: PixelPos) {
        if !self.dragging {
            return;
        }
        self.set_x(self.initial_x + cursor.page_x - self.pan_start_x, middle);
        self.set_y(self.initial_y + cursor.page_y - self.pan_start_y, middle);
    }

    /// Zooms around the wheel position, keeping the point under it fixed.
    pub fn zoom(&mut self, wheel: &Wheel, layout: Layout, middle: PixelPos) {
        let focal_x = wheel.page_x - layout.zoom_width / 2.0;
        let focal_y = wheel.page_y - layout.zoom_height / 2.0;
        let factor = zoom_factor(wheel.delta_y, self.scale, self.bounds);
        self.scale = self.bounds.clamp(self.scale * factor);
        self.set_x(focal_x - (focal_x - self.x) * factor, middle);
        self.set_y(focal_y - (focal_y - self.y) * factor, middle);
    }

    /// True when the offsets have not moved since the last `begin_pan`.
    pub fn is_settled(&self) -> bool {
        self.x == self.initial_x && self.y == self.initial_y
    }

    pub fn transform(&self, highlight: (u32, u32)) -> CameraTransform {
        CameraTransform {
            x: self.x,
            y: self.y,
            scale: self.scale,
            highlight_x: highlight.0,
            highlight_y: highlight.1,
        }
    }

    fn set_x(&mut self, next: f64, middle: PixelPos) {
        if border_accepts(middle.x, CANVAS_WIDTH, self.x, next) {
            self.x = next;
        }
    }

    fn set_y(&mut self, next: f64, middle: PixelPos) {
        if border_accepts(middle.y, CANVAS_HEIGHT, self.y, next) {
            self.y = next;
        }
    }
}
