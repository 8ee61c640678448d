#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::rc::Rc;

use pixelplace_shared::{CanvasBitmap, PackedColor, Pixel};

use crate::camera::{
    middle_pixel, pixel_under, Camera, CameraTransform, Cursor, Layout, Origin, PixelPos,
    ScaleBounds, Wheel,
};
use crate::events::Events;

/// Rendering target and layout source for [`CanvasState`].
///
/// The browser implementation lives in `dom`; tests provide their own.
pub trait Surface {
    /// Current on-screen position of the canvas' top-left corner.
    fn canvas_origin(&self) -> Origin;
    fn layout(&self) -> Layout;
    fn apply_camera(&mut self, transform: &CameraTransform);
    fn show_highlight(&mut self, color: PackedColor);
    fn hide_highlight(&mut self);
    fn paint_pixel(&mut self, x: u32, y: u32, color: PackedColor);
    fn draw_bitmap(&mut self, bitmap: &CanvasBitmap);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub raw: PixelPos,
    pub clamped: (u32, u32),
    pub middle: PixelPos,
}

pub struct CanvasState<S: Surface> {
    camera: Camera,
    pointer: PointerState,
    color: Option<PackedColor>,
    surface: S,
    events: Rc<Events>,
}

impl<S: Surface> CanvasState<S> {
    pub fn new(surface: S, bounds: ScaleBounds, events: Rc<Events>) -> Self {
        let mut state = Self {
            camera: Camera::new(bounds),
            pointer: PointerState::default(),
            color: None,
            surface,
            events,
        };
        state.surface.hide_highlight();
        state.update_camera();
        state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn color(&self) -> Option<PackedColor> {
        self.color
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn init_pan(&mut self, cursor: &Cursor) {
        self.camera.begin_pan(cursor);
    }

    /// Tracks the pixel under the cursor and the viewport center, then
    /// moves the camera if a drag is in progress.
    pub fn pan_camera(&mut self, cursor: &Cursor) {
        let origin = self.surface.canvas_origin();
        let layout = self.surface.layout();
        let scale = self.camera.scale;
        self.pointer.raw = pixel_under(cursor, origin, scale);
        self.pointer.clamped = self.pointer.raw.clamped();
        self.pointer.middle = middle_pixel(layout, origin, scale);
        self.camera.drag_to(cursor, self.pointer.middle);
        self.update_camera();
    }

    pub fn toggle_zoom(&mut self, wheel: &Wheel) {
        let layout = self.surface.layout();
        self.camera.zoom(wheel, layout, self.pointer.middle);
        self.update_camera();
    }

    /// Requests a placement at the last hovered pixel. Ignored after a pan,
    /// outside the canvas, or with no color selected.
    pub fn click_pixel(&mut self) -> Option<Pixel> {
        if !self.camera.is_settled() || !self.pointer.raw.in_canvas() {
            return None;
        }
        let color = self.color?;
        let (x, y) = self.pointer.clamped;
        let pixel = Pixel::new(x, y, color);
        log::debug!("Placing pixel x={x} y={y} color={:#010x}", color.0);
        self.events.place_pixel.emit(&pixel);
        Some(pixel)
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.camera.set_dragging(dragging);
    }

    pub fn set_color(&mut self, color: PackedColor) {
        self.color = Some(color);
        self.surface.show_highlight(color);
    }

    pub fn hide_px(&mut self) {
        self.color = None;
        self.surface.hide_highlight();
    }

    pub fn paint_pixel(&mut self, x: u32, y: u32, color: PackedColor) {
        self.surface.paint_pixel(x, y, color);
    }

    pub fn draw_all_canvas(&mut self, bitmap: &CanvasBitmap) {
        self.surface.draw_bitmap(bitmap);
    }

    fn update_camera(&mut self) {
        let transform = self.camera.transform(self.pointer.clamped);
        self.surface.apply_camera(&transform);
    }
}
