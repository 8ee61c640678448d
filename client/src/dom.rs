use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent,
    WheelEvent,
};

use pixelplace_shared::{CanvasBitmap, PackedColor, CANVAS_HEIGHT, CANVAS_WIDTH};

use crate::camera::{CameraTransform, Cursor, Layout, Origin, Wheel};
use crate::error::ClientError;
use crate::render::{draw_bitmap, fill_pixel};
use crate::state::Surface;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, ClientError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| ClientError::MissingElement(id.to_string()))?;
    element
        .dyn_into::<T>()
        .map_err(|_| ClientError::InvalidElement(id.to_string()))
}

pub fn find_element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

pub fn set_status(status_el: &Element, state: &str, text: &str) {
    let _ = status_el.set_attribute("data-state", state);
    status_el.set_text_content(Some(text));
}

pub fn cursor_from_event(event: &MouseEvent) -> Cursor {
    Cursor {
        client_x: f64::from(event.client_x()),
        client_y: f64::from(event.client_y()),
        page_x: f64::from(event.page_x()),
        page_y: f64::from(event.page_y()),
    }
}

pub fn wheel_from_event(event: &WheelEvent) -> Wheel {
    Wheel {
        page_x: f64::from(event.page_x()),
        page_y: f64::from(event.page_y()),
        delta_y: event.delta_y(),
    }
}

/// The page elements that make up the camera: `camera` is the viewport,
/// `position` translates, `zoom` scales, `pixel` marks the hovered pixel.
pub struct DomSurface {
    camera: HtmlElement,
    position: HtmlElement,
    zoom: HtmlElement,
    pixel: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl DomSurface {
    pub fn from_document(document: &Document) -> Result<Self, ClientError> {
        let canvas: HtmlCanvasElement = get_element(document, "canvas")?;
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| ClientError::Js("Missing canvas context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ClientError::InvalidElement("canvas".to_string()))?;
        Ok(Self {
            camera: get_element(document, "camera")?,
            position: get_element(document, "position")?,
            zoom: get_element(document, "zoom")?,
            pixel: get_element(document, "pixel")?,
            canvas,
            ctx,
        })
    }

    pub fn camera_element(&self) -> &HtmlElement {
        &self.camera
    }
}

impl Surface for DomSurface {
    fn canvas_origin(&self) -> Origin {
        let rect = self.canvas.get_bounding_client_rect();
        Origin {
            left: rect.left(),
            top: rect.top(),
        }
    }

    fn layout(&self) -> Layout {
        Layout {
            camera_width: f64::from(self.camera.offset_width()),
            camera_height: f64::from(self.camera.offset_height()),
            zoom_width: f64::from(self.zoom.offset_width()),
            zoom_height: f64::from(self.zoom.offset_height()),
        }
    }

    fn apply_camera(&mut self, transform: &CameraTransform) {
        let _ = self.position.style().set_property(
            "transform",
            &format!(
                "translateX({}px) translateY({}px)",
                transform.x, transform.y
            ),
        );
        let _ = self
            .zoom
            .style()
            .set_property("transform", &format!("scale({})", transform.scale));
        let style = self.pixel.style();
        let _ = style.set_property("left", &format!("{}px", transform.highlight_x));
        let _ = style.set_property("top", &format!("{}px", transform.highlight_y));
    }

    fn show_highlight(&mut self, color: PackedColor) {
        let style = self.pixel.style();
        let _ = style.set_property("background", &color.css());
        let _ = style.set_property("display", "block");
    }

    fn hide_highlight(&mut self) {
        let _ = self.pixel.style().set_property("display", "none");
    }

    fn paint_pixel(&mut self, x: u32, y: u32, color: PackedColor) {
        fill_pixel(&self.ctx, x, y, color);
    }

    fn draw_bitmap(&mut self, bitmap: &CanvasBitmap) {
        if let Err(err) = draw_bitmap(&self.ctx, bitmap) {
            log::error!("Failed to draw canvas: {err}");
        }
    }
}
