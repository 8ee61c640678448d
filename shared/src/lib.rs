pub mod canvas_format;
pub mod color;

use serde::{Deserialize, Serialize};

pub use canvas_format::{decode_canvas, CanvasBitmap, CanvasDecodeError};
pub use color::{number_to_rgba, PackedColor};

pub const CANVAS_WIDTH: u32 = 2000;
pub const CANVAS_HEIGHT: u32 = 2000;
pub const BYTES_PER_PIXEL: usize = 4;
pub const CANVAS_BYTES: usize = CANVAS_WIDTH as usize * CANVAS_HEIGHT as usize * BYTES_PER_PIXEL;

/// A single placed pixel, as posted to `/pixel` and pushed on `/events`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub color: PackedColor,
}

impl Pixel {
    pub fn new(x: u32, y: u32, color: PackedColor) -> Self {
        Self { x, y, color }
    }
}
