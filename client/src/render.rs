use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

use pixelplace_shared::{CanvasBitmap, PackedColor};

use crate::error::ClientError;

pub fn fill_pixel(ctx: &CanvasRenderingContext2d, x: u32, y: u32, color: PackedColor) {
    ctx.set_fill_style_str(&color.css());
    ctx.fill_rect(f64::from(x), f64::from(y), 1.0, 1.0);
}

pub fn draw_bitmap(
    ctx: &CanvasRenderingContext2d,
    bitmap: &CanvasBitmap,
) -> Result<(), ClientError> {
    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(bitmap.as_bytes()),
        bitmap.width(),
        bitmap.height(),
    )?;
    ctx.put_image_data(&image, 0.0, 0.0)?;
    Ok(())
}
