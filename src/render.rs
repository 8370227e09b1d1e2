//! Rendering: copies the artwork buffer onto the canvas 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! The view transform is applied by the host as CSS, so drawing is always a
//! 1:1 blit of the buffer at the origin.

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::pixels::PixelBuffer;

/// Look up the canvas's 2D context.
///
/// # Errors
///
/// Returns `Err` if the context cannot be created or is not a 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Draw the whole buffer at the canvas origin.
///
/// # Errors
///
/// Returns `Err` if the image data cannot be built or `putImageData` fails.
pub fn draw(ctx: &CanvasRenderingContext2d, buffer: &PixelBuffer) -> Result<(), JsValue> {
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(buffer.as_bytes()), buffer.width(), buffer.height())?;
    ctx.put_image_data(&image, 0.0, 0.0)
}
