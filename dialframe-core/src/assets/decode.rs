use crate::foundation::error::{DialframeError, DialframeResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::render::buffer::PixelBuffer;

/// Decode encoded image bytes (PNG, JPEG, WebP) into a premultiplied RGBA8 bitmap.
pub fn decode_bitmap(bytes: &[u8]) -> DialframeResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| DialframeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PixelBuffer::from_premul_rgba8(width, height, rgba8_premul)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
