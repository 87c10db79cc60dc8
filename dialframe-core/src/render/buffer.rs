use crate::foundation::core::{Canvas, PixelRect};
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A width x height grid of premultiplied RGBA8 pixels, row-major and tightly packed.
///
/// Used both for the frame being drawn and for decoded overlay bitmaps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer of the given size.
    pub fn new(canvas: Canvas) -> DialframeResult<Self> {
        canvas.validate("pixel buffer")?;
        let len = byte_len(canvas.width, canvas.height)?;
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; len],
        })
    }

    /// Wrap existing premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> DialframeResult<Self> {
        Canvas::new(width, height).validate("pixel buffer")?;
        if data.len() != byte_len(width, height)? {
            return Err(DialframeError::config(format!(
                "pixel buffer expects {}x{}x4 bytes, got {}",
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as a canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Rectangle covering every pixel.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_size(self.width, self.height)
    }

    /// Raw premultiplied bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the premultiplied bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub(crate) fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut [u8]> {
        let i = self.offset(x, y)?;
        Some(&mut self.data[i..i + 4])
    }

    /// Straight-alpha RGBA8 copy, as lossless encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// RGB8 copy flattened over opaque black, for encoders without alpha.
    pub fn to_rgb8_over_black(&self) -> Vec<u8> {
        // Premultiplied color channels already are the result of compositing over black.
        self.data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

fn byte_len(width: u32, height: u32) -> DialframeResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DialframeError::config("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
