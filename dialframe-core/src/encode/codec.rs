use std::io::Cursor;

use image::{ExtendedColorType, ImageEncoder};

use crate::foundation::error::{DialframeError, DialframeResult};
use crate::render::buffer::PixelBuffer;

/// Output container for a frame sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Encoding {
    /// Baseline JPEG. Transparent areas are flattened over black.
    Jpeg {
        /// Encoder quality, 1..=100.
        quality: u8,
    },
    /// Lossless PNG with straight alpha.
    Png,
}

impl Encoding {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "jpg",
            Self::Png => "png",
        }
    }

    /// Reject JPEG qualities outside 1..=100.
    pub fn validate(self) -> DialframeResult<()> {
        match self {
            Self::Jpeg { quality } if !(1..=100).contains(&quality) => Err(
                DialframeError::config(format!("jpeg quality must be in 1..=100, got {quality}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Encode one frame into an in-memory file image.
pub fn encode_frame(buffer: &PixelBuffer, encoding: Encoding) -> DialframeResult<Vec<u8>> {
    encoding.validate()?;
    let (w, h) = (buffer.width(), buffer.height());
    let mut out = Vec::new();
    match encoding {
        Encoding::Jpeg { quality } => {
            let rgb = buffer.to_rgb8_over_black();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
                .write_image(&rgb, w, h, ExtendedColorType::Rgb8)
                .map_err(|e| DialframeError::encode(format!("jpeg {w}x{h}: {e}")))?;
        }
        Encoding::Png => {
            let rgba = buffer.to_straight_rgba8();
            image::codecs::png::PngEncoder::new(Cursor::new(&mut out))
                .write_image(&rgba, w, h, ExtendedColorType::Rgba8)
                .map_err(|e| DialframeError::encode(format!("png {w}x{h}: {e}")))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/codec.rs"]
mod tests;
