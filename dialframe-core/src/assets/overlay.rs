use std::path::{Path, PathBuf};

use crate::assets::decode::decode_bitmap;
use crate::foundation::core::ColorRgba;
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::render::buffer::PixelBuffer;

/// Resampling kernel used when an overlay is scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbour; keeps hard pixel edges.
    Nearest,
    /// Bilinear (triangle) filter.
    #[default]
    Bilinear,
    /// Cubic Catmull-Rom filter.
    CatmullRom,
    /// Lanczos with a window of 3.
    Lanczos3,
}

impl From<ResampleFilter> for image::imageops::FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Bilinear => Self::Triangle,
            ResampleFilter::CatmullRom => Self::CatmullRom,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Read and decode an overlay bitmap.
///
/// A missing, unreadable, or unrecognized file is a [`DialframeError::Decode`].
pub fn load_overlay(path: &Path) -> DialframeResult<PixelBuffer> {
    let bytes = std::fs::read(path)
        .map_err(|e| DialframeError::decode(format!("read overlay '{}': {e}", path.display())))?;
    decode_bitmap(&bytes).map_err(|e| match e {
        DialframeError::Decode(msg) => {
            DialframeError::decode(format!("overlay '{}': {msg}", path.display()))
        }
        other => other,
    })
}

/// Directory that overlay names are resolved against.
#[derive(Clone, Debug)]
pub struct OverlayDir {
    root: PathBuf,
}

impl OverlayDir {
    /// Resolve overlays relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path for the overlay `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Load the overlay `name`.
    pub fn load(&self, name: &str) -> DialframeResult<PixelBuffer> {
        load_overlay(&self.path(name))
    }
}

/// Scale `bitmap` to `width` x `height`.
///
/// One of the two may be zero, in which case it is derived from the other so that the aspect
/// ratio is kept.
pub fn resize_bitmap(
    bitmap: &PixelBuffer,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> DialframeResult<PixelBuffer> {
    let (src_w, src_h) = (bitmap.width(), bitmap.height());
    let (w, h) = match (width, height) {
        (0, 0) => {
            return Err(DialframeError::config(
                "resize needs a target width or height",
            ));
        }
        (w, 0) => (w, derive_dimension(w, src_h, src_w)),
        (0, h) => (derive_dimension(h, src_w, src_h), h),
        (w, h) => (w, h),
    };
    if (w, h) == (src_w, src_h) {
        return Ok(bitmap.clone());
    }

    let img = image::RgbaImage::from_raw(src_w, src_h, bitmap.as_bytes().to_vec())
        .ok_or_else(|| DialframeError::config("overlay bytes do not match its size"))?;
    let scaled = image::imageops::resize(&img, w, h, filter.into());
    let mut data = scaled.into_raw();
    // Cubic kernels can overshoot; keep color <= alpha so the data stays premultiplied.
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    }
    PixelBuffer::from_premul_rgba8(w, h, data)
}

fn derive_dimension(given: u32, other_src: u32, given_src: u32) -> u32 {
    let v = (f64::from(given) * f64::from(other_src) / f64::from(given_src)).round();
    (v as u32).max(1)
}

/// Map every pixel to whichever of opaque black or `color` is closer.
///
/// Produces a fully opaque two-color icon; transparent areas become black.
pub fn two_tone(bitmap: &PixelBuffer, color: ColorRgba) -> DialframeResult<PixelBuffer> {
    let palette = [ColorRgba::BLACK.to_premul(), color.to_premul()];
    let mut out = bitmap.clone().into_bytes();
    for px in out.chunks_exact_mut(4) {
        let dist = |p: &[u8; 4]| -> u32 {
            px.iter()
                .zip(p.iter())
                .map(|(&a, &b)| {
                    let d = u32::from(a.abs_diff(b));
                    d * d
                })
                .sum()
        };
        let pick = if dist(&palette[1]) < dist(&palette[0]) {
            palette[1]
        } else {
            palette[0]
        };
        px.copy_from_slice(&pick);
    }
    PixelBuffer::from_premul_rgba8(bitmap.width(), bitmap.height(), out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/overlay.rs"]
mod tests;
