use crate::composite::blend::{BlendMode, blend};
use crate::foundation::core::{ColorRgba, PixelRect, Point2D};
use crate::foundation::math::coverage_to_u8;
use crate::geometry::sector::SectorMask;
use crate::render::buffer::PixelBuffer;

/// What gets painted by [`composite`].
#[derive(Clone, Copy, Debug)]
pub enum Source<'a> {
    /// A flat color shaped by a sector mask.
    Solid {
        /// Straight-alpha fill color.
        color: ColorRgba,
        /// Coverage mask.
        mask: &'a SectorMask,
    },
    /// A bitmap painted with its own per-pixel alpha. No mask applies.
    Bitmap {
        /// Premultiplied overlay pixels.
        bitmap: &'a PixelBuffer,
        /// Destination pixel receiving the bitmap's top-left corner.
        origin: Point2D,
    },
}

/// Paint `source` into `dest`, touching only pixels inside `region`.
///
/// A solid source never writes outside its mask's bounding box, and pixels where the mask has no
/// coverage keep their previous content in both blend modes. A bitmap source never writes
/// outside its own footprint.
pub fn composite(dest: &mut PixelBuffer, region: PixelRect, source: Source<'_>, mode: BlendMode) {
    match source {
        Source::Solid { color, mask } => composite_mask(dest, region, color, mask, mode),
        Source::Bitmap { bitmap, origin } => composite_bitmap(dest, region, bitmap, origin, mode),
    }
}

/// Paint `color` through `mask` over the whole of `dest`.
pub fn fill_mask(dest: &mut PixelBuffer, color: ColorRgba, mask: &SectorMask, mode: BlendMode) {
    let region = dest.bounds();
    composite(dest, region, Source::Solid { color, mask }, mode);
}

/// Paint `bitmap` with its top-left corner at `origin`.
pub fn draw_bitmap(dest: &mut PixelBuffer, bitmap: &PixelBuffer, origin: Point2D, mode: BlendMode) {
    let region = dest.bounds();
    composite(dest, region, Source::Bitmap { bitmap, origin }, mode);
}

/// Paint an opaque-coverage rectangle of `color`.
pub fn fill_rect(dest: &mut PixelBuffer, rect: PixelRect, color: ColorRgba, mode: BlendMode) {
    let area = rect.intersect(dest.bounds());
    let src = color.to_premul();
    for y in area.y0..area.y1 {
        for x in area.x0..area.x1 {
            if let Some(px) = dest.pixel_mut(x, y) {
                let out = blend(mode, [px[0], px[1], px[2], px[3]], src, 255);
                px.copy_from_slice(&out);
            }
        }
    }
}

/// Top-left corner that centers `bitmap` on `center`.
pub fn centered_origin(center: Point2D, bitmap: &PixelBuffer) -> Point2D {
    Point2D::new(
        center.x.saturating_sub((bitmap.width() / 2) as i32),
        center.y.saturating_sub((bitmap.height() / 2) as i32),
    )
}

fn composite_mask(
    dest: &mut PixelBuffer,
    region: PixelRect,
    color: ColorRgba,
    mask: &SectorMask,
    mode: BlendMode,
) {
    let area = region.intersect(mask.bounds()).intersect(dest.bounds());
    let src = color.to_premul();
    for y in area.y0..area.y1 {
        for x in area.x0..area.x1 {
            let coverage = coverage_to_u8(mask.coverage(x, y));
            if coverage == 0 {
                continue;
            }
            if let Some(px) = dest.pixel_mut(x, y) {
                let out = blend(mode, [px[0], px[1], px[2], px[3]], src, coverage);
                px.copy_from_slice(&out);
            }
        }
    }
}

fn composite_bitmap(
    dest: &mut PixelBuffer,
    region: PixelRect,
    bitmap: &PixelBuffer,
    origin: Point2D,
    mode: BlendMode,
) {
    let footprint = PixelRect::at(origin, bitmap.width(), bitmap.height());
    let area = region.intersect(footprint).intersect(dest.bounds());
    for y in area.y0..area.y1 {
        for x in area.x0..area.x1 {
            let Some(src) = bitmap.pixel(x - origin.x, y - origin.y) else {
                continue;
            };
            if let Some(px) = dest.pixel_mut(x, y) {
                let out = blend(mode, [px[0], px[1], px[2], px[3]], src, 255);
                px.copy_from_slice(&out);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/draw.rs"]
mod tests;
