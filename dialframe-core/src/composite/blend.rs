use crate::foundation::math::mul_div255;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// How a source pixel combines with the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Destination becomes the source scaled by coverage.
    Replace,
    /// Source scaled by coverage is composited over the destination.
    Over,
}

/// Porter-Duff "over" with an extra 8-bit coverage factor applied to `src`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }

    let cov = u16::from(coverage);
    let sa = mul_div255(u16::from(src[3]), cov);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), cov);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Source scaled by coverage; the destination is discarded.
pub fn replace(src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    let cov = u16::from(coverage);
    [
        mul_div255(u16::from(src[0]), cov),
        mul_div255(u16::from(src[1]), cov),
        mul_div255(u16::from(src[2]), cov),
        mul_div255(u16::from(src[3]), cov),
    ]
}

pub(crate) fn blend(
    mode: BlendMode,
    dst: PremulRgba8,
    src: PremulRgba8,
    coverage: u8,
) -> PremulRgba8 {
    match mode {
        BlendMode::Replace => replace(src, coverage),
        BlendMode::Over => over(dst, src, coverage),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
