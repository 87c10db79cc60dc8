use std::f64::consts::{PI, TAU};

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Quantize a coverage value to 8 bits, rounding up so any non-zero coverage stays visible.
pub(crate) fn coverage_to_u8(alpha: f64) -> u8 {
    if alpha.is_nan() || alpha <= 0.0 {
        return 0;
    }
    (alpha.min(1.0) * 255.0).ceil() as u8
}

/// Bring an angle that overshot by less than one turn back into `[-PI, PI]`.
pub fn wrap_angle(a: f64) -> f64 {
    if a < -PI {
        a + TAU
    } else if a > PI {
        a - TAU
    } else {
        a
    }
}

pub(crate) fn turns_to_radians(turns: f64) -> f64 {
    turns * TAU
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255(u16::from(px[0]), a);
        px[1] = mul_div255(u16::from(px[1]), a);
        px[2] = mul_div255(u16::from(px[2]), a);
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
