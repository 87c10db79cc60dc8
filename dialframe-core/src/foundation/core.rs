use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{DialframeError, DialframeResult};

/// Integer pixel coordinate. `y` grows downward.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point2D {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point2D {
    /// Build a point from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Output frame size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas of `width` x `height` pixels.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel center, rounded toward the top-left for even sizes.
    pub fn center(self) -> Point2D {
        Point2D::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Full-canvas rectangle.
    pub fn bounds(self) -> PixelRect {
        PixelRect::from_size(self.width, self.height)
    }

    pub(crate) fn validate(self, what: &str) -> DialframeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DialframeError::config(format!(
                "{what}: canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(DialframeError::config(format!(
                "{what}: canvas {}x{} is too large",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Axis-aligned integer rectangle, `x0..x1` by `y0..y1` (max edges exclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl PixelRect {
    /// Build a rectangle from its edges.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Rectangle of `width` x `height` with its top-left corner at `origin`.
    pub fn at(origin: Point2D, width: u32, height: u32) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x.saturating_add(width as i32),
            origin.y.saturating_add(height as i32),
        )
    }

    /// Column count; zero when empty.
    pub fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0).max(0) as u32
    }

    /// Row count; zero when empty.
    pub fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0).max(0) as u32
    }

    /// `true` when the rectangle covers no pixel.
    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// `true` when pixel `(x, y)` lies inside.
    pub fn contains(self, x: i32, y: i32) -> bool {
        self.x0 <= x && x < self.x1 && self.y0 <= y && y < self.y1
    }

    /// Overlap of two rectangles. May be empty.
    pub fn intersect(self, other: Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }
}

/// Straight (not premultiplied) RGBA8 color.
///
/// Serialized as `#RRGGBB` (opaque) or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorRgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl ColorRgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplied RGBA8 bytes, rounding to nearest.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    /// Per-channel linear interpolation from `from` (`t = 0`) to `to` (`t = 1`).
    ///
    /// Every channel is rounded up to the next integer, so a ramp never loses a step to
    /// truncation. `t` is clamped to `[0, 1]`.
    pub fn ramp(from: Self, to: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let lerp = |a: u8, b: u8| -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).ceil().clamp(0.0, 255.0) as u8
        };
        Self {
            r: lerp(from.r, to.r),
            g: lerp(from.g, to.g),
            b: lerp(from.b, to.b),
            a: lerp(from.a, to.a),
        }
    }
}

impl fmt::Display for ColorRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for ColorRgba {
    type Err = DialframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map_err(DialframeError::config)
    }
}

impl Serialize for ColorRgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorRgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> Result<ColorRgba, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }
    match s.len() {
        6 => Ok(ColorRgba::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(ColorRgba::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

/// Inclusive frame index range `first..=last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame index.
    pub first: u32,
    /// Last frame index (inclusive).
    pub last: u32,
}

impl FrameRange {
    /// Build a range, rejecting `first > last`.
    pub fn new(first: u32, last: u32) -> DialframeResult<Self> {
        if first > last {
            return Err(DialframeError::config(format!(
                "frame range start {first} must be <= end {last}"
            )));
        }
        Ok(Self { first, last })
    }

    /// Range holding exactly one frame.
    pub const fn single(index: u32) -> Self {
        Self {
            first: index,
            last: index,
        }
    }

    /// Number of frames in the range.
    pub fn len_frames(self) -> u32 {
        self.last.saturating_sub(self.first).saturating_add(1)
    }

    /// `true` when `first == last`; such sequences write to a fixed file name.
    pub fn is_single(self) -> bool {
        self.first == self.last
    }

    /// Per-frame specs in rendering order.
    pub fn frames(self) -> impl Iterator<Item = FrameSpec> {
        let total = self.len_frames();
        (self.first..=self.last).map(move |index| FrameSpec { index, total })
    }
}

/// The only state threaded into an animation parameter function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameSpec {
    /// Frame index as named in the output file.
    pub index: u32,
    /// Number of frames in the sequence.
    pub total: u32,
}

impl FrameSpec {
    /// Build a frame spec.
    pub const fn new(index: u32, total: u32) -> Self {
        Self { index, total }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
