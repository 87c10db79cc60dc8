use std::f64::consts::PI;

use crate::composite::blend::BlendMode;
use crate::composite::draw::fill_mask;
use crate::encode::codec::Encoding;
use crate::encode::sink::SequenceConfig;
use crate::families::{FamilyContext, MIN_VISIBLE_RADIUS, check_frames, check_positive};
use crate::foundation::core::{Canvas, ColorRgba, FrameRange, FrameSpec};
use crate::foundation::error::DialframeResult;
use crate::geometry::sector::SectorMask;
use crate::render::buffer::PixelBuffer;
use crate::sequence::driver::{RunSummary, write_sequence};

/// One solid disc around the canvas center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscParams {
    /// Radius in pixels.
    pub radius: f64,
    /// Fill color.
    pub color: ColorRgba,
}

fn draw_discs(
    buf: &mut PixelBuffer,
    discs: &[DiscParams],
    mode: BlendMode,
) -> DialframeResult<()> {
    let center = buf.canvas().center();
    for disc in discs.iter().filter(|d| d.radius >= MIN_VISIBLE_RADIUS) {
        let mask = SectorMask::disc(center, disc.radius)?;
        fill_mask(buf, disc.color, &mask, mode);
    }
    Ok(())
}

fn zero_based(frames: u32) -> DialframeResult<FrameRange> {
    FrameRange::new(0, frames.saturating_sub(1))
}

/// Growing concentric rings for the boot sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BootRingsConfig {
    /// Frame size.
    pub canvas: Canvas,
    /// Number of frames.
    pub frames: u32,
    /// Radius of the outermost ring in the last frame.
    pub radius: f64,
    /// Color of the innermost rings.
    pub dim: ColorRgba,
    /// Color of the outermost ring.
    pub bright: ColorRgba,
    /// Output container.
    pub encoding: Encoding,
    /// Output template relative to the output root.
    pub output: String,
}

impl Default for BootRingsConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(320, 240),
            frames: 46,
            radius: 333.0,
            dim: ColorRgba::rgb(0x09, 0x0F, 0x00),
            bright: ColorRgba::rgb(0x99, 0xFF, 0x00),
            encoding: Encoding::Jpeg { quality: 10 },
            output: "boot_animation/boot%d.jpg".to_owned(),
        }
    }
}

impl BootRingsConfig {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.canvas.validate("boot_rings")?;
        check_frames("boot_rings", self.frames)?;
        check_positive("boot_rings.radius", self.radius)?;
        self.encoding.validate()
    }

    /// Rings for `frame`, outermost first.
    ///
    /// Frame `k` of `n` holds `k + 1` rings; ring `c` has radius `radius * (k + 1 - c) / n` and
    /// fades from `bright` toward `dim` as `c` grows.
    pub fn params(&self, frame: FrameSpec) -> Vec<DiscParams> {
        let n = f64::from(frame.total.max(1));
        let k = frame.index;
        (0..=k)
            .map(|c| {
                let t = (i64::from(frame.total) - 2 * i64::from(c)).max(0) as f64 / n;
                DiscParams {
                    radius: self.radius * f64::from(k + 1 - c) / n,
                    color: ColorRgba::ramp(self.dim, self.bright, t),
                }
            })
            .collect()
    }

    /// Draw `frame` into a blank buffer.
    pub fn draw(&self, frame: FrameSpec, buf: &mut PixelBuffer) -> DialframeResult<()> {
        draw_discs(buf, &self.params(frame), BlendMode::Over)
    }

    /// Render the whole sequence.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        let seq = SequenceConfig {
            canvas: self.canvas,
            range: zero_based(self.frames)?,
            encoding: self.encoding,
        };
        write_sequence(&ctx.output(&self.output)?, &seq, |f, b| self.draw(f, b))
    }
}

/// A single disc shrinking to nothing for the shutdown sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Frame size.
    pub canvas: Canvas,
    /// Number of frames.
    pub frames: u32,
    /// Radius the disc shrinks from.
    pub radius: f64,
    /// Color as the disc vanishes.
    pub dim: ColorRgba,
    /// Color at full size.
    pub bright: ColorRgba,
    /// Output container.
    pub encoding: Encoding,
    /// Output template relative to the output root.
    pub output: String,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(320, 240),
            frames: 18,
            radius: 120.0,
            dim: ColorRgba::rgb(0x09, 0x0F, 0x00),
            bright: ColorRgba::rgb(0x99, 0xFF, 0x00),
            encoding: Encoding::Jpeg { quality: 10 },
            output: "boot_animation/shutdown%d.jpg".to_owned(),
        }
    }
}

impl ShutdownConfig {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.canvas.validate("shutdown")?;
        check_frames("shutdown", self.frames)?;
        check_positive("shutdown.radius", self.radius)?;
        self.encoding.validate()
    }

    /// Disc for `frame`; the last frame has radius zero.
    pub fn params(&self, frame: FrameSpec) -> DiscParams {
        let n = f64::from(frame.total.max(1));
        let f = f64::from(frame.total.saturating_sub(frame.index + 1)) / n;
        DiscParams {
            radius: self.radius * f,
            color: ColorRgba::ramp(self.dim, self.bright, f),
        }
    }

    /// Draw `frame` into a blank buffer.
    pub fn draw(&self, frame: FrameSpec, buf: &mut PixelBuffer) -> DialframeResult<()> {
        draw_discs(buf, &[self.params(frame)], BlendMode::Replace)
    }

    /// Render the whole sequence.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        let seq = SequenceConfig {
            canvas: self.canvas,
            range: zero_based(self.frames)?,
            encoding: self.encoding,
        };
        write_sequence(&ctx.output(&self.output)?, &seq, |f, b| self.draw(f, b))
    }
}

/// A small disc that swells and collapses once per loop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Frame size.
    pub canvas: Canvas,
    /// Number of frames.
    pub frames: u32,
    /// Peak radius.
    pub radius: f64,
    /// Fill color.
    pub color: ColorRgba,
    /// Output container.
    pub encoding: Encoding,
    /// Output template relative to the output root.
    pub output: String,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(16, 16),
            frames: 12,
            radius: 8.0,
            color: ColorRgba::rgb(0x99, 0xFF, 0x00),
            encoding: Encoding::Png,
            output: "theme1/music_update/%02d.png".to_owned(),
        }
    }
}

impl PulseConfig {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.canvas.validate("pulse")?;
        check_frames("pulse", self.frames)?;
        check_positive("pulse.radius", self.radius)?;
        self.encoding.validate()
    }

    /// Disc for `frame`: `radius * sin((k + 1) / n * PI)`.
    pub fn params(&self, frame: FrameSpec) -> DiscParams {
        let n = f64::from(frame.total.max(1));
        let phase = f64::from(frame.index + 1) / n * PI;
        DiscParams {
            radius: (self.radius * phase.sin()).max(0.0),
            color: self.color,
        }
    }

    /// Draw `frame` into a blank buffer.
    pub fn draw(&self, frame: FrameSpec, buf: &mut PixelBuffer) -> DialframeResult<()> {
        draw_discs(buf, &[self.params(frame)], BlendMode::Replace)
    }

    /// Render the whole sequence.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        let seq = SequenceConfig {
            canvas: self.canvas,
            range: zero_based(self.frames)?,
            encoding: self.encoding,
        };
        write_sequence(&ctx.output(&self.output)?, &seq, |f, b| self.draw(f, b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/families/rings.rs"]
mod tests;
