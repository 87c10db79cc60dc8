use std::f64::consts::PI;

use crate::composite::blend::BlendMode;
use crate::composite::draw::fill_mask;
use crate::encode::codec::Encoding;
use crate::encode::sink::SequenceConfig;
use crate::families::{FamilyContext, check_frames, check_positive};
use crate::foundation::core::{Canvas, ColorRgba, FrameRange, FrameSpec, Point2D};
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::geometry::sector::SectorParams;
use crate::render::buffer::PixelBuffer;
use crate::sequence::driver::{RunSummary, write_sequence};

/// Busy indicator: a solid center dot with a fading tail sweeping clockwise around it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Frame size.
    pub canvas: Canvas,
    /// Frames per revolution; the tail advances one step per frame.
    pub frames: u32,
    /// Dot and tail color.
    pub color: ColorRgba,
    /// Radius of the center dot, also the inner radius of the tail.
    pub dot_radius: f64,
    /// Outer radius of the tail.
    pub tail_radius: f64,
    /// Steps by which the tail leads frame 0.
    pub lead: u32,
    /// Angular length of the tail, in steps.
    pub span: u32,
    /// Output container.
    pub encoding: Encoding,
    /// Output template relative to the output root.
    pub output: String,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(32, 32),
            frames: 12,
            color: ColorRgba::rgb(0xFF, 0x99, 0x00),
            dot_radius: 2.0,
            tail_radius: 16.0,
            lead: 4,
            span: 4,
            encoding: Encoding::Png,
            output: "theme1/music_update/%02d.png".to_owned(),
        }
    }
}

/// Geometry of one spinner frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinnerParams {
    /// Center dot, painted with [`BlendMode::Replace`].
    pub dot: SectorParams,
    /// Fading tail, painted with [`BlendMode::Over`].
    pub tail: SectorParams,
}

impl SpinnerConfig {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.canvas.validate("spinner")?;
        check_frames("spinner", self.frames)?;
        check_positive("spinner.dot_radius", self.dot_radius)?;
        if self.tail_radius.is_nan() || self.tail_radius <= self.dot_radius {
            return Err(DialframeError::config(format!(
                "spinner.tail_radius {} must exceed dot_radius {}",
                self.tail_radius, self.dot_radius
            )));
        }
        if self.span == 0 || self.span >= self.frames {
            return Err(DialframeError::config(format!(
                "spinner.span must be in 1..{}, got {}",
                self.frames, self.span
            )));
        }
        self.encoding.validate()
    }

    /// Angle in `[-PI, PI)` of step `s` ahead of `frame`. Steps wrap every `frame.total`.
    fn step_angle(frame: FrameSpec, s: i64) -> f64 {
        let period = i64::from(frame.total.max(1));
        let pos = (s - i64::from(frame.index)).rem_euclid(period);
        let half = period as f64 / 2.0;
        (pos as f64 - half) / half * PI
    }

    /// Dot and tail for `frame`.
    pub fn params(&self, frame: FrameSpec, center: Point2D) -> SpinnerParams {
        SpinnerParams {
            dot: SectorParams::disc(center, self.dot_radius),
            tail: SectorParams {
                center,
                inner_radius: self.dot_radius,
                outer_radius: self.tail_radius,
                inner_alpha: 1.0,
                outer_alpha: 0.0,
                angle_start: Self::step_angle(frame, i64::from(self.lead)),
                angle_end: Self::step_angle(frame, i64::from(self.lead) + i64::from(self.span)),
            },
        }
    }

    /// Draw `frame` into a blank buffer.
    pub fn draw(&self, frame: FrameSpec, buf: &mut PixelBuffer) -> DialframeResult<()> {
        let p = self.params(frame, buf.canvas().center());
        fill_mask(buf, self.color, &p.dot.build()?, BlendMode::Replace);
        fill_mask(buf, self.color, &p.tail.build()?, BlendMode::Over);
        Ok(())
    }

    /// Render the whole sequence.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        let seq = SequenceConfig {
            canvas: self.canvas,
            range: FrameRange::new(0, self.frames - 1)?,
            encoding: self.encoding,
        };
        write_sequence(&ctx.output(&self.output)?, &seq, |f, b| self.draw(f, b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/families/spinner.rs"]
mod tests;
