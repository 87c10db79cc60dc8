use std::f64::consts::FRAC_PI_2;

use kurbo::{Point, Vec2};

use crate::assets::overlay::{ResampleFilter, resize_bitmap};
use crate::composite::blend::BlendMode;
use crate::composite::draw::{centered_origin, draw_bitmap};
use crate::encode::codec::Encoding;
use crate::encode::sink::SequenceConfig;
use crate::families::FamilyContext;
use crate::foundation::core::{Canvas, FrameRange, FrameSpec, Point2D};
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::render::buffer::PixelBuffer;
use crate::sequence::driver::{RunSummary, write_sequence};
use crate::sequence::link::{link_frames, reverse_stride_pairs};

/// Path followed by the glyph center.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SweepPath {
    /// Quarter-ellipse from `start` to `end`, entering `start` at `start_angle` radians.
    Through {
        /// Glyph center in the first frame.
        start: Point2D,
        /// Glyph center in the last frame.
        end: Point2D,
        /// Parameter angle at `start`; the arc ends at angle `PI / 2`.
        start_angle: f64,
    },
    /// Explicit ellipse arc `center + (rx cos t, -ry sin t)` for `t` from `from_angle` to
    /// `to_angle`.
    Ellipse {
        /// Ellipse center in pixels.
        center: [f64; 2],
        /// Horizontal and vertical radius.
        radii: [f64; 2],
        /// Parameter angle in the first frame.
        from_angle: f64,
        /// Parameter angle in the last frame.
        to_angle: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EllipseArc {
    center: Point,
    radii: Vec2,
    from: f64,
    to: f64,
}

impl EllipseArc {
    fn through(start: Point2D, end: Point2D, start_angle: f64) -> DialframeResult<Self> {
        let (sin, cos) = start_angle.sin_cos();
        if (1.0 - sin).abs() < 1e-9 || cos.abs() < 1e-9 {
            return Err(DialframeError::config(format!(
                "sweep start_angle {start_angle} gives a degenerate arc"
            )));
        }
        let start = Point::new(f64::from(start.x), f64::from(start.y));
        let end = Point::new(f64::from(end.x), f64::from(end.y));
        let d = end - start;
        let rx = d.x / (1.0 - sin);
        let ry = d.y / cos;
        Ok(Self {
            center: Point::new(end.x - rx, end.y),
            radii: Vec2::new(rx, ry),
            from: FRAC_PI_2 - start_angle,
            to: 0.0,
        })
    }

    fn point_at(&self, t: f64) -> Point {
        let theta = self.from + (self.to - self.from) * t;
        let (sin, cos) = theta.sin_cos();
        self.center + Vec2::new(self.radii.x * cos, -self.radii.y * sin)
    }
}

impl SweepPath {
    fn arc(&self) -> DialframeResult<EllipseArc> {
        match *self {
            Self::Through {
                start,
                end,
                start_angle,
            } => EllipseArc::through(start, end, start_angle),
            Self::Ellipse {
                center,
                radii,
                from_angle,
                to_angle,
            } => Ok(EllipseArc {
                center: Point::new(center[0], center[1]),
                radii: Vec2::new(radii[0], radii[1]),
                from: from_angle,
                to: to_angle,
            }),
        }
    }
}

/// One sequence frame written again as a standalone still.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepStill {
    /// Frame index to copy.
    pub frame: u32,
    /// Output path relative to the output root.
    pub output: String,
}

/// Sequence of hard links back into the rendered frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepLinks {
    /// Output template relative to the output root.
    pub output: String,
    /// Last linked index; linked frame `i` shows frame `(last - i) * step`.
    pub last: u32,
    /// Stride through the rendered frames.
    pub step: u32,
}

/// Boot sequence of a glyph that grows while sliding along an elliptical arc.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Frame size.
    pub canvas: Canvas,
    /// Number of frames.
    pub frames: u32,
    /// Glyph overlay, relative to the asset root.
    pub glyph: String,
    /// Path of the glyph center.
    pub path: SweepPath,
    /// Glyph width in the first frame.
    pub width_start: u32,
    /// Glyph width in the last frame.
    pub width_end: u32,
    /// Kernel used to scale the glyph.
    pub filter: ResampleFilter,
    /// Output container of the sequence.
    pub encoding: Encoding,
    /// Output template relative to the output root.
    pub output: String,
    /// Optional still copy of one frame, written as PNG.
    pub still: Option<SweepStill>,
    /// Optional reversed sequence made of hard links.
    pub links: Option<SweepLinks>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(320, 240),
            frames: 46,
            glyph: "circle.png".to_owned(),
            path: SweepPath::Through {
                start: Point2D::new(-9, 58),
                end: Point2D::new(160, 350),
                start_angle: 0.5,
            },
            width_start: 40,
            width_end: 500,
            filter: ResampleFilter::Nearest,
            encoding: Encoding::Jpeg { quality: 50 },
            output: "boot_animation/boot%d.jpg".to_owned(),
            still: Some(SweepStill {
                frame: 45,
                output: "theme1/launcher/circle.png".to_owned(),
            }),
            links: Some(SweepLinks {
                output: "boot_animation/shutdown%d.jpg".to_owned(),
                last: 17,
                step: 2,
            }),
        }
    }
}

/// Glyph placement for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepParams {
    /// Glyph center.
    pub center: Point2D,
    /// Scaled glyph width; the height follows the glyph's aspect ratio.
    pub width: u32,
}

impl SweepConfig {
    /// The earlier sweep: explicit ellipse, Catmull-Rom scaling, a different glyph.
    pub fn halo() -> Self {
        Self {
            glyph: "circle_source.png".to_owned(),
            path: SweepPath::Ellipse {
                center: [6.0, 370.0],
                radii: [160.0, 320.0],
                from_angle: FRAC_PI_2,
                to_angle: 0.0,
            },
            width_start: 24,
            width_end: 504,
            filter: ResampleFilter::CatmullRom,
            ..Self::default()
        }
    }

    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.canvas.validate("sweep")?;
        if self.frames < 2 {
            return Err(DialframeError::config("sweep.frames must be at least 2"));
        }
        if self.width_start == 0 || self.width_end == 0 {
            return Err(DialframeError::config("sweep glyph widths must be non-zero"));
        }
        let arc = self.path.arc()?;
        let values = [arc.center.x, arc.center.y, arc.radii.x, arc.radii.y, arc.from, arc.to];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DialframeError::config("sweep path must be finite"));
        }
        let limit = f64::from(i32::MAX);
        let reach = [
            arc.center.x.abs() + arc.radii.x.abs(),
            arc.center.y.abs() + arc.radii.y.abs(),
        ];
        if reach.iter().any(|r| *r > limit) {
            return Err(DialframeError::config(format!(
                "sweep path reaches {}x{} pixels from the origin, outside the pixel grid",
                reach[0], reach[1]
            )));
        }
        if let Some(still) = &self.still
            && still.frame >= self.frames
        {
            return Err(DialframeError::config(format!(
                "sweep.still.frame {} is past the last frame {}",
                still.frame,
                self.frames - 1
            )));
        }
        if let Some(links) = &self.links
            && u64::from(links.last) * u64::from(links.step) >= u64::from(self.frames)
        {
            return Err(DialframeError::config(format!(
                "sweep.links reach frame {} but only {} frames are rendered",
                u64::from(links.last) * u64::from(links.step),
                self.frames
            )));
        }
        self.encoding.validate()
    }

    /// Glyph center and width for frame `index`.
    pub fn params(&self, index: u32) -> DialframeResult<SweepParams> {
        let t = f64::from(index) / f64::from(self.frames.saturating_sub(1).max(1));
        let p = self.path.arc()?.point_at(t).round();
        let grow = (f64::from(self.width_end) - f64::from(self.width_start)) * t;
        let width = (i64::from(self.width_start) + grow.trunc() as i64).max(1);
        Ok(SweepParams {
            center: Point2D::new(p.x as i32, p.y as i32),
            width: u32::try_from(width).unwrap_or(u32::MAX),
        })
    }

    /// Draw frame `index` with `glyph` into a blank buffer.
    pub fn draw(
        &self,
        index: u32,
        buf: &mut PixelBuffer,
        glyph: &PixelBuffer,
    ) -> DialframeResult<()> {
        let p = self.params(index)?;
        let scaled = resize_bitmap(glyph, p.width, 0, self.filter)?;
        draw_bitmap(buf, &scaled, centered_origin(p.center, &scaled), BlendMode::Over);
        Ok(())
    }

    /// Render the sequence, then the still, then the links.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        let glyph = ctx.require_assets("sweep")?.load(&self.glyph)?;
        let draw = |f: FrameSpec, b: &mut PixelBuffer| self.draw(f.index, b, &glyph);

        let boot = ctx.output(&self.output)?;
        let seq = SequenceConfig {
            canvas: self.canvas,
            range: FrameRange::new(0, self.frames - 1)?,
            encoding: self.encoding,
        };
        let mut summary = write_sequence(&boot, &seq, draw)?;

        if let Some(still) = &self.still {
            let seq = SequenceConfig {
                canvas: self.canvas,
                range: FrameRange::single(still.frame),
                encoding: Encoding::Png,
            };
            summary += write_sequence(&ctx.output(&still.output)?, &seq, draw)?;
        }

        if let Some(links) = &self.links {
            let dst = ctx.output(&links.output)?;
            dst.check(FrameRange::new(0, links.last)?)?;
            summary += link_frames(&boot, &dst, reverse_stride_pairs(links.last, links.step))?;
        }
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/families/sweep.rs"]
mod tests;
