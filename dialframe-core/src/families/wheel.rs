use std::f64::consts::PI;

use crate::assets::overlay::OverlayDir;
use crate::composite::blend::BlendMode;
use crate::composite::draw::{centered_origin, draw_bitmap, fill_mask};
use crate::encode::codec::Encoding;
use crate::encode::sink::SequenceConfig;
use crate::families::{FamilyContext, Segment, check_positive};
use crate::foundation::core::{Canvas, ColorRgba, FrameRange, FrameSpec, Point2D};
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::geometry::sector::SectorParams;
use crate::render::buffer::PixelBuffer;
use crate::sequence::driver::{RunSummary, write_sequence};
use crate::sequence::pattern::OutputPattern;

/// Category selector: a ring of colored segments, one per frame, with the active segment
/// widened into a full wedge.
///
/// Frames are numbered `1..=palette.len()` and the frame number is the active segment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Frame size.
    pub canvas: Canvas,
    /// One color per segment.
    pub palette: Vec<ColorRgba>,
    /// Angular slots in a full turn; each segment takes one.
    pub slots: u32,
    /// Slot offset of segment 0; segment `j` sits in slot `(offset - j) mod slots`.
    pub offset: u32,
    /// Outer radius of every segment.
    pub outer_radius: f64,
    /// Inner radius of inactive segments.
    pub inner_radius: f64,
    /// Radius of the hub disc painted over the center.
    pub hub_radius: f64,
    /// Hub color.
    pub hub_color: ColorRgba,
    /// Distance of the icon center from the wheel center.
    pub icon_radius: f64,
    /// Overlay template (one `%d` for the active segment) relative to the asset root.
    pub icons: Option<String>,
    /// Output container.
    pub encoding: Encoding,
    /// Output template relative to the output root.
    pub output: String,
}

impl Default for WheelConfig {
    fn default() -> Self {
        let lime = ColorRgba::rgb(0x99, 0xCC, 0x00);
        Self {
            canvas: Canvas::new(128, 128),
            palette: vec![
                lime,
                lime,
                lime,
                lime,
                ColorRgba::rgb(0xCC, 0xCC, 0xCC),
                ColorRgba::rgb(0x66, 0x66, 0x99),
            ],
            slots: 8,
            offset: 9,
            outer_radius: 64.0,
            inner_radius: 60.0,
            hub_radius: 16.0,
            hub_color: ColorRgba::rgb(0x99, 0x99, 0x99),
            icon_radius: 48.0,
            icons: Some("theme_icon_%d.png".to_owned()),
            encoding: Encoding::Png,
            output: "theme1/theme/theme_%d.png".to_owned(),
        }
    }
}

/// Geometry of one wheel frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelParams {
    /// Segments in palette order, painted with [`BlendMode::Over`].
    pub segments: Vec<Segment>,
    /// Hub disc painted after the segments.
    pub hub: SectorParams,
    /// Where the active segment's icon is centered.
    pub icon_center: Point2D,
}

impl WheelConfig {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.canvas.validate("wheel")?;
        if self.palette.is_empty() {
            return Err(DialframeError::config("wheel.palette must not be empty"));
        }
        if self.slots < 2 || self.palette.len() > self.slots as usize {
            return Err(DialframeError::config(format!(
                "wheel.slots {} must be at least 2 and hold all {} segments",
                self.slots,
                self.palette.len()
            )));
        }
        check_positive("wheel.outer_radius", self.outer_radius)?;
        check_positive("wheel.hub_radius", self.hub_radius)?;
        if !(0.0..self.outer_radius).contains(&self.inner_radius) {
            return Err(DialframeError::config(format!(
                "wheel.inner_radius {} must be in [0, {})",
                self.inner_radius, self.outer_radius
            )));
        }
        if !self.icon_radius.is_finite() {
            return Err(DialframeError::config("wheel.icon_radius must be finite"));
        }
        if let Some(icons) = &self.icons {
            OutputPattern::parse(icons.as_str())?.check(self.range()?)?;
        }
        self.encoding.validate()
    }

    fn range(&self) -> DialframeResult<FrameRange> {
        FrameRange::new(1, self.palette.len() as u32)
    }

    /// Start, middle and end angle of segment `j` (1-based).
    pub fn segment_angles(&self, j: u32) -> (f64, f64, f64) {
        let slots = i64::from(self.slots.max(2));
        let pos = (i64::from(self.offset) - i64::from(j)).rem_euclid(slots) as f64;
        let half = slots as f64 / 2.0;
        let at = |p: f64| (p - half) / half * PI;
        (at(pos), at(pos + 0.5), at(pos + 1.0))
    }

    /// Segments, hub and icon position for `frame`.
    pub fn params(&self, frame: FrameSpec, center: Point2D) -> WheelParams {
        let active = frame.index;
        let segments = (1..=self.palette.len() as u32)
            .zip(&self.palette)
            .map(|(j, &color)| {
                let (start, _, end) = self.segment_angles(j);
                Segment {
                    sector: SectorParams {
                        center,
                        inner_radius: if j == active { 0.0 } else { self.inner_radius },
                        outer_radius: self.outer_radius,
                        inner_alpha: 0.0,
                        outer_alpha: 1.0,
                        angle_start: start,
                        angle_end: end,
                    },
                    color,
                }
            })
            .collect();

        let (_, mid, _) = self.segment_angles(active);
        let icon_center = Point2D::new(
            center.x + (mid.cos() * self.icon_radius).round() as i32,
            center.y - (mid.sin() * self.icon_radius).round() as i32,
        );

        WheelParams {
            segments,
            hub: SectorParams::disc(center, self.hub_radius),
            icon_center,
        }
    }

    /// Draw `frame` into a blank buffer, with `icon` centered on the active segment.
    pub fn draw(
        &self,
        frame: FrameSpec,
        buf: &mut PixelBuffer,
        icon: Option<&PixelBuffer>,
    ) -> DialframeResult<()> {
        let p = self.params(frame, buf.canvas().center());
        for seg in &p.segments {
            fill_mask(buf, seg.color, &seg.sector.build()?, BlendMode::Over);
        }
        fill_mask(buf, self.hub_color, &p.hub.build()?, BlendMode::Over);
        if let Some(icon) = icon {
            draw_bitmap(buf, icon, centered_origin(p.icon_center, icon), BlendMode::Over);
        }
        Ok(())
    }

    fn load_icon(
        &self,
        assets: Option<&OverlayDir>,
        active: u32,
    ) -> DialframeResult<Option<PixelBuffer>> {
        let (Some(template), Some(assets)) = (&self.icons, assets) else {
            return Ok(None);
        };
        let name = OutputPattern::parse(template.as_str())?.render(active);
        assets.load(&name).map(Some)
    }

    /// Render one frame per segment.
    ///
    /// Icons are drawn only when the context has an asset directory.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        if self.icons.is_some() && ctx.assets.is_none() {
            tracing::warn!("no asset directory; drawing the wheel without icons");
        }
        let seq = SequenceConfig {
            canvas: self.canvas,
            range: self.range()?,
            encoding: self.encoding,
        };
        write_sequence(&ctx.output(&self.output)?, &seq, |f, b| {
            let icon = self.load_icon(ctx.assets, f.index)?;
            self.draw(f, b, icon.as_ref())
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/families/wheel.rs"]
mod tests;
