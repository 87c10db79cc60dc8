use crate::composite::blend::BlendMode;
use crate::composite::draw::fill_mask;
use crate::encode::codec::Encoding;
use crate::encode::sink::SequenceConfig;
use crate::families::{FamilyContext, Segment, check_positive, with_name};
use crate::foundation::core::{Canvas, ColorRgba, FrameRange, Point2D};
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::foundation::math::{turns_to_radians, wrap_angle};
use crate::geometry::sector::SectorParams;
use crate::render::buffer::PixelBuffer;
use crate::sequence::driver::{RunSummary, write_sequence};

/// Second color ramp used for the last steps of a gauge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GaugeWarning {
    /// First step drawn in warning colors.
    pub from_step: u32,
    /// Steps over which the warning ramp runs from `bright` to `dim`.
    pub span: u32,
    /// Color at the end of the ramp.
    pub dim: ColorRgba,
    /// Color at `from_step`.
    pub bright: ColorRgba,
}

/// Single-frame dial made of `steps` thin sectors laid out clockwise.
///
/// Step `j` spans from `start_turn - sweep_turns * (j + phase + 1) / steps` to
/// `start_turn - sweep_turns * (j + phase) / steps`, in turns.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    /// Frame size.
    pub canvas: Canvas,
    /// Outer radius of every step.
    pub outer_radius: f64,
    /// Inner radius of step 0.
    pub inner_radius: f64,
    /// How much the inner radius shrinks over a full gauge.
    pub taper: f64,
    /// Steps in a full gauge.
    pub steps: u32,
    /// First step drawn.
    pub first_segment: u32,
    /// Where the gauge starts, in turns counter-clockwise from 3 o'clock.
    pub start_turn: f64,
    /// Turns covered by a full gauge.
    pub sweep_turns: f64,
    /// Step offset applied to every segment.
    pub phase: f64,
    /// Base color.
    pub color: ColorRgba,
    /// Step drawn at full base color.
    pub ramp_anchor: f64,
    /// Brightness lost per step before the anchor.
    pub ramp_slope: f64,
    /// Optional warning ramp for the last steps.
    pub warning: Option<GaugeWarning>,
    /// Output container.
    pub encoding: Encoding,
    /// Output path relative to the output root.
    pub output: String,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::volume()
    }
}

impl GaugeConfig {
    /// Full-circle volume dial with a warning ramp past step 100.
    pub fn volume() -> Self {
        Self {
            canvas: Canvas::new(118, 118),
            outer_radius: 59.0,
            inner_radius: 44.4,
            taper: 0.0,
            steps: 120,
            first_segment: 0,
            start_turn: 0.25,
            sweep_turns: 1.0,
            phase: -1.0,
            color: ColorRgba::rgb(0x99, 0xFF, 0x00),
            ramp_anchor: 99.0,
            ramp_slope: 0.004,
            warning: Some(GaugeWarning {
                from_step: 100,
                span: 20,
                dim: ColorRgba::rgb(0xFF, 0x00, 0x34),
                bright: ColorRgba::rgb(0xFF, 0x82, 0x34),
            }),
            encoding: Encoding::Png,
            output: "theme1/adjust/volume_scale_focus.png".to_owned(),
        }
    }

    /// Tapered 0.7-turn scale dial; `output` carries a `{name}` token.
    pub fn scale() -> Self {
        Self {
            canvas: Canvas::new(122, 122),
            outer_radius: 56.0,
            inner_radius: 52.0,
            taper: 8.0,
            steps: 120,
            first_segment: 1,
            start_turn: -0.4,
            sweep_turns: 0.7,
            phase: 0.0,
            color: ColorRgba::rgb(0x99, 0xFF, 0x00),
            ramp_anchor: 120.0,
            ramp_slope: 0.004,
            warning: None,
            encoding: Encoding::Png,
            output: "theme1/adjust/{name}_scale_focus.png".to_owned(),
        }
    }

    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.canvas.validate("gauge")?;
        if self.steps == 0 || self.first_segment >= self.steps {
            return Err(DialframeError::config(format!(
                "gauge.first_segment {} must be below steps {}",
                self.first_segment, self.steps
            )));
        }
        check_positive("gauge.outer_radius", self.outer_radius)?;
        let innermost = self.inner_radius - self.taper;
        if !self.inner_radius.is_finite()
            || !self.taper.is_finite()
            || innermost < 0.0
            || self.inner_radius >= self.outer_radius
        {
            return Err(DialframeError::config(format!(
                "gauge.inner_radius {} with taper {} must stay within [0, {})",
                self.inner_radius, self.taper, self.outer_radius
            )));
        }
        let sweep = self.sweep_turns.abs();
        if sweep.is_nan() || sweep == 0.0 || sweep > 1.0 {
            return Err(DialframeError::config(format!(
                "gauge.sweep_turns must be in (0, 1] by magnitude, got {}",
                self.sweep_turns
            )));
        }
        for (name, v) in [
            ("start_turn", self.start_turn),
            ("phase", self.phase),
            ("ramp_anchor", self.ramp_anchor),
            ("ramp_slope", self.ramp_slope),
        ] {
            if !v.is_finite() {
                return Err(DialframeError::config(format!("gauge.{name} must be finite")));
            }
        }
        if let Some(w) = &self.warning
            && w.span == 0
        {
            return Err(DialframeError::config("gauge.warning.span must be at least 1"));
        }
        self.encoding.validate()
    }

    /// Color of step `j`.
    pub fn step_color(&self, j: u32) -> ColorRgba {
        match &self.warning {
            Some(w) if j >= w.from_step => {
                let c = 1.0 - f64::from(j - w.from_step) / f64::from(w.span);
                ColorRgba::ramp(w.dim, w.bright, c)
            }
            _ => {
                let c = 1.0 - (self.ramp_anchor - f64::from(j)) * self.ramp_slope;
                ColorRgba::ramp(ColorRgba::BLACK, self.color, c)
            }
        }
    }

    /// Sector for step `j`, angles wrapped into `[-PI, PI]`.
    pub fn step_sector(&self, j: u32, center: Point2D) -> SectorParams {
        let steps = f64::from(self.steps.max(1));
        let j = f64::from(j);
        let turn = |k: f64| {
            wrap_angle(turns_to_radians(
                self.start_turn - self.sweep_turns * k / steps,
            ))
        };
        SectorParams {
            center,
            inner_radius: self.inner_radius - self.taper * j / steps,
            outer_radius: self.outer_radius,
            inner_alpha: 1.0,
            outer_alpha: 1.0,
            angle_start: turn(j + self.phase + 1.0),
            angle_end: turn(j + self.phase),
        }
    }

    /// Every step in drawing order.
    pub fn params(&self, center: Point2D) -> Vec<Segment> {
        (self.first_segment..self.steps)
            .map(|j| Segment {
                sector: self.step_sector(j, center),
                color: self.step_color(j),
            })
            .collect()
    }

    /// Draw the gauge into a blank buffer.
    pub fn draw(&self, buf: &mut PixelBuffer) -> DialframeResult<()> {
        for seg in self.params(buf.canvas().center()) {
            fill_mask(buf, seg.color, &seg.sector.build()?, BlendMode::Over);
        }
        Ok(())
    }

    /// Render the gauge to `output` with `{name}` replaced by `name`.
    pub fn render_named(
        &self,
        ctx: &FamilyContext<'_>,
        name: &str,
    ) -> DialframeResult<RunSummary> {
        self.validate()?;
        let seq = SequenceConfig {
            canvas: self.canvas,
            range: FrameRange::single(0),
            encoding: self.encoding,
        };
        let pattern = ctx.output(&with_name(&self.output, name))?;
        write_sequence(&pattern, &seq, |_, b| self.draw(b))
    }

    /// Render the gauge once.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.render_named(ctx, "")
    }
}

/// The same gauge rendered under several names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScaleDials {
    /// Shared dial settings; its `output` should contain `{name}`. Fields left out of a
    /// partial object keep their [`GaugeConfig::scale`] values.
    #[serde(deserialize_with = "scale_gauge_over_preset")]
    pub gauge: GaugeConfig,
    /// One output per name.
    pub names: Vec<String>,
}

impl Default for ScaleDials {
    fn default() -> Self {
        Self {
            gauge: GaugeConfig::scale(),
            names: ["maxvol", "blktime", "savetime", "sleeptime"]
                .map(str::to_owned)
                .to_vec(),
        }
    }
}

impl ScaleDials {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.gauge.validate()?;
        if self.names.len() > 1 && !self.gauge.output.contains("{name}") {
            return Err(DialframeError::config(
                "scales.gauge.output needs a {name} token for several names",
            ));
        }
        Ok(())
    }

    /// Render one dial per name.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        let mut summary = RunSummary::default();
        for name in &self.names {
            summary += self.gauge.render_named(ctx, name)?;
        }
        Ok(summary)
    }
}

fn scale_gauge_over_preset<'de, D>(deserializer: D) -> Result<GaugeConfig, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;
    use serde::de::Error as _;

    let serde_json::Value::Object(patch) = serde_json::Value::deserialize(deserializer)? else {
        return Err(D::Error::custom("scales.gauge must be an object"));
    };
    let mut merged = serde_json::to_value(GaugeConfig::scale()).map_err(D::Error::custom)?;
    if let serde_json::Value::Object(base) = &mut merged {
        base.extend(patch);
    }
    serde_json::from_value(merged).map_err(D::Error::custom)
}

#[cfg(test)]
#[path = "../../tests/unit/families/gauge.rs"]
mod tests;
