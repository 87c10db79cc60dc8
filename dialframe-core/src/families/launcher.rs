use std::borrow::Cow;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::assets::overlay::{OverlayDir, two_tone};
use crate::composite::blend::BlendMode;
use crate::composite::draw::{draw_bitmap, fill_mask, fill_rect};
use crate::encode::codec::Encoding;
use crate::encode::sink::SequenceConfig;
use crate::families::{FamilyContext, check_positive, with_name};
use crate::foundation::core::{Canvas, ColorRgba, FrameRange, PixelRect, Point2D};
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::geometry::sector::SectorParams;
use crate::render::buffer::PixelBuffer;
use crate::sequence::driver::{RunSummary, write_sequence};

/// How launcher icons are decorated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum LauncherConfig {
    /// Radial glow behind each icon.
    Halo(HaloConfig),
    /// Rounded frame around each icon.
    Outline(OutlineConfig),
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::Outline(OutlineConfig::default())
    }
}

impl LauncherConfig {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        match self {
            Self::Halo(cfg) => cfg.validate(),
            Self::Outline(cfg) => cfg.validate(),
        }
    }

    /// Render every decorated icon.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        match self {
            Self::Halo(cfg) => cfg.render(ctx),
            Self::Outline(cfg) => cfg.render(ctx),
        }
    }
}

fn launcher_names() -> Vec<String> {
    ["playing", "category", "explorer", "play_set", "sys_set"]
        .map(str::to_owned)
        .to_vec()
}

fn check_name_token(what: &str, names: &[String], template: &str) -> DialframeResult<()> {
    if names.len() > 1 && !template.contains("{name}") {
        return Err(DialframeError::config(format!(
            "{what} '{template}' needs a {{name}} token for several names"
        )));
    }
    Ok(())
}

fn write_still(
    ctx: &FamilyContext<'_>,
    output: &str,
    canvas: Canvas,
    mut draw: impl FnMut(&mut PixelBuffer) -> DialframeResult<()>,
) -> DialframeResult<RunSummary> {
    let seq = SequenceConfig {
        canvas,
        range: FrameRange::single(0),
        encoding: Encoding::Png,
    };
    write_sequence(&ctx.output(output)?, &seq, |_, b| draw(b))
}

/// Icon painted over a disc whose alpha falls off toward the rim.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HaloConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Halo center.
    pub center: Point2D,
    /// Halo radius.
    pub radius: f64,
    /// Halo alpha at the center.
    pub inner_alpha: f64,
    /// Halo alpha at the rim.
    pub outer_alpha: f64,
    /// Halo color.
    pub color: ColorRgba,
    /// Icon names.
    pub names: Vec<String>,
    /// Icon overlay relative to the asset root, with a `{name}` token.
    pub input: String,
    /// Output path relative to the output root, with a `{name}` token.
    pub output: String,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(56, 72),
            center: Point2D::new(28, 21),
            radius: 22.0,
            inner_alpha: 1.0,
            outer_alpha: 0.5,
            color: ColorRgba::rgb(0xE4, 0xFF, 0x78),
            names: launcher_names(),
            input: "theme1/launcher/{name}.png".to_owned(),
            output: "theme1/launcher/{name}_f.png".to_owned(),
        }
    }
}

impl HaloConfig {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.canvas.validate("halo")?;
        check_positive("halo.radius", self.radius)?;
        check_name_token("halo.input", &self.names, &self.input)?;
        check_name_token("halo.output", &self.names, &self.output)?;
        self.halo().build().map(|_| ())
    }

    /// The glow behind the icon.
    pub fn halo(&self) -> SectorParams {
        SectorParams {
            center: self.center,
            outer_radius: self.radius,
            inner_alpha: self.inner_alpha,
            outer_alpha: self.outer_alpha,
            ..SectorParams::default()
        }
    }

    /// Draw the halo, then `icon` with its top-left corner at the origin.
    pub fn draw(&self, buf: &mut PixelBuffer, icon: &PixelBuffer) -> DialframeResult<()> {
        fill_mask(buf, self.color, &self.halo().build()?, BlendMode::Replace);
        draw_bitmap(buf, icon, Point2D::new(0, 0), BlendMode::Over);
        Ok(())
    }

    /// Render one haloed icon per name.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        let assets = ctx.require_assets("halo launcher")?;
        let mut summary = RunSummary::default();
        for name in &self.names {
            let icon = assets.load(&with_name(&self.input, name))?;
            summary += write_still(ctx, &with_name(&self.output, name), self.canvas, |b| {
                self.draw(b, &icon)
            })?;
        }
        Ok(summary)
    }
}

/// One batch of outlined icons sharing margin, thickness and colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutlineJob {
    /// Icon names.
    pub names: Vec<String>,
    /// Icon overlay relative to the asset root, with a `{name}` token.
    pub input: String,
    /// Output path relative to the output root, with a `{name}` token.
    pub output: String,
    /// Gap between the image edge and the frame.
    pub margin: u32,
    /// Frame thickness; zero draws no frame.
    pub thickness: u32,
    /// When set, the icon is reduced to this color on opaque black.
    pub icon_color: Option<ColorRgba>,
    /// Frame color.
    pub outline_color: ColorRgba,
}

impl Default for OutlineJob {
    fn default() -> Self {
        Self {
            names: launcher_names(),
            input: "theme1/launcher/{name}.png".to_owned(),
            output: "theme1/launcher/{name}_f.png".to_owned(),
            margin: 0,
            thickness: 2,
            icon_color: None,
            outline_color: ColorRgba::WHITE,
        }
    }
}

/// Frame geometry for one icon size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineParams {
    /// Quarter rings in the corners: north-west, north-east, south-west, south-east.
    pub corners: [SectorParams; 4],
    /// Straight edges: north, west, east, south.
    pub bars: [PixelRect; 4],
}

impl OutlineJob {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        check_name_token("outline.input", &self.names, &self.input)?;
        check_name_token("outline.output", &self.names, &self.output)
    }

    /// Frame geometry for an icon of `width` x `height`, or `None` when there is no frame.
    pub fn params(&self, width: u32, height: u32) -> DialframeResult<Option<OutlineParams>> {
        let len = i64::from(width.min(height));
        let m = i64::from(self.margin);
        let t = i64::from(self.thickness);
        if 2 * (m + t) >= len {
            return Err(DialframeError::config(format!(
                "outline margin {m} and thickness {t} do not fit a {width}x{height} icon"
            )));
        }
        if t == 0 {
            return Ok(None);
        }

        let off = (len - 2 * m) / 5;
        let (w, h) = (i64::from(width), i64::from(height));
        let px = |v: i64| v as i32;
        let corner = |cx: i64, cy: i64, a: f64, b: f64| SectorParams {
            center: Point2D::new(px(cx), px(cy)),
            inner_radius: (off - t) as f64,
            outer_radius: off as f64,
            inner_alpha: 1.0,
            outer_alpha: 1.0,
            angle_start: a,
            angle_end: b,
        };
        let (left, top) = (m + off, m + off);
        let (right, bottom) = (w - 1 - off - m, h - 1 - off - m);

        Ok(Some(OutlineParams {
            corners: [
                corner(left, top, FRAC_PI_2, PI),
                corner(right, top, 0.0, FRAC_PI_2),
                corner(left, bottom, -PI, -FRAC_PI_2),
                corner(right, bottom, -FRAC_PI_2, 0.0),
            ],
            bars: [
                PixelRect::new(px(m + off), px(m), px(w - off - m), px(m + t)),
                PixelRect::new(px(m), px(m + off), px(m + t), px(h - off - m)),
                PixelRect::new(px(w - t - m), px(m + off), px(w - m), px(h - off - m)),
                PixelRect::new(px(m + off), px(h - t - m), px(w - off - m), px(h - m)),
            ],
        }))
    }

    /// Draw `icon` (recolored when configured) and its frame into a blank icon-sized buffer.
    pub fn draw(&self, buf: &mut PixelBuffer, icon: &PixelBuffer) -> DialframeResult<()> {
        let frame = self.params(icon.width(), icon.height())?;
        let icon = match self.icon_color {
            Some(color) => Cow::Owned(two_tone(icon, color)?),
            None => Cow::Borrowed(icon),
        };
        draw_bitmap(buf, &icon, Point2D::new(0, 0), BlendMode::Replace);
        if let Some(frame) = frame {
            for corner in frame.corners {
                fill_mask(buf, self.outline_color, &corner.build()?, BlendMode::Over);
            }
            for bar in frame.bars {
                fill_rect(buf, bar, self.outline_color, BlendMode::Over);
            }
        }
        Ok(())
    }

    fn render(
        &self,
        ctx: &FamilyContext<'_>,
        assets: &OverlayDir,
    ) -> DialframeResult<RunSummary> {
        let mut summary = RunSummary::default();
        for name in &self.names {
            let icon = assets.load(&with_name(&self.input, name))?;
            summary += write_still(ctx, &with_name(&self.output, name), icon.canvas(), |b| {
                self.draw(b, &icon)
            })?;
        }
        Ok(summary)
    }
}

/// Outlined launcher and player icons.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Jobs in rendering order.
    pub jobs: Vec<OutlineJob>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        let lime = ColorRgba::rgb(0xCC, 0xFF, 0x00);
        let playing: Vec<String> = [
            "collec",
            "collect_select_",
            "cycle",
            "order",
            "playing_menu_add",
            "random",
            "rm",
            "single",
            "single_play",
        ]
        .map(str::to_owned)
        .to_vec();
        let playing_job = |suffix: &str, margin: u32, thickness: u32| OutlineJob {
            names: playing.clone(),
            input: "playing_icon_{name}.png".to_owned(),
            output: format!("theme1/playing/{{name}}{suffix}.png"),
            margin,
            thickness,
            icon_color: Some(lime),
            outline_color: ColorRgba::WHITE,
        };
        Self {
            jobs: vec![
                OutlineJob::default(),
                playing_job("0", 0, 0),
                playing_job("1", 2, 2),
            ],
        }
    }
}

impl OutlineConfig {
    /// Reject unusable values.
    pub fn validate(&self) -> DialframeResult<()> {
        self.jobs.iter().try_for_each(OutlineJob::validate)
    }

    /// Render every job in order.
    pub fn render(&self, ctx: &FamilyContext<'_>) -> DialframeResult<RunSummary> {
        self.validate()?;
        let assets = ctx.require_assets("outline launcher")?;
        let mut summary = RunSummary::default();
        for job in &self.jobs {
            summary += job.render(ctx, assets)?;
        }
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/families/launcher.rs"]
mod tests;
