//! Animation families.
//!
//! Each family pairs a serde-configurable parameter struct with a pure per-frame parameter
//! function and a draw function that the sequence driver calls once per frame.

pub(crate) mod gauge;
pub(crate) mod launcher;
pub(crate) mod rings;
pub(crate) mod spinner;
pub(crate) mod sweep;
pub(crate) mod wheel;

use std::path::Path;

use crate::assets::overlay::OverlayDir;
use crate::foundation::core::ColorRgba;
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::geometry::sector::SectorParams;
use crate::sequence::pattern::OutputPattern;

/// Discs smaller than this are not drawn.
pub const MIN_VISIBLE_RADIUS: f64 = 0.5;

/// One colored sector of a wheel or gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Shape of the segment.
    pub sector: SectorParams,
    /// Fill color.
    pub color: ColorRgba,
}

/// Where a family writes its frames and reads its overlays.
#[derive(Clone, Copy, Debug)]
pub struct FamilyContext<'a> {
    /// Root of the generated output tree.
    pub out_root: &'a Path,
    /// Overlay source directory, when one was supplied.
    pub assets: Option<&'a OverlayDir>,
}

impl<'a> FamilyContext<'a> {
    /// Context writing under `out_root`.
    pub fn new(out_root: &'a Path, assets: Option<&'a OverlayDir>) -> Self {
        Self { out_root, assets }
    }

    /// Parse an output template and anchor it under the output root.
    pub fn output(&self, rel: &str) -> DialframeResult<OutputPattern> {
        Ok(OutputPattern::parse(rel)?.under(self.out_root))
    }

    pub(crate) fn require_assets(&self, family: &str) -> DialframeResult<&'a OverlayDir> {
        self.assets.ok_or_else(|| {
            DialframeError::config(format!("{family} needs an asset directory for its overlays"))
        })
    }
}

/// Substitute `name` for every `{name}` token in `template`.
pub fn with_name(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

pub(crate) fn check_positive(what: &str, v: f64) -> DialframeResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(DialframeError::config(format!(
            "{what} must be a positive number, got {v}"
        )));
    }
    Ok(())
}

pub(crate) fn check_frames(what: &str, frames: u32) -> DialframeResult<()> {
    if frames == 0 {
        return Err(DialframeError::config(format!("{what}.frames must be at least 1")));
    }
    Ok(())
}
