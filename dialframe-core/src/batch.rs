//! Run every enabled family of a theme into one output tree.

use std::path::PathBuf;

use crate::assets::overlay::OverlayDir;
use crate::families::FamilyContext;
use crate::foundation::error::DialframeResult;
use crate::sequence::driver::RunSummary;
use crate::theme::{BootAnimation, BusyIndicator, Family, Theme};

/// Output and asset roots for a batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchPaths {
    /// Root of the generated tree.
    pub out_root: PathBuf,
    /// Directory overlays are read from. Families that need overlays are skipped without it.
    pub assets_root: Option<PathBuf>,
}

impl BatchPaths {
    /// Paths writing to `out_root` without overlays.
    pub fn new(out_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
            assets_root: None,
        }
    }

    /// Read overlays from `assets_root`.
    pub fn with_assets(mut self, assets_root: impl Into<PathBuf>) -> Self {
        self.assets_root = Some(assets_root.into());
        self
    }
}

/// Render one family of `theme`. Disabled families produce an empty summary.
pub fn run_family(
    theme: &Theme,
    family: Family,
    ctx: &FamilyContext<'_>,
) -> DialframeResult<RunSummary> {
    let summary = match family {
        Family::Boot => match &theme.boot {
            Some(BootAnimation::Rings { rings, shutdown }) => {
                let mut s = rings.render(ctx)?;
                s += shutdown.render(ctx)?;
                s
            }
            Some(BootAnimation::Sweep(sweep)) => sweep.render(ctx)?,
            None => RunSummary::default(),
        },
        Family::Busy => match &theme.busy {
            Some(BusyIndicator::Pulse(pulse)) => pulse.render(ctx)?,
            Some(BusyIndicator::Spinner(spinner)) => spinner.render(ctx)?,
            None => RunSummary::default(),
        },
        Family::Wheel => match &theme.wheel {
            Some(wheel) => wheel.render(ctx)?,
            None => RunSummary::default(),
        },
        Family::Volume => match &theme.volume {
            Some(volume) => volume.render(ctx)?,
            None => RunSummary::default(),
        },
        Family::Scales => match &theme.scales {
            Some(scales) => scales.render(ctx)?,
            None => RunSummary::default(),
        },
        Family::Launcher => match &theme.launcher {
            Some(launcher) => launcher.render(ctx)?,
            None => RunSummary::default(),
        },
    };
    Ok(summary)
}

/// Render every enabled family of `theme`, or only those in `only` when it is non-empty.
///
/// Families run in [`Family::ALL`] order and the first error stops the batch.
#[tracing::instrument(skip(theme), fields(out = %paths.out_root.display()))]
pub fn run_theme(
    theme: &Theme,
    paths: &BatchPaths,
    only: &[Family],
) -> DialframeResult<RunSummary> {
    theme.validate()?;
    let overlays = paths.assets_root.as_ref().map(OverlayDir::new);
    let ctx = FamilyContext::new(&paths.out_root, overlays.as_ref());

    let mut total = RunSummary::default();
    for family in Family::ALL {
        if !only.is_empty() && !only.contains(&family) {
            continue;
        }
        if !theme.is_enabled(family) {
            tracing::debug!(%family, "disabled in theme");
            continue;
        }
        if theme.needs_assets(family) && overlays.is_none() {
            tracing::warn!(%family, "skipped: no asset directory given");
            continue;
        }

        let summary = run_family(theme, family, &ctx)?;
        tracing::info!(
            %family,
            made = summary.made,
            changed = summary.changed,
            kept = summary.kept,
            linked = summary.linked,
            "family done"
        );
        total += summary;
    }
    Ok(total)
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
