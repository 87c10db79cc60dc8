//! Theme configuration: which families run and with what constants.
//!
//! Three revisions ship built in. A JSON theme file is merged over a built-in revision, so it
//! only needs to name the values it changes; `null` disables a family.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

use crate::families::gauge::{GaugeConfig, ScaleDials};
use crate::families::launcher::{HaloConfig, LauncherConfig, OutlineConfig};
use crate::families::rings::{BootRingsConfig, PulseConfig, ShutdownConfig};
use crate::families::spinner::SpinnerConfig;
use crate::families::sweep::SweepConfig;
use crate::families::wheel::WheelConfig;
use crate::foundation::core::ColorRgba;
use crate::foundation::error::{DialframeError, DialframeResult};

/// Boot and shutdown animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BootAnimation {
    /// Concentric rings growing out of the center, then a shrinking disc.
    Rings {
        /// Boot sequence.
        #[serde(default)]
        rings: BootRingsConfig,
        /// Shutdown sequence.
        #[serde(default)]
        shutdown: ShutdownConfig,
    },
    /// A glyph sweeping in along an arc; shutdown replays it backwards via hard links.
    Sweep(SweepConfig),
}

/// Small looping "busy" animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BusyIndicator {
    /// Swelling disc.
    Pulse(PulseConfig),
    /// Dot with a rotating tail.
    Spinner(SpinnerConfig),
}

/// Built-in theme revision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Revision {
    /// Outlined launcher icons, nearest-neighbour circle sweep, lime wheel.
    #[default]
    Outline,
    /// Haloed launcher icons, smooth circle sweep, green and blue wheel.
    Halo,
    /// Boot rings, shutdown disc and pulse only.
    Classic,
}

impl Revision {
    /// Every revision, newest first.
    pub const ALL: [Self; 3] = [Self::Outline, Self::Halo, Self::Classic];

    /// Name used on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Halo => "halo",
            Self::Classic => "classic",
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Revision {
    type Err = DialframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DialframeError::config(format!(
                    "unknown revision '{s}' (expected outline, halo or classic)"
                ))
            })
    }
}

/// Independently generated groups of images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Boot and shutdown sequences.
    Boot,
    /// Busy indicator.
    Busy,
    /// Category wheel.
    Wheel,
    /// Volume dial.
    Volume,
    /// Scale dials.
    Scales,
    /// Launcher and player icons.
    Launcher,
}

impl Family {
    /// Every family in the order a batch runs them.
    pub const ALL: [Self; 6] = [
        Self::Boot,
        Self::Busy,
        Self::Wheel,
        Self::Volume,
        Self::Scales,
        Self::Launcher,
    ];

    /// Name used on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boot => "boot",
            Self::Busy => "busy",
            Self::Wheel => "wheel",
            Self::Volume => "volume",
            Self::Scales => "scales",
            Self::Launcher => "launcher",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = DialframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DialframeError::config(format!("unknown family '{s}'")))
    }
}

/// Every family's configuration; `None` skips the family.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Boot and shutdown sequences.
    pub boot: Option<BootAnimation>,
    /// Busy indicator.
    pub busy: Option<BusyIndicator>,
    /// Category wheel.
    pub wheel: Option<WheelConfig>,
    /// Volume dial.
    pub volume: Option<GaugeConfig>,
    /// Scale dials.
    pub scales: Option<ScaleDials>,
    /// Launcher and player icons.
    pub launcher: Option<LauncherConfig>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(Revision::default())
    }
}

impl Theme {
    /// Constants of a built-in revision.
    pub fn builtin(revision: Revision) -> Self {
        match revision {
            Revision::Outline => Self {
                boot: Some(BootAnimation::Sweep(SweepConfig::default())),
                busy: Some(BusyIndicator::Spinner(SpinnerConfig::default())),
                wheel: Some(WheelConfig::default()),
                volume: Some(GaugeConfig::volume()),
                scales: Some(ScaleDials::default()),
                launcher: Some(LauncherConfig::Outline(OutlineConfig::default())),
            },
            Revision::Halo => {
                let green = ColorRgba::rgb(0x66, 0x99, 0x00);
                Self {
                    boot: Some(BootAnimation::Sweep(SweepConfig::halo())),
                    wheel: Some(WheelConfig {
                        palette: vec![
                            green,
                            green,
                            green,
                            green,
                            ColorRgba::rgb(0x00, 0x00, 0x99),
                            ColorRgba::rgb(0x33, 0x33, 0x33),
                        ],
                        ..WheelConfig::default()
                    }),
                    launcher: Some(LauncherConfig::Halo(HaloConfig::default())),
                    ..Self::builtin(Revision::Outline)
                }
            }
            Revision::Classic => Self {
                boot: Some(BootAnimation::Rings {
                    rings: BootRingsConfig::default(),
                    shutdown: ShutdownConfig::default(),
                }),
                busy: Some(BusyIndicator::Pulse(PulseConfig::default())),
                wheel: None,
                volume: None,
                scales: None,
                launcher: None,
            },
        }
    }

    /// Parse a JSON document merged over `base`.
    pub fn from_json_over(base: &Theme, json: &str) -> DialframeResult<Self> {
        let patch: Value = serde_json::from_str(json)
            .map_err(|e| DialframeError::config(format!("theme json: {e}")))?;
        let mut merged = serde_json::to_value(base)
            .map_err(|e| DialframeError::Other(anyhow::Error::new(e)))?;
        merge_json(&mut merged, patch);
        let theme: Self = serde_json::from_value(merged)
            .map_err(|e| DialframeError::config(format!("theme json: {e}")))?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load a JSON theme file merged over the default revision.
    pub fn from_path(path: &Path) -> DialframeResult<Self> {
        Self::from_path_over(&Self::default(), path)
    }

    /// Load a JSON theme file merged over `base`.
    pub fn from_path_over(base: &Theme, path: &Path) -> DialframeResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| DialframeError::io(path, e))?;
        Self::from_json_over(base, &json).map_err(|e| match e {
            DialframeError::Config(msg) => {
                DialframeError::config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Check every enabled family.
    pub fn validate(&self) -> DialframeResult<()> {
        match &self.boot {
            Some(BootAnimation::Rings { rings, shutdown }) => {
                rings.validate()?;
                shutdown.validate()?;
            }
            Some(BootAnimation::Sweep(sweep)) => sweep.validate()?,
            None => {}
        }
        match &self.busy {
            Some(BusyIndicator::Pulse(pulse)) => pulse.validate()?,
            Some(BusyIndicator::Spinner(spinner)) => spinner.validate()?,
            None => {}
        }
        if let Some(wheel) = &self.wheel {
            wheel.validate()?;
        }
        if let Some(volume) = &self.volume {
            volume.validate()?;
        }
        if let Some(scales) = &self.scales {
            scales.validate()?;
        }
        if let Some(launcher) = &self.launcher {
            launcher.validate()?;
        }
        Ok(())
    }

    /// `true` when `family` has a configuration.
    pub fn is_enabled(&self, family: Family) -> bool {
        match family {
            Family::Boot => self.boot.is_some(),
            Family::Busy => self.busy.is_some(),
            Family::Wheel => self.wheel.is_some(),
            Family::Volume => self.volume.is_some(),
            Family::Scales => self.scales.is_some(),
            Family::Launcher => self.launcher.is_some(),
        }
    }

    /// `true` when `family` cannot run without an asset directory.
    pub fn needs_assets(&self, family: Family) -> bool {
        match family {
            Family::Boot => matches!(self.boot, Some(BootAnimation::Sweep(_))),
            Family::Launcher => self.launcher.is_some(),
            _ => false,
        }
    }
}

/// Overlay `patch` onto `base`: objects merge key by key, anything else replaces.
///
/// An object whose `kind` or `style` tag changes is replaced as a whole.
fn merge_json(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) if can_merge(slot, &value) => merge_json(slot, value),
                    _ => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

fn can_merge(base: &Value, patch: &Value) -> bool {
    let (Value::Object(base), Value::Object(patch)) = (base, patch) else {
        return false;
    };
    ["kind", "style"]
        .iter()
        .all(|tag| match (base.get(*tag), patch.get(*tag)) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        })
}

#[cfg(test)]
#[path = "../tests/unit/theme.rs"]
mod tests;
