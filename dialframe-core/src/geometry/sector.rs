use std::f64::consts::PI;

use crate::foundation::core::{PixelRect, Point2D};
use crate::foundation::error::{DialframeError, DialframeResult};

/// Unvalidated sector description, filled in field by field and turned into a [`SectorMask`]
/// with [`SectorParams::build`].
///
/// Radii are in pixels. Angles are radians in `[-PI, PI]`, counter-clockwise from the positive
/// x-axis with y flipped to point up. Equal angles select the full circle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectorParams {
    /// Center pixel.
    pub center: Point2D,
    /// Inner radius; pixels closer than this are outside.
    pub inner_radius: f64,
    /// Outer radius; pixels farther than this are outside.
    pub outer_radius: f64,
    /// Coverage at the inner radius.
    pub inner_alpha: f64,
    /// Coverage at the outer radius.
    pub outer_alpha: f64,
    /// Start of the included arc.
    pub angle_start: f64,
    /// End of the included arc. Less than `angle_start` wraps through `PI`.
    pub angle_end: f64,
}

impl SectorParams {
    /// Opaque full disc of `radius` around `center`.
    pub fn disc(center: Point2D, radius: f64) -> Self {
        Self {
            center,
            outer_radius: radius,
            inner_alpha: 1.0,
            outer_alpha: 1.0,
            ..Self::default()
        }
    }

    /// Validate and freeze the parameters.
    pub fn build(self) -> DialframeResult<SectorMask> {
        let fields = [
            ("inner_radius", self.inner_radius),
            ("outer_radius", self.outer_radius),
            ("inner_alpha", self.inner_alpha),
            ("outer_alpha", self.outer_alpha),
            ("angle_start", self.angle_start),
            ("angle_end", self.angle_end),
        ];
        if let Some((name, v)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DialframeError::config(format!(
                "sector {name} must be finite, got {v}"
            )));
        }
        if self.inner_radius < 0.0 {
            return Err(DialframeError::config(format!(
                "sector inner_radius {} must be >= 0",
                self.inner_radius
            )));
        }
        if self.inner_radius >= self.outer_radius {
            return Err(DialframeError::config(format!(
                "sector inner_radius {} >= outer_radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        for (name, alpha) in [
            ("inner_alpha", self.inner_alpha),
            ("outer_alpha", self.outer_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(DialframeError::config(format!(
                    "sector {name} {alpha} outside [0, 1]"
                )));
            }
        }
        if self.inner_alpha == 0.0 && self.outer_alpha == 0.0 {
            return Err(DialframeError::config(
                "sector needs inner_alpha or outer_alpha or both",
            ));
        }
        for (name, angle) in [
            ("angle_start", self.angle_start),
            ("angle_end", self.angle_end),
        ] {
            if !(-PI..=PI).contains(&angle) {
                return Err(DialframeError::config(format!(
                    "sector {name} {angle} outside [-pi, pi]"
                )));
            }
        }

        Ok(SectorMask {
            center: self.center,
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            inner_alpha: self.inner_alpha,
            outer_alpha: self.outer_alpha,
            angle_start: self.angle_start,
            angle_end: self.angle_end,
            min_r2: self.inner_radius * self.inner_radius,
            max_r2: self.outer_radius * self.outer_radius,
        })
    }
}

/// Validated annular-sector coverage mask.
///
/// A disc is the degenerate case with zero inner radius and equal start/end angles; there is no
/// separate disc type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorMask {
    center: Point2D,
    inner_radius: f64,
    outer_radius: f64,
    inner_alpha: f64,
    outer_alpha: f64,
    angle_start: f64,
    angle_end: f64,
    min_r2: f64,
    max_r2: f64,
}

impl SectorMask {
    /// Opaque full disc of `radius` around `center`.
    pub fn disc(center: Point2D, radius: f64) -> DialframeResult<Self> {
        SectorParams::disc(center, radius).build()
    }

    /// Center pixel.
    pub fn center(&self) -> Point2D {
        self.center
    }

    /// Inner radius in pixels.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Outer radius in pixels.
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// `true` when the mask has no angular bound.
    pub fn is_full_circle(&self) -> bool {
        self.angle_start == self.angle_end
    }

    /// Pixels that can receive non-zero coverage: `center +- ceil(outer_radius)`, inclusive.
    pub fn bounds(&self) -> PixelRect {
        let rr = self.outer_radius.ceil() as i32;
        PixelRect::new(
            self.center.x.saturating_sub(rr),
            self.center.y.saturating_sub(rr),
            self.center.x.saturating_add(rr).saturating_add(1),
            self.center.y.saturating_add(rr).saturating_add(1),
        )
    }

    /// Coverage of pixel `(x, y)` in `[0, 1]`.
    pub fn coverage(&self, x: i32, y: i32) -> f64 {
        let dx = f64::from(x) - f64::from(self.center.x);
        // Flipped so that angles grow counter-clockwise on screen. Computed as `cy - y` rather
        // than `-(y - cy)` to avoid a negative zero on the center row.
        let up = f64::from(self.center.y) - f64::from(y);
        let r2 = dx * dx + up * up;
        if r2 < self.min_r2 || r2 > self.max_r2 {
            return 0.0;
        }
        if !self.is_full_circle() && !self.contains_angle(up.atan2(dx)) {
            return 0.0;
        }
        if self.inner_alpha == self.outer_alpha {
            return self.inner_alpha;
        }
        let w = ((r2 - self.min_r2) / (self.max_r2 - self.min_r2)).sqrt();
        (1.0 - w) * self.inner_alpha + w * self.outer_alpha
    }

    fn contains_angle(&self, a: f64) -> bool {
        // -PI and PI name the same direction; atan2 only ever reports PI.
        self.arc_contains(a) || (a == PI && self.arc_contains(-PI))
    }

    fn arc_contains(&self, a: f64) -> bool {
        if self.angle_start < self.angle_end {
            self.angle_start <= a && a <= self.angle_end
        } else {
            !(self.angle_end < a && a < self.angle_start)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/sector.rs"]
mod tests;
