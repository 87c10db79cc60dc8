//! Dialframe generates the small animated images of a media-player UI theme.
//!
//! Every image is built from one primitive: an anti-aliased annular sector (a disc, a ring, or
//! a wedge of either) with a radial alpha ramp and optionally tapered edges. Sectors are
//! composited into premultiplied RGBA8 frames together with decoded overlay bitmaps, and the
//! frames are written as numbered PNG or JPEG files.
//!
//! # Pipeline overview
//!
//! 1. **Parameters**: a family config maps a frame index to shapes (`BootRingsConfig::params`,
//!    `WheelConfig::params`, ...). These functions are pure.
//! 2. **Rasterize**: [`SectorParams::build`] turns a shape into a coverage mask.
//! 3. **Composite**: [`composite`] paints masks and overlays into a [`PixelBuffer`] with
//!    [`BlendMode::Over`] or [`BlendMode::Replace`].
//! 4. **Write**: [`render_sequence`] drives a [`FrameSink`]; [`FileSink`] encodes each frame and
//!    only rewrites files whose bytes changed.
//!
//! [`run_theme`] runs every family of a [`Theme`] into one output tree.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod batch;
mod composite;
mod encode;
mod families;
mod foundation;
mod geometry;
mod render;
mod sequence;
mod theme;

pub use assets::decode::decode_bitmap;
pub use assets::overlay::{OverlayDir, ResampleFilter, load_overlay, resize_bitmap, two_tone};
pub use batch::{BatchPaths, run_family, run_theme};
pub use composite::blend::{BlendMode, PremulRgba8, over, replace};
pub use composite::draw::{Source, centered_origin, composite, draw_bitmap, fill_mask, fill_rect};
pub use encode::codec::{Encoding, encode_frame};
pub use encode::file::{FileSink, ensure_parent_dir, write_if_changed};
pub use encode::sink::{FrameOutcome, FrameSink, InMemorySink, SequenceConfig};
pub use families::gauge::{GaugeConfig, GaugeWarning, ScaleDials};
pub use families::launcher::{HaloConfig, LauncherConfig, OutlineConfig, OutlineJob, OutlineParams};
pub use families::rings::{BootRingsConfig, DiscParams, PulseConfig, ShutdownConfig};
pub use families::spinner::{SpinnerConfig, SpinnerParams};
pub use families::sweep::{SweepConfig, SweepLinks, SweepParams, SweepPath, SweepStill};
pub use families::wheel::{WheelConfig, WheelParams};
pub use families::{FamilyContext, MIN_VISIBLE_RADIUS, Segment, with_name};
pub use foundation::core::{Canvas, ColorRgba, FrameRange, FrameSpec, PixelRect, Point2D};
pub use foundation::error::{DialframeError, DialframeResult};
pub use foundation::math::wrap_angle;
pub use geometry::sector::{SectorMask, SectorParams};
pub use render::buffer::PixelBuffer;
pub use sequence::driver::{RunSummary, render_sequence, write_sequence};
pub use sequence::link::{link_frames, reverse_stride_pairs};
pub use sequence::pattern::OutputPattern;
pub use theme::{BootAnimation, BusyIndicator, Family, Revision, Theme};
