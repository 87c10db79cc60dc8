use std::ops::AddAssign;

use crate::encode::file::FileSink;
use crate::encode::sink::{FrameOutcome, FrameSink, SequenceConfig};
use crate::foundation::core::FrameSpec;
use crate::foundation::error::DialframeResult;
use crate::render::buffer::PixelBuffer;
use crate::sequence::pattern::OutputPattern;

/// Tally of what a run did to the output tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunSummary {
    /// Frames written where no file existed.
    pub made: u32,
    /// Frames rewritten because the previous file differed.
    pub changed: u32,
    /// Frames whose existing file was already identical.
    pub kept: u32,
    /// Frames produced by hard-linking an earlier frame.
    pub linked: u32,
}

impl RunSummary {
    /// Number of frames accounted for.
    pub fn frames_total(&self) -> u32 {
        self.made + self.changed + self.kept + self.linked
    }

    /// Count one sink outcome.
    pub fn record(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Made => self.made += 1,
            FrameOutcome::Changed => self.changed += 1,
            FrameOutcome::Kept => self.kept += 1,
        }
    }
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.made += rhs.made;
        self.changed += rhs.changed;
        self.kept += rhs.kept;
        self.linked += rhs.linked;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DriverState {
    Idle,
    Rendering(u32),
    Encoded(u32),
    Done,
}

fn enter(state: &mut DriverState, next: DriverState) {
    tracing::debug!(from = ?*state, to = ?next, "driver state");
    *state = next;
}

/// Render every frame of `cfg.range` through `draw` and hand each result to `sink`.
///
/// Each frame starts from a fully transparent buffer. The first error from `draw` or the sink
/// aborts the run; frames already pushed stay where the sink put them.
#[tracing::instrument(skip(sink, draw), fields(first = cfg.range.first, last = cfg.range.last))]
pub fn render_sequence<S, F>(
    cfg: &SequenceConfig,
    sink: &mut S,
    mut draw: F,
) -> DialframeResult<RunSummary>
where
    S: FrameSink + ?Sized,
    F: FnMut(FrameSpec, &mut PixelBuffer) -> DialframeResult<()>,
{
    cfg.canvas.validate("sequence")?;
    let mut state = DriverState::Idle;
    let mut summary = RunSummary::default();

    sink.begin(cfg)?;
    for frame in cfg.range.frames() {
        enter(&mut state, DriverState::Rendering(frame.index));
        let mut buffer = PixelBuffer::new(cfg.canvas)?;
        draw(frame, &mut buffer)?;

        let outcome = sink.push_frame(frame, &buffer)?;
        summary.record(outcome);
        enter(&mut state, DriverState::Encoded(frame.index));
    }
    sink.end()?;
    enter(&mut state, DriverState::Done);

    Ok(summary)
}

/// Render `cfg` straight to files named by `pattern`.
pub fn write_sequence<F>(
    pattern: &OutputPattern,
    cfg: &SequenceConfig,
    draw: F,
) -> DialframeResult<RunSummary>
where
    F: FnMut(FrameSpec, &mut PixelBuffer) -> DialframeResult<()>,
{
    let mut sink = FileSink::new(pattern.clone());
    render_sequence(cfg, &mut sink, draw)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/driver.rs"]
mod tests;
