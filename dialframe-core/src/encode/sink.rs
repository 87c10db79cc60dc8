use crate::encode::codec::Encoding;
use crate::foundation::core::{Canvas, FrameRange, FrameSpec};
use crate::foundation::error::DialframeResult;
use crate::render::buffer::PixelBuffer;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SequenceConfig {
    /// Size of every frame.
    pub canvas: Canvas,
    /// Frame indices to produce.
    pub range: FrameRange,
    /// Container each frame is written in.
    pub encoding: Encoding,
}

/// What a sink did with one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No previous output existed.
    Made,
    /// A previous output existed and differed.
    Changed,
    /// A previous output existed and was byte-identical.
    Kept,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called in strictly increasing index order between `begin` and `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: &SequenceConfig) -> DialframeResult<()>;
    /// Consume one finished frame.
    fn push_frame(&mut self, frame: FrameSpec, buffer: &PixelBuffer)
    -> DialframeResult<FrameOutcome>;
    /// Called once after the last frame.
    fn end(&mut self) -> DialframeResult<()>;
}

/// Sink that keeps every frame in memory; useful for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SequenceConfig>,
    frames: Vec<(FrameSpec, PixelBuffer)>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SequenceConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameSpec, PixelBuffer)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: &SequenceConfig) -> DialframeResult<()> {
        self.cfg = Some(*cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(
        &mut self,
        frame: FrameSpec,
        buffer: &PixelBuffer,
    ) -> DialframeResult<FrameOutcome> {
        self.frames.push((frame, buffer.clone()));
        Ok(FrameOutcome::Made)
    }

    fn end(&mut self) -> DialframeResult<()> {
        Ok(())
    }
}
