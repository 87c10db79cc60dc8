use std::path::Path;

use crate::encode::codec::encode_frame;
use crate::encode::sink::{FrameOutcome, FrameSink, SequenceConfig};
use crate::foundation::core::FrameSpec;
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::render::buffer::PixelBuffer;
use crate::sequence::pattern::OutputPattern;

/// Sink that encodes each frame and writes it to the path named by an [`OutputPattern`].
///
/// Files whose current contents already match the encoded frame are left untouched.
#[derive(Debug)]
pub struct FileSink {
    pattern: OutputPattern,
    cfg: Option<SequenceConfig>,
}

impl FileSink {
    /// Sink writing to `pattern`.
    pub fn new(pattern: OutputPattern) -> Self {
        Self { pattern, cfg: None }
    }

    /// The output template.
    pub fn pattern(&self) -> &OutputPattern {
        &self.pattern
    }
}

impl FrameSink for FileSink {
    fn begin(&mut self, cfg: &SequenceConfig) -> DialframeResult<()> {
        cfg.canvas.validate("file sink")?;
        cfg.encoding.validate()?;
        self.pattern.check(cfg.range)?;
        self.cfg = Some(*cfg);
        Ok(())
    }

    fn push_frame(
        &mut self,
        frame: FrameSpec,
        buffer: &PixelBuffer,
    ) -> DialframeResult<FrameOutcome> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| DialframeError::config("file sink not started"))?;
        if buffer.canvas() != cfg.canvas {
            return Err(DialframeError::config(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                buffer.width(),
                buffer.height(),
                cfg.canvas.width,
                cfg.canvas.height
            )));
        }

        let path = self.pattern.path_for(frame, cfg.range);
        let bytes = encode_frame(buffer, cfg.encoding)?;
        let outcome = write_if_changed(&path, &bytes)?;
        match outcome {
            FrameOutcome::Kept => tracing::debug!(path = %path.display(), "unchanged"),
            FrameOutcome::Made | FrameOutcome::Changed => {
                tracing::info!(path = %path.display(), ?outcome, "wrote frame");
            }
        }
        Ok(outcome)
    }

    fn end(&mut self) -> DialframeResult<()> {
        self.cfg = None;
        Ok(())
    }
}

/// Write `bytes` to `path` unless the file already holds exactly those bytes.
///
/// A changed file is unlinked before writing so that hard-linked peers keep their contents.
pub fn write_if_changed(path: &Path, bytes: &[u8]) -> DialframeResult<FrameOutcome> {
    ensure_parent_dir(path)?;
    let outcome = match std::fs::read(path) {
        Ok(existing) if existing == bytes => return Ok(FrameOutcome::Kept),
        Ok(_) => {
            std::fs::remove_file(path).map_err(|e| DialframeError::io(path, e))?;
            FrameOutcome::Changed
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => FrameOutcome::Made,
        Err(e) => return Err(DialframeError::io(path, e)),
    };
    std::fs::write(path, bytes).map_err(|e| DialframeError::io(path, e))?;
    Ok(outcome)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> DialframeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DialframeError::io(parent, e))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/file.rs"]
mod tests;
