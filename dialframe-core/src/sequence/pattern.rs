use std::fmt;
use std::path::{Path, PathBuf};

use crate::foundation::core::{FrameRange, FrameSpec};
use crate::foundation::error::{DialframeError, DialframeResult};

/// Output path template with an optional printf-style frame placeholder.
///
/// Recognized placeholders are `%d`, `%Nd` (space padded) and `%0Nd` (zero padded). `%%` is a
/// literal percent sign. At most one placeholder is allowed.
///
/// A pattern can be anchored under a root directory with [`OutputPattern::under`]; the root is
/// joined as a path and never scanned for placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPattern {
    root: PathBuf,
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Index { width: usize, zero: bool },
}

impl OutputPattern {
    /// Parse a template such as `out/boot/%02d.jpg`.
    pub fn parse(raw: impl Into<String>) -> DialframeResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DialframeError::config("output pattern must not be empty"));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut seen_index = false;
        let mut chars = raw.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    literal.push('%');
                    continue;
                }
                None => {
                    return Err(DialframeError::config(format!(
                        "output pattern '{raw}' ends with a bare '%'"
                    )));
                }
                Some(_) => {}
            }

            let zero = chars.next_if_eq(&'0').is_some();
            let mut digits = String::new();
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                digits.push(d);
            }
            if chars.next() != Some('d') {
                return Err(DialframeError::config(format!(
                    "output pattern '{raw}': only %d, %Nd and %0Nd placeholders are supported"
                )));
            }
            let width = if digits.is_empty() {
                0
            } else {
                digits.parse::<usize>().map_err(|e| {
                    DialframeError::config(format!("output pattern '{raw}': bad width: {e}"))
                })?
            };

            if seen_index {
                return Err(DialframeError::config(format!(
                    "output pattern '{raw}' has more than one frame placeholder"
                )));
            }
            seen_index = true;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Index { width, zero });
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            root: PathBuf::new(),
            raw,
            segments,
        })
    }

    /// Anchor the template under `root`.
    pub fn under(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        self
    }

    /// Directory the template is resolved against; empty when unanchored.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `true` when the template contains a frame placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Index { .. }))
    }

    /// Substitute `index` into the template, ignoring the root.
    pub fn render(&self, index: u32) -> String {
        let mut out = String::with_capacity(self.raw.len() + 4);
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Index { width, zero: true } => {
                    out.push_str(&format!("{index:0width$}"));
                }
                Segment::Index { width, zero: false } => {
                    out.push_str(&format!("{index:>width$}"));
                }
            }
        }
        out
    }

    /// Check that the template can name every frame of `range`.
    pub fn check(&self, range: FrameRange) -> DialframeResult<()> {
        if !range.is_single() && !self.has_placeholder() {
            return Err(DialframeError::config(format!(
                "output pattern '{}' has no frame placeholder but the range {}..={} has {} frames",
                self.raw,
                range.first,
                range.last,
                range.len_frames()
            )));
        }
        Ok(())
    }

    /// Path of frame `index` under the root.
    pub fn path_at(&self, index: u32) -> PathBuf {
        self.root.join(self.render(index))
    }

    /// Output path for `frame`. Single-frame ranges use the template verbatim.
    pub fn path_for(&self, frame: FrameSpec, range: FrameRange) -> PathBuf {
        if range.is_single() {
            self.root.join(&self.raw)
        } else {
            self.path_at(frame.index)
        }
    }
}

impl fmt::Display for OutputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.as_os_str().is_empty() {
            f.write_str(&self.raw)
        } else {
            write!(f, "{}", self.root.join(&self.raw).display())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/pattern.rs"]
mod tests;
