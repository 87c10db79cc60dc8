//! Frame encoding and persistence.
//!
//! Sinks consume finished frames in index order. [`FileSink`] writes them to disk and reports
//! whether each file was new, rewritten, or already up to date.

pub(crate) mod codec;
pub(crate) mod file;
pub(crate) mod sink;
