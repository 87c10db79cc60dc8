//! Frame sequence driver: numbered output paths, the per-frame render loop, and hard-linked
//! duplicate frames.

pub(crate) mod driver;
pub(crate) mod link;
pub(crate) mod pattern;
