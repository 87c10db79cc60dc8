use crate::encode::file::ensure_parent_dir;
use crate::foundation::error::{DialframeError, DialframeResult};
use crate::sequence::driver::RunSummary;
use crate::sequence::pattern::OutputPattern;

/// Hard-link already rendered frames to new names.
///
/// For every `(dst, src)` pair, the file for `src` under `src_pattern` is linked as the file for
/// `dst` under `dst_pattern`. Any stale destination is removed first. A missing source frame is
/// an IO error.
#[tracing::instrument(skip_all, fields(src = %src_pattern, dst = %dst_pattern))]
pub fn link_frames<I>(
    src_pattern: &OutputPattern,
    dst_pattern: &OutputPattern,
    pairs: I,
) -> DialframeResult<RunSummary>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut summary = RunSummary::default();
    for (dst_index, src_index) in pairs {
        let src = src_pattern.path_at(src_index);
        let dst = dst_pattern.path_at(dst_index);

        std::fs::metadata(&src).map_err(|e| DialframeError::io(&src, e))?;
        ensure_parent_dir(&dst)?;
        match std::fs::remove_file(&dst) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(DialframeError::io(&dst, e)),
        }
        std::fs::hard_link(&src, &dst).map_err(|e| DialframeError::io(&dst, e))?;

        tracing::info!(src = %src.display(), dst = %dst.display(), "linked frame");
        summary.linked += 1;
    }
    Ok(summary)
}

/// Shutdown frame `i` shows boot frame `(last - i) * step`, for `i` in `0..=last`.
pub fn reverse_stride_pairs(last: u32, step: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..=last).map(move |i| (i, (last - i) * step))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/link.rs"]
mod tests;
