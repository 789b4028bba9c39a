//! Lossless range extraction via stream copy.

use std::path::Path;
use tracing::info;

use asplit_models::TimeRange;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Cut a time range out of an audio file without re-encoding.
///
/// Uses `-c copy`, so cuts land on the nearest packet boundary; the output
/// may be a fraction of a second longer than requested but suffers no
/// generation loss.
pub async fn cut_range(
    ffmpeg: &Path,
    input: &Path,
    range: &TimeRange,
    output: &Path,
) -> MediaResult<()> {
    info!(
        "Cutting segment: {} -> {} ({})",
        input.display(),
        output.display(),
        range
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(range.start)
        .until(range.end)
        .stream_copy();

    FfmpegRunner::new(ffmpeg).run(&cmd).await
}
