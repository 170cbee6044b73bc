//! Sub-clip extraction and concat stitching.
//!
//! Extracts each selected region from the source with stream copy, then
//! concatenates the parts in selection order with the concat demuxer.
//! The source is only ever opened for reading.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Regions shorter than this are skipped at extraction time; FFmpeg
/// cannot produce a usable zero-length concat part.
const MIN_REGION_SECS: f64 = 0.001;

/// A clipped source region to extract, in source seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    /// Start in source seconds.
    pub start: f64,
    /// End in source seconds, already clipped to the source duration.
    pub end: f64,
}

impl ClipRegion {
    /// Create a new region.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Region duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Extract a region from a video file without re-encoding.
pub async fn extract_region<P: AsRef<Path>>(
    input: P,
    output: P,
    region: ClipRegion,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        "Extracting region: {} -> {} (start: {:.2}s, duration: {:.2}s)",
        input.display(),
        output.display(),
        region.start,
        region.duration()
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(region.start)
        .duration(region.duration())
        .codec_copy();

    FfmpegRunner::new().run(&cmd).await
}

/// Stitch the given regions of `source` into one clip at `output`.
///
/// Regions are extracted and concatenated in the order given; the
/// resulting clip's duration is the sum of the region durations.
/// Intermediate part files and the concat list live in `work_dir`.
///
/// A negative-duration region is rejected with `InvalidRegion`;
/// zero-length regions (clipped entirely past the source end) are
/// skipped, which leaves the total duration unchanged.
pub async fn stitch_regions(
    source: impl AsRef<Path>,
    regions: &[ClipRegion],
    work_dir: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let source = source.as_ref();
    let work_dir = work_dir.as_ref();
    let output = output.as_ref();

    if !source.exists() {
        return Err(MediaError::FileNotFound(source.to_path_buf()));
    }
    for region in regions {
        if region.duration() < 0.0 || region.start < 0.0 {
            return Err(MediaError::InvalidRegion {
                start: region.start,
                end: region.end,
            });
        }
    }

    let mut parts: Vec<PathBuf> = Vec::new();
    for (i, region) in regions.iter().enumerate() {
        if region.duration() < MIN_REGION_SECS {
            info!("Skipping zero-length region {} at {:.3}s", i, region.start);
            continue;
        }
        let part = work_dir.join(format!("part_{:03}.mp4", i));
        extract_region(source, &part, *region).await?;
        parts.push(part);
    }

    if parts.is_empty() {
        return Err(MediaError::InvalidVideo(
            "No non-empty regions to stitch".to_string(),
        ));
    }

    let list_file = work_dir.join("concat.txt");
    fs::write(&list_file, concat_list(&parts)).await?;

    let cmd = FfmpegCommand::new(&list_file, output)
        .input_args(["-f", "concat", "-safe", "0"])
        .codec_copy();

    FfmpegRunner::new().run(&cmd).await?;

    info!(
        "Stitched {} parts into {}",
        parts.len(),
        output.display()
    );
    Ok(())
}

/// Build the concat demuxer list file contents.
fn concat_list(parts: &[PathBuf]) -> String {
    let mut list = String::new();
    for part in parts {
        list.push_str("file '");
        // Single quotes inside a quoted concat entry are written as '\''
        list.push_str(&part.to_string_lossy().replace('\'', "'\\''"));
        list.push_str("'\n");
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_duration() {
        let region = ClipRegion::new(20.0, 35.0);
        assert!((region.duration() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_concat_list_format() {
        let parts = vec![PathBuf::from("/tmp/part_000.mp4"), PathBuf::from("/tmp/part_001.mp4")];
        let list = concat_list(&parts);
        assert_eq!(list, "file '/tmp/part_000.mp4'\nfile '/tmp/part_001.mp4'\n");
    }

    #[test]
    fn test_concat_list_escapes_quotes() {
        let parts = vec![PathBuf::from("/tmp/it's.mp4")];
        let list = concat_list(&parts);
        assert_eq!(list, "file '/tmp/it'\\''s.mp4'\n");
    }

    #[tokio::test]
    async fn test_stitch_rejects_missing_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = stitch_regions(
            Path::new("/nonexistent/source.mp4"),
            &[ClipRegion::new(0.0, 1.0)],
            dir.path(),
            &dir.path().join("out.mp4"),
        )
        .await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_stitch_rejects_negative_region() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("source.mp4");
        tokio::fs::write(&source, b"stub").await.unwrap();
        let result = stitch_regions(
            &source,
            &[ClipRegion::new(10.0, 5.0)],
            &dir.path().to_path_buf(),
            &dir.path().join("out.mp4"),
        )
        .await;
        assert!(matches!(result, Err(MediaError::InvalidRegion { .. })));
    }
}
