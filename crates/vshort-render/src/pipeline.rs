//! The render pipeline.
//!
//! Runs one `RenderRequest` to completion: stitch the selected
//! segments, center-crop, overlay the end card, burn in subtitles,
//! then move the result to the final output path. Each stage
//! transition is published on the caller's progress sink before the
//! stage's work runs.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use vshort_media::{
    burn_in_subtitles, center_crop_filter, end_card_filter, move_file, probe, stitch_regions,
    FfmpegCommand, FfmpegRunner, MediaError,
};
use vshort_models::{compose_srt, RenderRequest, RenderStage};

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::logging::RenderLogger;
use crate::progress::{ProgressSink, ProgressTracker};
use crate::subtitles::synthesize_cues;
use crate::timeline::{build_timeline, total_duration};
use crate::workspace::Workspace;

/// Render pipeline bound to one source video.
///
/// Not safe for concurrent invocation on the same instance; the render
/// manager admits one render at a time per worker.
pub struct RenderPipeline {
    source: PathBuf,
    config: RenderConfig,
}

impl RenderPipeline {
    /// Create a pipeline for `source`.
    pub fn new(source: impl Into<PathBuf>, config: RenderConfig) -> Self {
        Self {
            source: source.into(),
            config,
        }
    }

    /// Run `request` to completion, publishing stage events on `sink`.
    ///
    /// On failure the render aborts immediately: nothing is written to
    /// the output path, no further events reach the sink, and the
    /// workspace is kept on disk when it still holds an intermediate
    /// worth diagnosing (burn-in and commit failures).
    pub async fn render(&self, request: &RenderRequest, sink: ProgressSink) -> RenderResult<()> {
        let logger = RenderLogger::new(&request.output_path);
        logger.log_start(&format!("{} segments selected", request.segments.len()));

        let mut tracker = ProgressTracker::new(&request.output_path, sink);
        let workspace = Workspace::new()?;

        let result = self
            .render_stages(request, &mut tracker, &workspace, &logger)
            .await;

        match &result {
            Ok(()) => logger.log_completion("Short rendered"),
            Err(err) => {
                logger.log_error(&err.to_string());
                if matches!(err, RenderError::BurnIn { .. } | RenderError::Commit { .. }) {
                    let kept = workspace.keep();
                    info!(
                        "Workspace kept for diagnosis at {}",
                        kept.display()
                    );
                }
            }
        }
        result
    }

    async fn render_stages(
        &self,
        request: &RenderRequest,
        tracker: &mut ProgressTracker,
        workspace: &Workspace,
        logger: &RenderLogger,
    ) -> RenderResult<()> {
        let source_duration = probe::get_duration(&self.source).await?;

        // Stage 1: stitch the selected segments into one clip.
        tracker.advance(RenderStage::SegmentToClip);
        let timeline = build_timeline(&request.segments, source_duration);
        let clip_secs = total_duration(&timeline);
        logger.log_progress(&format!(
            "Timeline built: {} segments, {:.2}s total",
            timeline.len(),
            clip_secs
        ));

        let regions: Vec<_> = timeline.iter().map(|t| t.region()).collect();
        let stitched = workspace.create_file("concat.mp4");
        stitch_regions(&self.source, &regions, workspace.path(), &stitched).await?;

        // Stage 2: center-crop to the portrait target.
        tracker.advance(RenderStage::CropClip);
        let cropped = workspace.create_file("cropped.mp4");
        self.crop_clip(&stitched, &cropped).await?;

        // Stage 3: end-card overlay, materialized to a file.
        tracker.advance(RenderStage::EndClip);
        ensure_end_card_fits(clip_secs, &self.config)?;
        let end_file = workspace.create_file("end.mp4");
        self.overlay_end_card(&cropped, &end_file, clip_secs).await?;

        // Stage 4: synthesize subtitles and burn them in.
        tracker.advance(RenderStage::SubClip);
        let cues = synthesize_cues(&timeline);
        let srt_file = workspace.create_file("subs.srt");
        fs::write(&srt_file, compose_srt(&cues)).await?;

        let subbed_file = workspace.create_file("subbed.mp4");
        burn_in_subtitles(&end_file, &srt_file, &subbed_file, &self.config.subtitle_style)
            .await
            .map_err(burn_in_failure)?;

        // Stage 5: commit the result to the requested output path.
        tracker.advance(RenderStage::MoveClip);
        move_file(&subbed_file, &request.output_path)
            .await
            .map_err(RenderError::commit)?;

        tracker.advance(RenderStage::Finish);
        Ok(())
    }

    /// Re-encode `input` center-cropped to the configured target size.
    async fn crop_clip(&self, input: &Path, output: &Path) -> RenderResult<()> {
        let cmd = FfmpegCommand::new(input, output)
            .video_filter(center_crop_filter(
                self.config.crop_width,
                self.config.crop_height,
            ))
            .audio_codec("copy");
        FfmpegRunner::new().run(&cmd).await?;
        Ok(())
    }

    /// Draw the end-card text over the trailing window of `input`.
    async fn overlay_end_card(
        &self,
        input: &Path,
        output: &Path,
        clip_secs: f64,
    ) -> RenderResult<()> {
        let cmd = FfmpegCommand::new(input, output)
            .video_filter(end_card_filter(
                &self.config.end_card_text,
                self.config.end_card_font_size,
                clip_secs,
                self.config.end_card_secs,
            ))
            .audio_codec("copy");
        FfmpegRunner::new().run(&cmd).await?;
        Ok(())
    }
}

/// End-card precondition: the stitched clip must be strictly longer
/// than the end-card window, or there is nothing to draw the card over.
fn ensure_end_card_fits(clip_secs: f64, config: &RenderConfig) -> RenderResult<()> {
    if clip_secs <= config.end_card_secs {
        return Err(RenderError::InsufficientDuration {
            clip_secs,
            end_card_secs: config.end_card_secs,
        });
    }
    Ok(())
}

/// Classify a burn-in stage failure. Only an actual non-zero FFmpeg
/// exit is a burn-in failure with captured diagnostics; a missing
/// binary or spawn error is still a media access problem.
fn burn_in_failure(err: MediaError) -> RenderError {
    match err {
        MediaError::FfmpegFailed { stderr, .. } => {
            RenderError::burn_in(stderr.unwrap_or_default())
        }
        other => RenderError::MediaAccess(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use vshort_models::Segment;

    #[test]
    fn test_clip_shorter_than_end_card_window_is_rejected() {
        // Default window is 5s; a 3s clip cannot hold the end card.
        let err = ensure_end_card_fits(3.0, &RenderConfig::default()).unwrap_err();
        match err {
            RenderError::InsufficientDuration {
                clip_secs,
                end_card_secs,
            } => {
                assert!((clip_secs - 3.0).abs() < 1e-9);
                assert!((end_card_secs - 5.0).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_clip_equal_to_end_card_window_is_rejected() {
        let config = RenderConfig::default();
        assert!(ensure_end_card_fits(config.end_card_secs, &config).is_err());
    }

    #[test]
    fn test_clip_longer_than_end_card_window_is_accepted() {
        assert!(ensure_end_card_fits(12.5, &RenderConfig::default()).is_ok());
    }

    #[test]
    fn test_ffmpeg_exit_maps_to_burn_in_with_diagnostics() {
        let err = burn_in_failure(MediaError::ffmpeg_failed(
            "FFmpeg exited with non-zero status",
            Some("Unable to open subs.srt".to_string()),
            Some(1),
        ));
        assert_eq!(err.burn_in_stderr(), Some("Unable to open subs.srt"));
    }

    #[test]
    fn test_missing_ffmpeg_stays_a_media_access_failure() {
        let err = burn_in_failure(MediaError::FfmpegNotFound);
        assert!(matches!(
            err,
            RenderError::MediaAccess(MediaError::FfmpegNotFound)
        ));
    }

    #[tokio::test]
    async fn test_unreadable_source_aborts_before_first_stage() {
        let pipeline = RenderPipeline::new("/nonexistent/source.mp4", RenderConfig::default());
        let request = RenderRequest::new(
            vec![Segment::new(0, 0.0, 10.0, "hello")],
            "/tmp/vshort-test-never-written.mp4",
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        let result = pipeline.render(&request, tx).await;

        assert!(matches!(result, Err(RenderError::MediaAccess(_))));
        // Probe failed before SegmentToClip, so no events were published
        // and nothing reached the output path.
        assert!(rx.try_recv().is_err());
        assert!(!Path::new("/tmp/vshort-test-never-written.mp4").exists());
    }
}
