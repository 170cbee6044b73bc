//! Subtitle burn-in via an external FFmpeg process.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::filters::{subtitles_filter, SubtitleStyle};

/// Burn the SRT track at `srt_path` into `input`, writing `output`.
///
/// Video is re-encoded to composite the text; the audio stream is
/// copied through unchanged. All FFmpeg diagnostics are captured and
/// only surface inside the returned error on failure.
pub async fn burn_in_subtitles(
    input: impl AsRef<Path>,
    srt_path: impl AsRef<Path>,
    output: impl AsRef<Path>,
    style: &SubtitleStyle,
) -> MediaResult<()> {
    let input = input.as_ref();
    let srt_path = srt_path.as_ref();
    let output = output.as_ref();

    info!(
        "Burning subtitles: {} + {} -> {}",
        input.display(),
        srt_path.display(),
        output.display()
    );

    let cmd = FfmpegCommand::new(input, output)
        .video_filter(subtitles_filter(srt_path, style))
        .audio_codec("copy");

    FfmpegRunner::new().run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_burn_in_command_shape() {
        let cmd = FfmpegCommand::new("end.mp4", "subbed.mp4")
            .video_filter(subtitles_filter(
                &PathBuf::from("subs.srt"),
                &SubtitleStyle::default(),
            ))
            .audio_codec("copy");

        let args = cmd.build_args();
        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert!(args[vf + 1].starts_with("subtitles=subs.srt"));
        let ca = args.iter().position(|a| a == "-c:a").unwrap();
        assert_eq!(args[ca + 1], "copy");
    }
}
