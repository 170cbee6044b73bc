//! Subtitle cues and SRT serialization.
//!
//! Cues live on the relative timeline of the stitched clip, not the
//! source video's timeline. They are written to an `.srt` file as the
//! hand-off between subtitle synthesis and the burn-in stage.

use serde::{Deserialize, Serialize};

/// One subtitle cue on the stitched clip's relative timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCue {
    /// 1-based index, in output order.
    pub index: u32,
    /// Start in relative seconds (duration since clip start).
    pub start: f64,
    /// End in relative seconds.
    pub end: f64,
    /// Cue text, carried verbatim from the segment.
    pub text: String,
}

impl SubtitleCue {
    /// Create a new cue.
    pub fn new(index: u32, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }
}

/// Format seconds as an SRT timestamp: `HH:MM:SS,mmm`.
pub fn format_srt_timestamp(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let millis = (total_secs * 1000.0).round() as u64;
    let hours = millis / 3_600_000;
    let mins = (millis % 3_600_000) / 60_000;
    let secs = (millis % 60_000) / 1000;
    let ms = millis % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
}

/// Compose cues into SRT text: index line, timing line, text block,
/// blank-line separated.
pub fn compose_srt(cues: &[SubtitleCue]) -> String {
    let mut out = String::new();
    for cue in cues {
        out.push_str(&cue.index.to_string());
        out.push('\n');
        out.push_str(&format_srt_timestamp(cue.start));
        out.push_str(" --> ");
        out.push_str(&format_srt_timestamp(cue.end));
        out.push('\n');
        out.push_str(cue.text.trim_end_matches('\n'));
        out.push_str("\n\n");
    }
    out
}
