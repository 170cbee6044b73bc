//! Subtitle synthesis.
//!
//! One cue per selected segment, positioned on the stitched clip's
//! relative timeline (not the segment's original position in the
//! source). The timeline builder already decided the spans; synthesis
//! copies them verbatim, inserting no gaps of its own.

use vshort_models::SubtitleCue;

use crate::timeline::TimedSegment;

/// Synthesize cues for a built timeline, 1-based index per output order.
pub fn synthesize_cues(timeline: &[TimedSegment]) -> Vec<SubtitleCue> {
    timeline
        .iter()
        .enumerate()
        .map(|(i, timed)| {
            SubtitleCue::new(
                (i + 1) as u32,
                timed.relative_start,
                timed.relative_end,
                timed.text.clone(),
            )
        })
        .collect()
}
