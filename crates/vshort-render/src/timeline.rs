//! Segment timeline builder.
//!
//! Maps an ordered selection of transcript segments onto the gap-free
//! relative timeline of the stitched output clip, clipping end times
//! that overshoot the actual source duration.

use vshort_media::ClipRegion;
use vshort_models::Segment;

/// A segment placed on both timelines: its clipped source region and
/// its span on the stitched clip's relative timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSegment {
    /// Start in source seconds.
    pub clipped_start: f64,
    /// End in source seconds, clipped to the source duration.
    pub clipped_end: f64,
    /// Start on the stitched clip's relative timeline.
    pub relative_start: f64,
    /// End on the stitched clip's relative timeline.
    pub relative_end: f64,
    /// Transcript text, carried verbatim.
    pub text: String,
}

impl TimedSegment {
    /// Duration after clipping; never negative.
    pub fn clipped_duration(&self) -> f64 {
        self.clipped_end - self.clipped_start
    }

    /// Whether the clipped region is empty (segment entirely past the
    /// source end).
    pub fn is_empty(&self) -> bool {
        self.clipped_duration() <= 0.0
    }

    /// The source region to extract for this segment.
    pub fn region(&self) -> ClipRegion {
        ClipRegion::new(self.clipped_start, self.clipped_end)
    }
}

/// Build the relative timeline for `segments` against a source of
/// `source_duration` seconds.
///
/// A running cursor starts at 0 and advances by each segment's clipped
/// duration in selection order. Transcription can claim end times past
/// the real source duration; those are clipped to it. A segment whose
/// clipped region would be zero or negative length is clamped to a
/// zero-duration entry (keeping cue indices aligned with the
/// selection) rather than dropped or rejected.
///
/// Pure function of its inputs: no state is carried between calls.
pub fn build_timeline(segments: &[Segment], source_duration: f64) -> Vec<TimedSegment> {
    let mut cursor = 0.0_f64;
    segments
        .iter()
        .map(|segment| {
            let clipped_start = segment.start;
            let clipped_end = segment.end.min(source_duration).max(clipped_start);
            let relative_start = cursor;
            let relative_end = cursor + (clipped_end - clipped_start);
            cursor = relative_end;
            TimedSegment {
                clipped_start,
                clipped_end,
                relative_start,
                relative_end,
                text: segment.text.clone(),
            }
        })
        .collect()
}

/// Total duration of the stitched clip: the final cursor value.
pub fn total_duration(timeline: &[TimedSegment]) -> f64 {
    timeline.last().map(|t| t.relative_end).unwrap_or(0.0)
}
