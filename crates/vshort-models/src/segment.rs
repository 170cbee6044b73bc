//! Transcript segments and render requests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A time-coded span of source video with its transcript text.
///
/// `start` and `end` are in source-video seconds. `end` comes from
/// transcription and is untrusted: it may exceed the actual source
/// duration and must be clipped before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment identifier from the transcript.
    pub id: u32,
    /// Start time in source seconds.
    pub start: f64,
    /// End time in source seconds (may overshoot the source duration).
    pub end: f64,
    /// Transcript text for this span.
    pub text: String,
}

impl Segment {
    /// Create a new segment.
    pub fn new(id: u32, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration as supplied, before clipping to the source duration.
    pub fn claimed_duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A single render request: an ordered selection of segments and the
/// final output path.
///
/// Immutable once submitted; exactly one render runs per request.
/// Selection order is caller-chosen and need not be chronological;
/// duplicate segments produce duplicate clip regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Segments in selection order.
    pub segments: Vec<Segment>,
    /// Where the finished clip must land.
    pub output_path: PathBuf,
}

impl RenderRequest {
    /// Create a new render request.
    pub fn new(segments: Vec<Segment>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            segments,
            output_path: output_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_claimed_duration() {
        let seg = Segment::new(0, 10.0, 25.5, "hello");
        assert!((seg.claimed_duration() - 15.5).abs() < 1e-9);
    }

    #[test]
    fn test_segment_serde_round_trip() {
        let seg = Segment::new(3, 1.25, 4.5, "two\nlines");
        let json = serde_json::to_string(&seg).unwrap();
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seg);
    }

    #[test]
    fn test_request_preserves_selection_order() {
        let request = RenderRequest::new(
            vec![
                Segment::new(2, 20.0, 30.0, "b"),
                Segment::new(0, 0.0, 10.0, "a"),
                Segment::new(2, 20.0, 30.0, "b"),
            ],
            "short.mp4",
        );
        let ids: Vec<u32> = request.segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 0, 2]);
    }
}
