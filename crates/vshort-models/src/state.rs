//! Render stage state machine and progress events.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stages of a single render, in the exact order they are visited.
///
/// Each stage is entered at most once per render and never revisited.
/// The per-stage progress weights sum to 1.0 from `Start` at 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderStage {
    /// Render accepted, no work done yet.
    #[default]
    Start,
    /// Segments are being stitched into one clip.
    SegmentToClip,
    /// Stitched clip is being center-cropped to the portrait target.
    CropClip,
    /// End-card overlay is being composed and materialized.
    EndClip,
    /// Subtitles are being synthesized and burned in.
    SubClip,
    /// Finished clip is being moved to the output path.
    MoveClip,
    /// Render complete.
    Finish,
}

impl RenderStage {
    /// Progress added when this stage is entered.
    pub fn weight(&self) -> f64 {
        match self {
            RenderStage::Start => 0.0,
            RenderStage::SegmentToClip => 0.2,
            RenderStage::CropClip => 0.2,
            RenderStage::EndClip => 0.2,
            RenderStage::SubClip => 0.2,
            RenderStage::MoveClip => 0.1,
            RenderStage::Finish => 0.1,
        }
    }

    /// Get string representation of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStage::Start => "start",
            RenderStage::SegmentToClip => "segment_to_clip",
            RenderStage::CropClip => "crop_clip",
            RenderStage::EndClip => "end_clip",
            RenderStage::SubClip => "sub_clip",
            RenderStage::MoveClip => "move_clip",
            RenderStage::Finish => "finish",
        }
    }

    /// Check if this is the terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderStage::Finish)
    }

    /// All stages that do work, in visit order (everything after `Start`).
    pub fn pipeline_order() -> [RenderStage; 6] {
        [
            RenderStage::SegmentToClip,
            RenderStage::CropClip,
            RenderStage::EndClip,
            RenderStage::SubClip,
            RenderStage::MoveClip,
            RenderStage::Finish,
        ]
    }
}

impl std::fmt::Display for RenderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of a render's observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Final output path of the render this state belongs to.
    pub output_path: PathBuf,
    /// Current stage.
    pub stage: RenderStage,
    /// Accumulated progress in [0, 1], monotonically non-decreasing.
    pub progress: f64,
}

/// Event published on the progress channel after each stage transition.
///
/// Observers reading the channel sequentially reconstruct the exact
/// stage sequence; `progress` is monotonically increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    /// Final output path of the render.
    pub output_path: PathBuf,
    /// Stage just entered.
    pub stage: RenderStage,
    /// Progress after entering the stage.
    pub progress: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_weights_sum_to_one() {
        let total: f64 = RenderStage::pipeline_order()
            .iter()
            .map(|s| s.weight())
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((RenderStage::Start.weight()).abs() < 1e-9);
    }

    #[test]
    fn test_stage_order_ends_terminal() {
        let order = RenderStage::pipeline_order();
        assert_eq!(order[0], RenderStage::SegmentToClip);
        assert!(order.last().unwrap().is_terminal());
        assert!(!RenderStage::MoveClip.is_terminal());
    }

    #[test]
    fn test_stage_serde_snake_case() {
        let json = serde_json::to_string(&RenderStage::SegmentToClip).unwrap();
        assert_eq!(json, "\"segment_to_clip\"");
        let back: RenderStage = serde_json::from_str("\"move_clip\"").unwrap();
        assert_eq!(back, RenderStage::MoveClip);
    }

    #[test]
    fn test_state_event_serde_round_trip() {
        let event = StateEvent {
            output_path: PathBuf::from("short.mp4"),
            stage: RenderStage::CropClip,
            progress: 0.4,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: StateEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
