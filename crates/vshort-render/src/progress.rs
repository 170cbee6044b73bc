//! Render progress tracking.
//!
//! The tracker owns the state for exactly one render invocation and
//! publishes a `StateEvent` on an explicit caller-supplied sink each
//! time a stage is entered. It is driven by the single render worker,
//! once per stage, in stage order; it is not shared across renders.

use std::path::PathBuf;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use vshort_models::{RenderStage, RenderState, StateEvent};

/// The push channel observers receive `StateEvent`s on.
pub type ProgressSink = UnboundedSender<StateEvent>;

/// Progress state machine for one render.
#[derive(Debug)]
pub struct ProgressTracker {
    output_path: PathBuf,
    stage: RenderStage,
    progress: f64,
    sink: ProgressSink,
}

impl ProgressTracker {
    /// Create a tracker at `Start` with zero progress.
    ///
    /// `Start` itself is not published; the first event on the sink is
    /// the transition into `SegmentToClip`.
    pub fn new(output_path: impl Into<PathBuf>, sink: ProgressSink) -> Self {
        Self {
            output_path: output_path.into(),
            stage: RenderStage::Start,
            progress: 0.0,
            sink,
        }
    }

    /// Enter `stage`: accumulate its weight and publish the new state.
    ///
    /// Must be called once per stage, in stage order. A dropped
    /// observer is not an error; the render carries on unobserved.
    pub fn advance(&mut self, stage: RenderStage) {
        self.stage = stage;
        self.progress += stage.weight();

        debug!(
            stage = %stage,
            progress = self.progress,
            "Render stage entered"
        );

        let event = StateEvent {
            output_path: self.output_path.clone(),
            stage: self.stage,
            progress: self.progress,
        };
        if self.sink.send(event).is_err() {
            debug!("Progress observer dropped, continuing unobserved");
        }
    }

    /// Snapshot of the current (output path, stage, progress) triple.
    pub fn state(&self) -> RenderState {
        RenderState {
            output_path: self.output_path.clone(),
            stage: self.stage,
            progress: self.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_initial_state_is_start_unpublished() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tracker = ProgressTracker::new("short.mp4", tx);

        let state = tracker.state();
        assert_eq!(state.stage, RenderStage::Start);
        assert!(state.progress.abs() < EPS);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_full_stage_sequence_reaches_exactly_one() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker = ProgressTracker::new("short.mp4", tx);

        for stage in RenderStage::pipeline_order() {
            tracker.advance(stage);
        }

        assert!((tracker.state().progress - 1.0).abs() < EPS);
        assert_eq!(tracker.state().stage, RenderStage::Finish);

        // The observer reconstructs the exact stage sequence, with
        // monotonically increasing progress.
        let mut last_progress = 0.0;
        for expected in RenderStage::pipeline_order() {
            let event = rx.try_recv().unwrap();
            assert_eq!(event.stage, expected);
            assert!(event.progress >= last_progress);
            last_progress = event.progress;
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_event_carries_output_path() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker = ProgressTracker::new("out/short.mp4", tx);

        tracker.advance(RenderStage::SegmentToClip);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.output_path, PathBuf::from("out/short.mp4"));
        assert!((event.progress - 0.2).abs() < EPS);
    }

    #[test]
    fn test_dropped_observer_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut tracker = ProgressTracker::new("short.mp4", tx);

        tracker.advance(RenderStage::SegmentToClip);
        assert_eq!(tracker.state().stage, RenderStage::SegmentToClip);
    }
}
