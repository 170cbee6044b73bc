//! Shared data models for the vshort render pipeline.

pub mod segment;
pub mod state;
pub mod subtitle;

pub use segment::{RenderRequest, Segment};
pub use state::{RenderStage, RenderState, StateEvent};
pub use subtitle::{compose_srt, format_srt_timestamp, SubtitleCue};
