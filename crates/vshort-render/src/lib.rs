//! Short-form render pipeline.
//!
//! Turns a long-form source video plus an ordered selection of
//! transcript segments into a short vertical clip with burned-in
//! subtitles, publishing progress events to an observer channel.
//!
//! The pipeline is a single-shot, single-worker batch operation per
//! request: timeline+stitch, center crop, end-card overlay, subtitle
//! burn-in, then an atomic move to the final output path.

pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod pipeline;
pub mod progress;
pub mod subtitles;
pub mod timeline;
pub mod workspace;

pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use logging::{init_tracing, RenderLogger};
pub use manager::RenderManager;
pub use pipeline::RenderPipeline;
pub use progress::{ProgressSink, ProgressTracker};
pub use subtitles::synthesize_cues;
pub use timeline::{build_timeline, TimedSegment};
pub use workspace::Workspace;
