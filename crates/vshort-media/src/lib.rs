//! FFmpeg CLI wrapper for the vshort render pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with captured diagnostics
//! - FFprobe-based video probing (duration, dimensions)
//! - Sub-clip extraction and concat stitching
//! - Filter builders (center crop, end-card overlay, subtitle burn-in)
//! - Cross-device-safe file moves for the commit stage

pub mod burnin;
pub mod command;
pub mod error;
pub mod filters;
pub mod fs_utils;
pub mod probe;
pub mod stitch;

pub use burnin::burn_in_subtitles;
pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use filters::{center_crop_filter, end_card_filter, subtitles_filter, SubtitleStyle};
pub use fs_utils::move_file;
pub use probe::{get_duration, probe_video, VideoInfo};
pub use stitch::{extract_region, stitch_regions, ClipRegion};
