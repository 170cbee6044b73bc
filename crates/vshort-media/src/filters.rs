//! FFmpeg video filter builders.

use std::path::Path;

/// Subtitle burn-in style parameters, passed to the `subtitles` filter
/// as an ASS `force_style` override.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleStyle {
    /// ASS alignment code (2 = bottom center).
    pub alignment: u8,
    /// Vertical margin in pixels.
    pub margin_v: u32,
    /// Font size.
    pub font_size: u32,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            alignment: 2,
            margin_v: 50,
            font_size: 12,
        }
    }
}

impl SubtitleStyle {
    /// Render as a `force_style` value.
    pub fn force_style(&self) -> String {
        format!(
            "Alignment={},MarginV={},Fontsize={}",
            self.alignment, self.margin_v, self.font_size
        )
    }
}

/// Center-crop filter to a fixed target size.
pub fn center_crop_filter(width: u32, height: u32) -> String {
    format!(
        "crop={w}:{h}:(iw-{w})/2:(ih-{h})/2",
        w = width,
        h = height
    )
}

/// End-card overlay filter: centered text drawn over the trailing
/// window of the clip (`t >= total_secs - end_card_secs`), frames
/// outside the window untouched.
pub fn end_card_filter(
    text: &str,
    font_size: u32,
    total_secs: f64,
    end_card_secs: f64,
) -> String {
    format!(
        "drawtext=text='{}':fontcolor=white:fontsize={}:x=(w-text_w)/2:y=(h-text_h)/2:enable='gte(t,{:.3})'",
        escape_filter_text(text),
        font_size,
        (total_secs - end_card_secs).max(0.0)
    )
}

/// Subtitle burn-in filter for an SRT file.
pub fn subtitles_filter(srt_path: &Path, style: &SubtitleStyle) -> String {
    format!(
        "subtitles={}:force_style='{}'",
        escape_filter_path(srt_path),
        style.force_style()
    )
}

/// Escape text for use inside a single-quoted filter argument.
fn escape_filter_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "'\\''")
        .replace('%', "\\%")
}

/// Escape a path for use as a filter option value.
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}
