//! Render configuration.

use vshort_media::SubtitleStyle;

/// Render configuration.
///
/// Crop target, end-card window, and subtitle style are configuration,
/// not pipeline contract; the defaults match the reference vertical
/// short format.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Target crop width in pixels.
    pub crop_width: u32,
    /// Target crop height in pixels.
    pub crop_height: u32,
    /// Trailing window replaced by the end card, in seconds.
    pub end_card_secs: f64,
    /// Text drawn centered over the end-card window.
    pub end_card_text: String,
    /// End-card font size.
    pub end_card_font_size: u32,
    /// Subtitle burn-in style.
    pub subtitle_style: SubtitleStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            crop_width: 607,
            crop_height: 1080,
            end_card_secs: 5.0,
            end_card_text: "The full video is on my main channel!".to_string(),
            end_card_font_size: 48,
            subtitle_style: SubtitleStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            crop_width: env_parse("VSHORT_CROP_WIDTH", defaults.crop_width),
            crop_height: env_parse("VSHORT_CROP_HEIGHT", defaults.crop_height),
            end_card_secs: env_parse("VSHORT_END_CARD_SECS", defaults.end_card_secs),
            end_card_text: std::env::var("VSHORT_END_CARD_TEXT")
                .unwrap_or(defaults.end_card_text),
            end_card_font_size: env_parse(
                "VSHORT_END_CARD_FONT_SIZE",
                defaults.end_card_font_size,
            ),
            subtitle_style: SubtitleStyle {
                alignment: env_parse("VSHORT_SUB_ALIGNMENT", defaults.subtitle_style.alignment),
                margin_v: env_parse("VSHORT_SUB_MARGIN_V", defaults.subtitle_style.margin_v),
                font_size: env_parse("VSHORT_SUB_FONT_SIZE", defaults.subtitle_style.font_size),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_format() {
        let config = RenderConfig::default();
        assert_eq!(config.crop_width, 607);
        assert_eq!(config.crop_height, 1080);
        assert!((config.end_card_secs - 5.0).abs() < 1e-9);
        assert_eq!(config.subtitle_style.alignment, 2);
        assert_eq!(config.subtitle_style.margin_v, 50);
        assert_eq!(config.subtitle_style.font_size, 12);
    }
}
