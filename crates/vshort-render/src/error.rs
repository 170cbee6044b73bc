//! Render error types.

use thiserror::Error;

use vshort_media::MediaError;

pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that abort a render. All variants are fatal: no partial
/// output is produced at the request's output path, and the progress
/// channel receives no further events after the failing stage.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Source unreadable or a requested range was invalid.
    #[error("Media access failed: {0}")]
    MediaAccess(#[from] MediaError),

    /// Clip shorter than the end-card window; raised before any file
    /// is materialized.
    #[error("Clip is {clip_secs:.2}s, shorter than the {end_card_secs:.2}s end-card window")]
    InsufficientDuration { clip_secs: f64, end_card_secs: f64 },

    /// External burn-in process exited non-zero. The unsubbed
    /// intermediate file stays in the workspace for diagnosis.
    #[error("Subtitle burn-in failed")]
    BurnIn { stderr: String },

    /// Final move to the output path failed. The subbed file stays at
    /// its temporary path.
    #[error("Failed to commit final clip: {source}")]
    Commit {
        #[source]
        source: MediaError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Create a burn-in failure carrying captured diagnostics.
    pub fn burn_in(stderr: impl Into<String>) -> Self {
        Self::BurnIn {
            stderr: stderr.into(),
        }
    }

    /// Create a commit failure.
    pub fn commit(source: MediaError) -> Self {
        Self::Commit { source }
    }

    /// Captured diagnostics from the failed burn-in process, if any.
    pub fn burn_in_stderr(&self) -> Option<&str> {
        match self {
            Self::BurnIn { stderr } => Some(stderr),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_error_converts_to_media_access() {
        let err: RenderError = MediaError::FfmpegNotFound.into();
        assert!(matches!(err, RenderError::MediaAccess(_)));
    }

    #[test]
    fn test_burn_in_keeps_diagnostics() {
        let err = RenderError::burn_in("ffmpeg: no such filter");
        assert_eq!(err.burn_in_stderr(), Some("ffmpeg: no such filter"));
        // Diagnostics are retained but never part of the display string.
        assert!(!err.to_string().contains("no such filter"));
    }
}
