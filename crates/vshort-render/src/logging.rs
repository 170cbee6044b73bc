//! Structured render logging.

use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Render logger with consistent structured fields.
///
/// Renders are identified by their output path, the one stable handle
/// a caller has for a request.
#[derive(Debug, Clone)]
pub struct RenderLogger {
    output: String,
}

impl RenderLogger {
    /// Create a logger for the render producing `output`.
    pub fn new(output: &Path) -> Self {
        Self {
            output: output.display().to_string(),
        }
    }

    /// Log the start of a render.
    pub fn log_start(&self, message: &str) {
        info!(output = %self.output, "Render started: {}", message);
    }

    /// Log a progress update during a render.
    pub fn log_progress(&self, message: &str) {
        info!(output = %self.output, "Render progress: {}", message);
    }

    /// Log a render failure.
    pub fn log_error(&self, message: &str) {
        error!(output = %self.output, "Render error: {}", message);
    }

    /// Log render completion.
    pub fn log_completion(&self, message: &str) {
        info!(output = %self.output, "Render completed: {}", message);
    }
}

/// Initialize tracing for a host process.
///
/// Reads `RUST_LOG` for filtering with a `vshort=info` default, and
/// loads `.env` if present. Safe to call only once per process.
pub fn init_tracing() {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vshort=info".parse().expect("static directive parses"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_logger_records_output_path() {
        let logger = RenderLogger::new(&PathBuf::from("out/short.mp4"));
        assert_eq!(logger.output, "out/short.mp4");
    }
}
