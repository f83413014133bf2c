use thiserror::Error;

/// Errors that can abort a streaming session.
///
/// End-of-stream is deliberately absent: sources signal it by yielding
/// `None`, and the pacing loop drains cleanly without reporting a failure.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The video source could not be opened. Fatal; the session never
    /// enters streaming.
    #[error("source unavailable ({descriptor}): {reason}")]
    SourceUnavailable {
        /// Human-readable description of the requested source.
        descriptor: String,
        /// Why it could not be opened.
        reason: String,
    },

    /// A decoded frame has degenerate dimensions. Fatal to the current
    /// session; no partial frame is rendered.
    #[error("invalid frame dimensions: {width}×{height}")]
    InvalidFrame {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),
}
