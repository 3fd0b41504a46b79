//! Error types for the gesture interaction engine.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Hand tracker inference failed for one frame
    #[error("Hand tracker error: {0}")]
    Tracker(String),

    /// Frame source could not deliver a frame
    #[error("Frame source error: {0}")]
    FrameSource(String),

    /// Engine setup (tracker initialization, frame source acquisition) failed
    #[error("Setup error: {0}")]
    Setup(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filter initialization or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
