//! Error types for Horizon Select core.

/// The main error type for core runtime operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
    /// Frame scheduling error.
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

/// Frame-scheduling errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The frame ID is invalid, already delivered, or cancelled.
    #[error("Invalid, delivered or cancelled frame ID")]
    InvalidFrameId,
}

/// A specialized Result type for core runtime operations.
pub type Result<T> = std::result::Result<T, CoreError>;
