//! Logging facilities for Horizon Select.
//!
//! Horizon Select uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter(EnvFilter::new("horizon_select=debug"))
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`], so a directive such
//! as `horizon_select::scroll=trace` isolates a single subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "horizon_select_core::timer";
    /// Frame scheduling target.
    pub const FRAME: &str = "horizon_select_core::frame";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_select_core::signal";
    /// Interaction state machine target.
    pub const SELECT: &str = "horizon_select::select";
    /// Option derivation target.
    pub const OPTIONS: &str = "horizon_select::options";
    /// Debounced search input target.
    pub const DEBOUNCE: &str = "horizon_select::debounce";
    /// Menu placement target.
    pub const PLACEMENT: &str = "horizon_select::placement";
    /// Scroll-into-view animation target.
    pub const SCROLL: &str = "horizon_select::scroll";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_select::config";
    /// Device capability detection target.
    pub const DEVICE: &str = "horizon_select::device";
}

/// Span names used throughout Horizon Select for tracing.
pub mod span_names {
    /// One committed state transition of a select widget.
    pub const COMMIT: &str = "horizon_select::commit";
    /// One scroll animation frame.
    pub const SCROLL_FRAME: &str = "horizon_select::scroll_frame";
}
