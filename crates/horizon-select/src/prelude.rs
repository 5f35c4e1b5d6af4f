//! Prelude module for Horizon Select.
//!
//! ```ignore
//! use horizon_select::prelude::*;
//! ```

// ============================================================================
// Select Engine
// ============================================================================

pub use crate::select::{
    Accessors, AriaSnapshot, FocusedOption, LabeledOption, MenuOption, OptionValue, RowView, Select,
    SelectItem, SelectView, SelectedOption, SelectionChange,
};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{MenuPosition, SelectConfig};
pub use crate::error::ConfigError;

// ============================================================================
// Host Integration
// ============================================================================

pub use crate::device::{DeviceCapabilities, DeviceDetector};
pub use crate::events::{Key, KeyPressEvent, KeyboardModifiers, PointerTarget};
pub use crate::geometry::{ComputedStyle, ElementHandle, GeometryProvider, Rect};
pub use crate::list_view::{ListView, ListViewProps};

pub use horizon_select_core::{Clock, FrameId, FrameScheduler, Signal};
