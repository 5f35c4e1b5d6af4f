//! Horizon Select - A headless searchable select (combobox) engine.
//!
//! The crate owns the interaction logic of a select widget and leaves
//! drawing to the host:
//!
//! - **Option derivation**: filtering, hiding selected rows, disabled state
//! - **Interaction state machine**: keyboard, pointer and focus handling
//! - **Debounced search**: the list follows the typed text after a delay
//! - **Menu placement**: top/bottom/auto placement and height clamping
//! - **Scroll-into-view**: an eased per-frame scroll of the menu's container
//!
//! Hosts describe their layout through [`geometry::GeometryProvider`], drive
//! animation frames through [`FrameScheduler`], and render the
//! [`select::SelectView`] emitted after every transition.
//!
//! # Example
//!
//! ```
//! use horizon_select::prelude::*;
//!
//! let options = vec![SelectItem::new(1, "Apple"), SelectItem::new(2, "Banana")];
//! let mut select = Select::new(options, SelectConfig::new().with_blur_input_on_select(false));
//!
//! select.handle_input_change("ban");
//! select.handle_key_press(&KeyPressEvent::new(Key::Enter));
//!
//! assert_eq!(select.selected()[0].label, "Banana");
//! ```

pub mod animation;
pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod geometry;
pub mod list_view;
pub mod prelude;
pub mod select;

pub use horizon_select_core::{
    Clock, CoreError, FrameId, FrameScheduler, ManualClock, ManualFrameScheduler, Signal,
    SystemClock, TimerManager, logging,
};

static_assertions::assert_impl_all!(geometry::StaticGeometry: Send, Sync);
static_assertions::assert_impl_all!(list_view::RecordingListView: Send, Sync);
static_assertions::assert_impl_all!(device::DeviceCache: Send, Sync);
static_assertions::assert_impl_all!(select::Select<select::SelectItem>: Send, Sync);
