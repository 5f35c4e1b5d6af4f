//! Core runtime for Horizon Select.
//!
//! This crate provides the plumbing the select widget is built on:
//!
//! - **Clock**: An injectable time source ([`SystemClock`], [`ManualClock`])
//! - **Timers**: One-shot timers polled by their owner ([`TimerManager`])
//! - **Frames**: Per-frame step requests with cancel tokens ([`FrameScheduler`])
//! - **Signal/Slot System**: Type-safe observer notifications ([`Signal`])
//! - **Logging**: `tracing` target names for every subsystem
//!
//! Everything here assumes a single UI thread. The types are `Send + Sync`
//! so they can live inside widget trees shared across the host, but no
//! operation blocks.
//!
//! # Timer Example
//!
//! ```
//! use horizon_select_core::{ManualClock, TimerManager};
//! use std::time::Duration;
//!
//! let clock = ManualClock::shared();
//! let mut timers = TimerManager::with_clock(clock.clone());
//!
//! let id = timers.start_one_shot(Duration::from_millis(200));
//! clock.advance(Duration::from_millis(200));
//! assert_eq!(timers.process_expired(), vec![id]);
//! ```

mod clock;
mod error;
pub mod frame;
pub mod logging;
pub mod signal;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, FrameError, Result, TimerError};
pub use frame::{FrameId, FrameScheduler, ManualFrameScheduler};
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
static_assertions::assert_impl_all!(ManualFrameScheduler: Send, Sync);
static_assertions::assert_impl_all!(TimerManager: Send, Sync);
